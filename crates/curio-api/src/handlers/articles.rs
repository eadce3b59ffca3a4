//! Search, save, unsave, list, and update-tags handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use curio_core::{ArticleCandidate, SaveArticleRequest, SavedArticle};

use crate::auth::RequireUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsaveParams {
    pub article_url: String,
}

/// Update-tags payload: the exact desired tag list. Empty means "remove
/// all tags" — deliberate, unlike the save flow's provider-failure path.
#[derive(Debug, Deserialize)]
pub struct UpdateTagsRequest {
    pub article_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `GET /search_wiki?query=`
pub async fn search_wiki(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ArticleCandidate>>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query must not be empty.".to_string()));
    }

    debug!(
        subsystem = "api",
        component = "articles",
        op = "search",
        user_id = %user.id,
        query = %query,
        "Searching encyclopedia"
    );

    let results = state.search.search(query).await?;
    Ok(Json(results))
}

/// `POST /save_article`
pub async fn save_article(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(req): Json<SaveArticleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.url.trim().is_empty() {
        return Err(ApiError::BadRequest("Article url is required.".to_string()));
    }

    let outcome = state.library.save_article(user.id, &req).await?;

    Ok(Json(serde_json::json!({
        "message": "Article saved successfully!",
        "article_id": outcome.article_id,
        "tags": outcome.tags,
    })))
}

/// `DELETE /unsave_article?article_url=`
///
/// Unknown article and absent bookmark report as structured successes.
pub async fn unsave_article(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<UnsaveParams>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .library
        .unsave_article(user.id, &params.article_url)
        .await?;

    Ok(Json(serde_json::json!({
        "message": outcome.message(),
    })))
}

/// `GET /get_saved_articles`
pub async fn get_saved_articles(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedArticle>>, ApiError> {
    let saved = state.library.list_saved(user.id).await?;
    Ok(Json(saved))
}

/// `PUT /update_tags`
pub async fn update_tags(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateTagsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (tags, _delta) = state
        .library
        .update_tags(user.id, &req.article_url, &req.tags)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Tags updated successfully",
        "tags": tags,
    })))
}
