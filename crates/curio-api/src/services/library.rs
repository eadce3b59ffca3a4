//! Save/unsave/update-tags orchestration.
//!
//! `Library` composes the article directory, bookmark ledger, and tag
//! reconciler into the user-facing operations. The tag generator is an
//! injected collaborator so tests can substitute a mock.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use curio_core::{
    normalize_tags, parse_generated_tags, ArticleRepository, BookmarkRepository, Error, Result,
    SaveArticleRequest, SaveOutcome, SavedArticle, TagAssignmentRepository, TagDelta, TagGenerator,
    UnsaveOutcome,
};
use curio_db::Database;

/// Orchestration service over the store and the tag-generation provider.
#[derive(Clone)]
pub struct Library {
    db: Database,
    generator: Arc<dyn TagGenerator>,
}

impl Library {
    /// Create a new Library over a database and a tag generator.
    pub fn new(db: Database, generator: Arc<dyn TagGenerator>) -> Self {
        Self { db, generator }
    }

    /// Ask the provider for tags, degrading any failure to `None`.
    ///
    /// `None` means "assert nothing" and must never be collapsed into an
    /// empty desired set: a provider failure is not an instruction to wipe
    /// the user's existing tags.
    async fn generate_tags(&self, summary: &str, url: &str) -> Option<Vec<String>> {
        match self.generator.generate_tags(summary, url).await {
            Ok(raw) => {
                let tags = parse_generated_tags(&raw);
                if tags.is_empty() {
                    warn!(
                        subsystem = "api",
                        component = "library",
                        op = "generate_tags",
                        model = self.generator.model_name(),
                        "Provider returned no parseable tags, saving without tags"
                    );
                    None
                } else {
                    Some(tags)
                }
            }
            Err(err) => {
                warn!(
                    subsystem = "api",
                    component = "library",
                    op = "generate_tags",
                    model = self.generator.model_name(),
                    error = %err,
                    "Tag generation failed, saving without tags"
                );
                None
            }
        }
    }

    /// Save an article into a user's library.
    ///
    /// The provider call happens before the transaction opens, so external
    /// latency never holds a database lock. Then upsert, bookmark, and
    /// reconcile commit as one atomic unit; any error rolls all of it back.
    pub async fn save_article(
        &self,
        user_id: Uuid,
        req: &SaveArticleRequest,
    ) -> Result<SaveOutcome> {
        let start = Instant::now();

        let generated = self.generate_tags(&req.summary, &req.url).await;

        let mut tx = self.db.pool.begin().await.map_err(Error::Database)?;

        let article_id = self
            .db
            .articles
            .upsert_tx(&mut tx, &req.url, &req.title, &req.summary)
            .await?;

        self.db
            .bookmarks
            .ensure_tx(&mut tx, user_id, article_id)
            .await?;

        let tags = match &generated {
            Some(desired) => {
                self.db
                    .tags
                    .reconcile_tx(&mut tx, user_id, article_id, desired)
                    .await?;
                desired.clone()
            }
            // Generation degraded: leave whatever tags already exist alone.
            None => Vec::new(),
        };

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "api",
            component = "library",
            op = "save_article",
            user_id = %user_id,
            article_id = %article_id,
            result_count = tags.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Article saved"
        );

        Ok(SaveOutcome { article_id, tags })
    }

    /// Remove a user's bookmark for an article url.
    ///
    /// A ledger operation only: the article row and any tag assignments
    /// survive for other users or a later re-save. Unknown article and
    /// absent bookmark are informational outcomes, not errors.
    pub async fn unsave_article(&self, user_id: Uuid, article_url: &str) -> Result<UnsaveOutcome> {
        let article = match self.db.articles.find_by_url(article_url).await? {
            Some(article) => article,
            None => return Ok(UnsaveOutcome::ArticleUnknown),
        };

        let removed = self.db.bookmarks.remove(user_id, article.id).await?;
        if removed {
            info!(
                subsystem = "api",
                component = "library",
                op = "unsave_article",
                user_id = %user_id,
                article_id = %article.id,
                "Bookmark removed"
            );
            Ok(UnsaveOutcome::Removed)
        } else {
            Ok(UnsaveOutcome::NotBookmarked)
        }
    }

    /// Replace a user's tag set for an article with an explicit list.
    ///
    /// Unlike the save flow, an empty list is a deliberate "remove all
    /// tags" instruction. The article must already exist.
    pub async fn update_tags(
        &self,
        user_id: Uuid,
        article_url: &str,
        tags: &[String],
    ) -> Result<(Vec<String>, TagDelta)> {
        let article = self
            .db
            .articles
            .find_by_url(article_url)
            .await?
            .ok_or_else(|| Error::ArticleNotFound(article_url.to_string()))?;

        let delta = self.db.tags.reconcile(user_id, article.id, tags).await?;

        info!(
            subsystem = "api",
            component = "library",
            op = "update_tags",
            user_id = %user_id,
            article_id = %article.id,
            tags_added = delta.added.len(),
            tags_removed = delta.removed.len(),
            "Tags updated"
        );

        Ok((normalize_tags(tags), delta))
    }

    /// All of a user's saved articles with their tags.
    pub async fn list_saved(&self, user_id: Uuid) -> Result<Vec<SavedArticle>> {
        self.db.bookmarks.list_for_user(user_id).await
    }
}
