//! Domain models for curio.
//!
//! Entities mirror the persisted schema (§ users / article / bookmark /
//! user_article_tag / auth_token); request and outcome types are the
//! transport-independent surface the orchestration layer exposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USERS
// =============================================================================

/// A registered user account.
///
/// Immutable after registration except for the active flag. The password
/// hash never leaves the identity layer; see [`PublicUser`] for the
/// serializable view.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Strip credentials for API responses.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_active: self.is_active,
        }
    }
}

/// User view safe to serialize to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Request for creating a new user account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

// =============================================================================
// AUTH TOKENS
// =============================================================================

/// An issued bearer token, as returned to the client.
///
/// The plaintext secret exists only in this response; the store keeps a
/// SHA-256 hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

// =============================================================================
// ARTICLES
// =============================================================================

/// A known article, deduplicated by source url and shared across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// A search hit from the Search/Summary Provider.
///
/// Summary is already stripped of markup and ellipsis-truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCandidate {
    pub title: String,
    pub url: String,
    pub summary: String,
}

// =============================================================================
// BOOKMARKS
// =============================================================================

/// A user's saved-article marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// An article in a user's library, with that user's tags attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub tags: Vec<String>,
    pub bookmarked_at: DateTime<Utc>,
}

// =============================================================================
// TAG ASSIGNMENTS
// =============================================================================

/// One user's personal tag on one article.
///
/// (user_id, article_id, tag_name) is unique; reconciliation never creates
/// duplicates for the same triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
}

/// The minimal add/remove delta a reconcile pass computed and applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDelta {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl TagDelta {
    /// True when the reconcile pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// =============================================================================
// SAVE / UNSAVE FLOW
// =============================================================================

/// Payload for saving an article into a user's library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveArticleRequest {
    pub url: String,
    pub title: String,
    pub summary: String,
}

/// Result of a save: the (possibly pre-existing) article id and the tag
/// names asserted for this user, empty when generation degraded to no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub article_id: Uuid,
    pub tags: Vec<String>,
}

/// Informational result of an unsave request.
///
/// Only `Removed` touched the store; the other variants are idempotent
/// no-ops reported as success, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsaveOutcome {
    /// The bookmark row was deleted.
    Removed,
    /// The article exists but this user never bookmarked it.
    NotBookmarked,
    /// No article with that url is known.
    ArticleUnknown,
}

impl UnsaveOutcome {
    /// User-facing message for the structured success response.
    pub fn message(&self) -> &'static str {
        match self {
            UnsaveOutcome::Removed => "Bookmark removed!",
            UnsaveOutcome::NotBookmarked => "You have not bookmarked this article!",
            UnsaveOutcome::ArticleUnknown => "Article not found!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_credentials() {
        let user = User {
            id: crate::ids::new_v7(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };

        let public = user.public();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("ada"));
    }

    #[test]
    fn test_tag_delta_is_empty() {
        assert!(TagDelta::default().is_empty());
        assert!(!TagDelta {
            added: vec!["Biology".to_string()],
            removed: vec![],
        }
        .is_empty());
    }

    #[test]
    fn test_unsave_outcome_messages_distinct() {
        let msgs = [
            UnsaveOutcome::Removed.message(),
            UnsaveOutcome::NotBookmarked.message(),
            UnsaveOutcome::ArticleUnknown.message(),
        ];
        assert_eq!(
            msgs.iter().collect::<std::collections::HashSet<_>>().len(),
            3
        );
    }

    #[test]
    fn test_saved_article_flattens_article_fields() {
        let saved = SavedArticle {
            article: Article {
                id: crate::ids::new_v7(),
                url: "https://en.wikipedia.org/?curid=1".to_string(),
                title: "A".to_string(),
                summary: "s".to_string(),
                created_at: Utc::now(),
            },
            tags: vec!["Biology".to_string()],
            bookmarked_at: Utc::now(),
        };

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["title"], "A");
        assert_eq!(json["tags"][0], "Biology");
    }
}
