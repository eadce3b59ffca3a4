//! Core traits for curio abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. Transaction-scoped
//! `_tx` variants live as inherent methods on the Postgres repositories,
//! since they are composition details of the store, not of the interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// IDENTITY STORE
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the password arrives pre-hashed.
    async fn insert(&self, req: CreateUserRequest) -> Result<User>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

// =============================================================================
// ARTICLE DIRECTORY
// =============================================================================

/// Repository for the shared, user-independent article directory.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert-if-absent by url, returning the canonical article id.
    ///
    /// Existing stored data wins: title/summary of the request are discarded
    /// when the url is already known.
    async fn upsert(&self, url: &str, title: &str, summary: &str) -> Result<Uuid>;

    /// Look up an article by url.
    async fn find_by_url(&self, url: &str) -> Result<Option<Article>>;

    /// Fetch an article by id.
    async fn fetch(&self, id: Uuid) -> Result<Option<Article>>;
}

// =============================================================================
// BOOKMARK LEDGER
// =============================================================================

/// Repository for the user↔article bookmark relation.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a bookmark if absent. Returns true when a row was created.
    async fn ensure(&self, user_id: Uuid, article_id: Uuid) -> Result<bool>;

    /// Delete a bookmark if present. Returns true when a row was removed.
    async fn remove(&self, user_id: Uuid, article_id: Uuid) -> Result<bool>;

    /// Whether the (user, article) pair is bookmarked.
    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool>;

    /// All of a user's saved articles with their tags, newest bookmark
    /// first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedArticle>>;
}

// =============================================================================
// TAG RECONCILER
// =============================================================================

/// Repository for per-user, per-article tag assignments.
#[async_trait]
pub trait TagAssignmentRepository: Send + Sync {
    /// Current tag names for a (user, article) pair.
    async fn get_for(&self, user_id: Uuid, article_id: Uuid) -> Result<Vec<String>>;

    /// Reconcile the persisted tag set against `desired`: delete what is no
    /// longer wanted, insert what is missing, leave the intersection's rows
    /// untouched. Executes atomically; returns the applied delta.
    async fn reconcile(
        &self,
        user_id: Uuid,
        article_id: Uuid,
        desired: &[String],
    ) -> Result<TagDelta>;
}

// =============================================================================
// OUTBOUND PROVIDERS
// =============================================================================

/// Tag Generation Provider boundary.
///
/// Given an article summary and url, produce a comma-delimited string of
/// 2–3 suggested tags. Callers treat failure and unparseable output both
/// as "no tags".
#[async_trait]
pub trait TagGenerator: Send + Sync {
    /// Generate the raw comma-delimited tag suggestion string.
    async fn generate_tags(&self, summary: &str, url: &str) -> Result<String>;

    /// Model name used for generation.
    fn model_name(&self) -> &str;
}

/// Search/Summary Provider boundary.
///
/// Free-text query in, candidate articles out (title, url, truncated
/// summary), in the provider's own ranking. No pagination.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ArticleCandidate>>;
}
