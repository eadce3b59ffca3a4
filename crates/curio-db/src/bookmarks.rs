//! Bookmark ledger repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row, Transaction};
use uuid::Uuid;

use curio_core::{Article, BookmarkRepository, Error, Result, SavedArticle};

/// PostgreSQL implementation of BookmarkRepository.
pub struct PgBookmarkRepository {
    pool: Pool<Postgres>,
}

impl PgBookmarkRepository {
    /// Create a new PgBookmarkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Idempotent insert within a caller-owned transaction.
    ///
    /// Rows-affected distinguishes "created" from "already present".
    pub async fn ensure_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        article_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookmark (user_id, article_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, article_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(article_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn ensure(&self, user_id: Uuid, article_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let created = self.ensure_tx(&mut tx, user_id, article_id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(created)
    }

    async fn remove(&self, user_id: Uuid, article_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookmark WHERE user_id = $1 AND article_id = $2")
            .bind(user_id)
            .bind(article_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, user_id: Uuid, article_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookmark WHERE user_id = $1 AND article_id = $2)",
        )
        .bind(user_id)
        .bind(article_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(exists)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedArticle>> {
        // Tags are aggregated per (user, article) in the same pass; rows
        // whose article was deleted (article_id set null) are skipped.
        let rows = sqlx::query(
            r#"
            SELECT
                a.id, a.url, a.title, a.summary, a.created_at,
                b.created_at AS bookmarked_at,
                COALESCE(
                    ARRAY_AGG(t.tag_name ORDER BY t.tag_name)
                        FILTER (WHERE t.tag_name IS NOT NULL),
                    '{}'
                ) AS tags
            FROM bookmark b
            JOIN article a ON a.id = b.article_id
            LEFT JOIN user_article_tag t
                ON t.article_id = a.id AND t.user_id = b.user_id
            WHERE b.user_id = $1
            GROUP BY a.id, a.url, a.title, a.summary, a.created_at, b.created_at
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let saved = rows
            .into_iter()
            .map(|row| SavedArticle {
                article: Article {
                    id: row.get("id"),
                    url: row.get("url"),
                    title: row.get("title"),
                    summary: row.get("summary"),
                    created_at: row.get("created_at"),
                },
                tags: row.get("tags"),
                bookmarked_at: row.get("bookmarked_at"),
            })
            .collect();

        Ok(saved)
    }
}
