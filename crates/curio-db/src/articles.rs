//! Article directory repository implementation.
//!
//! Articles are deduplicated by url and shared across users. The upsert is
//! first-write-wins: a conflicting insert keeps the stored title/summary
//! and returns the existing id.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use curio_core::{new_v7, Article, ArticleRepository, Error, Result};

/// PostgreSQL implementation of ArticleRepository.
pub struct PgArticleRepository {
    pool: Pool<Postgres>,
}

impl PgArticleRepository {
    /// Create a new PgArticleRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Upsert within a caller-owned transaction.
    ///
    /// `ON CONFLICT (url) DO NOTHING` absorbs a concurrent insert racing on
    /// the same url; the follow-up select then reads whichever row won. The
    /// select cannot miss: either our insert landed or a committed row
    /// already holds the url.
    pub async fn upsert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        url: &str,
        title: &str,
        summary: &str,
    ) -> Result<Uuid> {
        let candidate_id = new_v7();
        let inserted = sqlx::query(
            r#"
            INSERT INTO article (id, url, title, summary, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (url) DO NOTHING
            "#,
        )
        .bind(candidate_id)
        .bind(url)
        .bind(title)
        .bind(summary)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

        if inserted.rows_affected() == 1 {
            debug!(
                subsystem = "db",
                component = "articles",
                op = "upsert",
                article_id = %candidate_id,
                "Inserted new article"
            );
            return Ok(candidate_id);
        }

        let id: Uuid = sqlx::query_scalar("SELECT id FROM article WHERE url = $1")
            .bind(url)
            .fetch_one(&mut **tx)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "articles",
            op = "upsert",
            article_id = %id,
            "Article url already known, reusing existing row"
        );
        Ok(id)
    }
}

fn article_from_row(row: &sqlx::postgres::PgRow) -> Article {
    Article {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        summary: row.get("summary"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn upsert(&self, url: &str, title: &str, summary: &str) -> Result<Uuid> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let id = self.upsert_tx(&mut tx, url, title, summary).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Article>> {
        let row = sqlx::query(
            "SELECT id, url, title, summary, created_at FROM article WHERE url = $1",
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| article_from_row(&r)))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Article>> {
        let row = sqlx::query(
            "SELECT id, url, title, summary, created_at FROM article WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| article_from_row(&r)))
    }
}
