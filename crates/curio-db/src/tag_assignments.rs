//! Tag assignment repository: the reconciler.
//!
//! Reconciliation computes the minimal add/remove delta between the
//! persisted tag set and the desired one, then applies it as pure
//! delete + insert inside one transaction. Rows in the intersection are
//! never touched, so their identifiers survive a reconcile. Comparison is
//! case-sensitive.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use curio_core::{
    new_v7, normalize_tags, validate_tag_name, Error, Result, TagAssignmentRepository, TagDelta,
};

/// PostgreSQL implementation of TagAssignmentRepository.
pub struct PgTagAssignmentRepository {
    pool: Pool<Postgres>,
}

impl PgTagAssignmentRepository {
    /// Create a new PgTagAssignmentRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Current tag names for a (user, article) pair within a transaction.
    pub async fn get_for_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        article_id: Uuid,
    ) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT tag_name FROM user_article_tag
            WHERE user_id = $1 AND article_id = $2
            ORDER BY tag_name
            "#,
        )
        .bind(user_id)
        .bind(article_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(|row| row.get("tag_name")).collect())
    }

    /// Reconcile within a caller-owned transaction.
    ///
    /// The caller composes this with article upsert and bookmark creation
    /// so a failure anywhere rolls back the whole save.
    pub async fn reconcile_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        article_id: Uuid,
        desired: &[String],
    ) -> Result<TagDelta> {
        let desired = normalize_tags(desired);
        for tag in &desired {
            validate_tag_name(tag).map_err(Error::InvalidInput)?;
        }

        let current = self.get_for_tx(tx, user_id, article_id).await?;
        let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
        let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

        let to_add: Vec<String> = desired
            .iter()
            .filter(|t| !current_set.contains(t.as_str()))
            .cloned()
            .collect();
        let to_remove: Vec<String> = current
            .iter()
            .filter(|t| !desired_set.contains(t.as_str()))
            .cloned()
            .collect();

        if !to_remove.is_empty() {
            sqlx::query(
                r#"
                DELETE FROM user_article_tag
                WHERE user_id = $1 AND article_id = $2 AND tag_name = ANY($3)
                "#,
            )
            .bind(user_id)
            .bind(article_id)
            .bind(&to_remove)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        }

        let now = Utc::now();
        for tag_name in &to_add {
            sqlx::query(
                r#"
                INSERT INTO user_article_tag (id, user_id, article_id, tag_name, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(new_v7())
            .bind(user_id)
            .bind(article_id)
            .bind(tag_name)
            .bind(now)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        }

        debug!(
            subsystem = "db",
            component = "reconciler",
            op = "reconcile",
            user_id = %user_id,
            article_id = %article_id,
            tags_added = to_add.len(),
            tags_removed = to_remove.len(),
            "Applied tag delta"
        );

        Ok(TagDelta {
            added: to_add,
            removed: to_remove,
        })
    }
}

#[async_trait]
impl TagAssignmentRepository for PgTagAssignmentRepository {
    async fn get_for(&self, user_id: Uuid, article_id: Uuid) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT tag_name FROM user_article_tag
            WHERE user_id = $1 AND article_id = $2
            ORDER BY tag_name
            "#,
        )
        .bind(user_id)
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(|row| row.get("tag_name")).collect())
    }

    async fn reconcile(
        &self,
        user_id: Uuid,
        article_id: Uuid,
        desired: &[String],
    ) -> Result<TagDelta> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let delta = self.reconcile_tx(&mut tx, user_id, article_id, desired).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(delta)
    }
}
