//! Tag reconciler state-transition properties against a live database.

use std::collections::HashSet;

use curio_core::{ArticleRepository, TagAssignmentRepository};
use curio_db::test_fixtures::{seed_user, unique_url, TestDatabase};
use uuid::Uuid;

async fn setup_pair(test_db: &TestDatabase) -> (Uuid, Uuid) {
    let user = seed_user(&test_db.db).await;
    let article_id = test_db
        .db
        .articles
        .upsert(&unique_url(), "A", "s")
        .await
        .expect("upsert");
    (user.id, article_id)
}

fn as_set(tags: &[String]) -> HashSet<&str> {
    tags.iter().map(String::as_str).collect()
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_persists_exactly_the_desired_set() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    let delta = test_db
        .db
        .tags
        .reconcile(
            user_id,
            article_id,
            &["Biology".to_string(), "Genetics".to_string()],
        )
        .await
        .expect("initial reconcile");
    assert_eq!(as_set(&delta.added), ["Biology", "Genetics"].into());
    assert!(delta.removed.is_empty());

    // Shift the set: drop Genetics, keep Biology, add Chemistry.
    let delta = test_db
        .db
        .tags
        .reconcile(
            user_id,
            article_id,
            &["Biology".to_string(), "Chemistry".to_string()],
        )
        .await
        .expect("second reconcile");
    assert_eq!(as_set(&delta.added), ["Chemistry"].into());
    assert_eq!(as_set(&delta.removed), ["Genetics"].into());

    let persisted = test_db
        .db
        .tags
        .get_for(user_id, article_id)
        .await
        .expect("get_for");
    assert_eq!(as_set(&persisted), ["Biology", "Chemistry"].into());
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_preserves_untouched_row_identity() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["Biology".to_string()])
        .await
        .expect("initial reconcile");

    let id_before: Uuid = sqlx::query_scalar(
        "SELECT id FROM user_article_tag WHERE user_id = $1 AND article_id = $2 AND tag_name = 'Biology'",
    )
    .bind(user_id)
    .bind(article_id)
    .fetch_one(&test_db.pool)
    .await
    .expect("id before");

    // Biology is in C ∩ D; its row must not be rewritten.
    test_db
        .db
        .tags
        .reconcile(
            user_id,
            article_id,
            &["Biology".to_string(), "Genetics".to_string()],
        )
        .await
        .expect("second reconcile");

    let id_after: Uuid = sqlx::query_scalar(
        "SELECT id FROM user_article_tag WHERE user_id = $1 AND article_id = $2 AND tag_name = 'Biology'",
    )
    .bind(user_id)
    .bind(article_id)
    .fetch_one(&test_db.pool)
    .await
    .expect("id after");

    assert_eq!(id_before, id_after);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_empty_desired_removes_all() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["A".to_string(), "B".to_string()])
        .await
        .expect("seed tags");

    let delta = test_db
        .db
        .tags
        .reconcile(user_id, article_id, &[])
        .await
        .expect("empty reconcile");
    assert!(delta.added.is_empty());
    assert_eq!(as_set(&delta.removed), ["A", "B"].into());

    let persisted = test_db
        .db
        .tags
        .get_for(user_id, article_id)
        .await
        .expect("get_for");
    assert!(persisted.is_empty());
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_is_case_sensitive() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["Biology".to_string()])
        .await
        .expect("uppercase reconcile");

    // "biology" is a different tag: Biology is removed, biology added.
    let delta = test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["biology".to_string()])
        .await
        .expect("lowercase reconcile");
    assert_eq!(delta.added, vec!["biology"]);
    assert_eq!(delta.removed, vec!["Biology"]);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_normalizes_whitespace_and_empties() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    let delta = test_db
        .db
        .tags
        .reconcile(
            user_id,
            article_id,
            &[" Biology ".to_string(), "".to_string(), "  ".to_string()],
        )
        .await
        .expect("reconcile");
    assert_eq!(delta.added, vec!["Biology"]);

    let persisted = test_db
        .db
        .tags
        .get_for(user_id, article_id)
        .await
        .expect("get_for");
    assert_eq!(persisted, vec!["Biology"]);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_reconcile_noop_for_identical_sets() {
    let test_db = TestDatabase::new().await;
    let (user_id, article_id) = setup_pair(&test_db).await;

    test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["X".to_string(), "Y".to_string()])
        .await
        .expect("seed");

    let delta = test_db
        .db
        .tags
        .reconcile(user_id, article_id, &["Y".to_string(), "X".to_string()])
        .await
        .expect("identical reconcile");
    assert!(delta.is_empty());
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_tag_sets_are_independent_per_user() {
    let test_db = TestDatabase::new().await;
    let alice = seed_user(&test_db.db).await;
    let bob = seed_user(&test_db.db).await;
    let article_id = test_db
        .db
        .articles
        .upsert(&unique_url(), "A", "s")
        .await
        .expect("upsert");

    test_db
        .db
        .tags
        .reconcile(alice.id, article_id, &["Biology".to_string()])
        .await
        .expect("alice");
    test_db
        .db
        .tags
        .reconcile(bob.id, article_id, &[])
        .await
        .expect("bob empty");

    let alice_tags = test_db
        .db
        .tags
        .get_for(alice.id, article_id)
        .await
        .expect("alice get");
    assert_eq!(alice_tags, vec!["Biology"]);
}
