//! Article directory upsert semantics against a live database.
//!
//! All tests require a reachable Postgres (DATABASE_URL or the default
//! test DSN) with migrations applied by the fixture; they are `#[ignore]`d
//! so plain `cargo test` stays hermetic.

use curio_core::ArticleRepository;
use curio_db::test_fixtures::{unique_url, TestDatabase};

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_upsert_is_idempotent_by_url() {
    let test_db = TestDatabase::new().await;
    let url = unique_url();

    let first = test_db
        .db
        .articles
        .upsert(&url, "Photosynthesis", "How plants eat light")
        .await
        .expect("first upsert");

    // Different metadata, same url: stored data wins, same id returned.
    let second = test_db
        .db
        .articles
        .upsert(&url, "Different Title", "Different summary")
        .await
        .expect("second upsert");

    assert_eq!(first, second);

    let article = test_db
        .db
        .articles
        .find_by_url(&url)
        .await
        .expect("find_by_url")
        .expect("article should exist");
    assert_eq!(article.title, "Photosynthesis");
    assert_eq!(article.summary, "How plants eat light");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article WHERE url = $1")
        .bind(&url)
        .fetch_one(&test_db.pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_concurrent_upserts_converge_on_one_row() {
    let test_db = TestDatabase::new().await;
    let url = unique_url();

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = test_db.db.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            db.articles
                .upsert(&url, &format!("Title {}", i), "s")
                .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("join").expect("upsert"));
    }

    assert!(ids.windows(2).all(|w| w[0] == w[1]), "all ids identical");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article WHERE url = $1")
        .bind(&url)
        .fetch_one(&test_db.pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with a reachable Postgres
async fn test_find_by_url_missing_returns_none() {
    let test_db = TestDatabase::new().await;
    let found = test_db
        .db
        .articles
        .find_by_url(&unique_url())
        .await
        .expect("find_by_url");
    assert!(found.is_none());
}
