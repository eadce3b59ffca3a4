//! Wire-level tests for the MediaWiki client against a mock server.

use curio_core::SearchProvider;
use curio_wiki::WikiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_body() -> serde_json::Value {
    serde_json::json!({
        "query": {
            "search": [
                { "title": "Genetics", "pageid": 12266 },
                { "title": "Molecular biology", "pageid": 19702 }
            ]
        }
    })
}

fn extract_body(page_id: u64, extract: &str) -> serde_json::Value {
    let mut pages = serde_json::Map::new();
    pages.insert(
        page_id.to_string(),
        serde_json::json!({ "pageid": page_id, "extract": extract }),
    );
    serde_json::json!({ "query": { "pages": pages } })
}

#[tokio::test]
async fn test_search_returns_candidates_with_summaries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "genetics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts"))
        .and(query_param("pageids", "12266"))
        .respond_with(ResponseTemplate::new(200).set_body_json(extract_body(
            12266,
            "<p><b>Genetics</b> is the study of genes.</p>",
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts"))
        .and(query_param("pageids", "19702"))
        .respond_with(ResponseTemplate::new(200).set_body_json(extract_body(
            19702,
            "<p>Molecular biology is a branch of biology.</p>",
        )))
        .mount(&mock_server)
        .await;

    let client = WikiClient::with_config(format!("{}/w/api.php", mock_server.uri()));
    let hits = client.search("genetics").await.expect("search");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Genetics");
    assert_eq!(hits[0].url, "https://en.wikipedia.org/?curid=12266");
    assert_eq!(hits[0].summary, "Genetics is the study of genes.");
    assert_eq!(hits[1].summary, "Molecular biology is a branch of biology.");
}

#[tokio::test]
async fn test_search_truncates_long_extracts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "search": [ { "title": "Long", "pageid": 7 } ] }
        })))
        .mount(&mock_server)
        .await;

    let long_extract = "x".repeat(600);
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(extract_body(7, &long_extract)),
        )
        .mount(&mock_server)
        .await;

    let client = WikiClient::with_config(format!("{}/w/api.php", mock_server.uri()));
    let hits = client.search("anything").await.expect("search");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].summary.chars().count(), 253);
    assert!(hits[0].summary.ends_with("..."));
}

#[tokio::test]
async fn test_search_provider_error_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = WikiClient::with_config(format!("{}/w/api.php", mock_server.uri()));
    let result = client.search("genetics").await;

    match result {
        Err(curio_core::Error::Search(msg)) => assert!(msg.contains("503")),
        other => panic!("expected Search error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_extract_degrades_to_placeholder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "search": [ { "title": "Stub", "pageid": 9 } ] }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", "extracts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "9": { "pageid": 9 } } }
        })))
        .mount(&mock_server)
        .await;

    let client = WikiClient::with_config(format!("{}/w/api.php", mock_server.uri()));
    let hits = client.search("stub").await.expect("search");

    assert_eq!(hits[0].summary, "Summary not available.");
}
