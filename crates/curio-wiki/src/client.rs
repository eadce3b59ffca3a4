//! MediaWiki action API client.
//!
//! Search runs `list=search` for the query, then fetches the intro extract
//! for each hit (`prop=extracts&exintro`). Extracts arrive as HTML; they
//! are stripped to plain text and ellipsis-truncated before leaving this
//! crate. Provider ranking is preserved, no pagination.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use curio_core::defaults::{SEARCH_TIMEOUT_SECS, SUMMARY_MAX_CHARS, WIKI_API_URL};
use curio_core::{ArticleCandidate, Error, Result, SearchProvider};

/// Default MediaWiki endpoint.
pub const DEFAULT_WIKI_URL: &str = WIKI_API_URL;

/// MediaWiki search/summary client.
pub struct WikiClient {
    client: Client,
    api_url: String,
    timeout_secs: u64,
    tag_pattern: Regex,
}

impl WikiClient {
    /// Create a new client against the default endpoint.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_WIKI_URL.to_string())
    }

    /// Create a new client against a custom endpoint.
    pub fn with_config(api_url: String) -> Self {
        let timeout_secs = std::env::var("CURIO_SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(SEARCH_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url,
            timeout_secs,
            tag_pattern: Regex::new(r"<[^>]+>").expect("valid tag pattern"),
        }
    }

    /// Create from environment variables (`WIKI_API_URL` override).
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("WIKI_API_URL").unwrap_or_else(|_| DEFAULT_WIKI_URL.to_string());
        Self::with_config(api_url)
    }

    /// The canonical article url for a MediaWiki page id.
    pub fn page_url(&self, page_id: u64) -> String {
        // curid urls stay stable across title renames, so they double as
        // the dedup key in the article directory.
        format!("https://en.wikipedia.org/?curid={}", page_id)
    }

    /// Strip HTML markup from an extract and collapse surrounding space.
    fn strip_html(&self, html: &str) -> String {
        let text = self.tag_pattern.replace_all(html, "");
        text.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&nbsp;", " ")
            .trim()
            .to_string()
    }

    /// Fetch the intro extract for a page, stripped and truncated.
    ///
    /// Missing or malformed extracts degrade to a placeholder rather than
    /// failing the whole search.
    async fn fetch_summary(&self, page_id: u64) -> Result<String> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "true"),
                ("pageids", &page_id.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Search(format!("Summary request failed: {}", e)))?;

        if !response.status().is_success() {
            return Ok("Summary not available.".to_string());
        }

        let result: ExtractResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse summary response: {}", e)))?;

        let summary = result
            .query
            .pages
            .into_values()
            .next()
            .and_then(|page| page.extract)
            .map(|raw| truncate_summary(&self.strip_html(&raw), SUMMARY_MAX_CHARS))
            .unwrap_or_else(|| "Summary not available.".to_string());

        Ok(summary)
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to `length` characters with an ellipsis, on a char boundary.
pub fn truncate_summary(text: &str, length: usize) -> String {
    let clean = text.trim();
    if clean.chars().count() > length {
        let truncated: String = clean.chars().take(length).collect();
        truncated + "..."
    } else {
        clean.to_string()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
    pageid: u64,
}

#[derive(Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Deserialize)]
struct ExtractQuery {
    pages: HashMap<String, ExtractPage>,
}

#[derive(Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}

#[async_trait]
impl SearchProvider for WikiClient {
    async fn search(&self, query: &str) -> Result<Vec<ArticleCandidate>> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
            ])
            .send()
            .await
            .map_err(|e| Error::Search(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Search(format!(
                "Search provider returned {}",
                status
            )));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse search response: {}", e)))?;

        let mut candidates = Vec::with_capacity(result.query.search.len());
        for hit in result.query.search {
            let summary = self.fetch_summary(hit.pageid).await?;
            candidates.push(ArticleCandidate {
                title: hit.title,
                url: self.page_url(hit.pageid),
                summary,
            });
        }

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            subsystem = "wiki",
            component = "client",
            op = "search",
            result_count = candidates.len(),
            duration_ms = elapsed,
            "Search complete"
        );
        if elapsed > self.timeout_secs * 1000 / 2 {
            warn!(
                subsystem = "wiki",
                duration_ms = elapsed,
                slow = true,
                "Slow search operation"
            );
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_summary_short_text_unchanged() {
        assert_eq!(truncate_summary("short", 250), "short");
    }

    #[test]
    fn test_truncate_summary_adds_ellipsis() {
        let long = "a".repeat(300);
        let truncated = truncate_summary(&long, 250);
        assert_eq!(truncated.chars().count(), 253);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_summary_trims_before_measuring() {
        assert_eq!(truncate_summary("  padded  ", 250), "padded");
    }

    #[test]
    fn test_truncate_summary_multibyte_boundary() {
        let text = "é".repeat(300);
        let truncated = truncate_summary(&text, 250);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 253);
    }

    #[test]
    fn test_strip_html_removes_tags() {
        let client = WikiClient::with_config("http://localhost".to_string());
        assert_eq!(
            client.strip_html("<p><b>Biology</b> is the study of life.</p>"),
            "Biology is the study of life."
        );
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        let client = WikiClient::with_config("http://localhost".to_string());
        assert_eq!(client.strip_html("R&amp;D &quot;lab&quot;"), "R&D \"lab\"");
    }

    #[test]
    fn test_page_url_shape() {
        let client = WikiClient::with_config("http://localhost".to_string());
        assert_eq!(client.page_url(42), "https://en.wikipedia.org/?curid=42");
    }
}
