//! # curio-wiki
//!
//! Search/Summary Provider client for curio, backed by the MediaWiki
//! action API.
//!
//! # Example
//!
//! ```rust,no_run
//! use curio_wiki::WikiClient;
//! use curio_core::SearchProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = WikiClient::from_env();
//!     let hits = client.search("Artificial Intelligence").await.unwrap();
//!     for hit in hits {
//!         println!("{} — {}", hit.title, hit.url);
//!     }
//! }
//! ```

pub mod client;

// Re-export core types
pub use curio_core::*;

pub use client::{truncate_summary, WikiClient, DEFAULT_WIKI_URL};
