//! # curio-inference
//!
//! Tag Generation Provider abstraction for curio.
//!
//! This crate provides:
//! - The Gemini `generateContent` backend (default, feature `gemini`)
//! - Prompt construction for subject-tag suggestions
//! - A mock generator for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `gemini` (default): Enable the Gemini backend
//! - `mock`: Expose [`mock::MockTagGenerator`] to downstream test code
//!
//! # Example
//!
//! ```rust,no_run
//! use curio_inference::GeminiBackend;
//! use curio_core::TagGenerator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let raw = backend
//!         .generate_tags("Genetics is the study of genes.", "https://en.wikipedia.org/?curid=12266")
//!         .await
//!         .unwrap();
//!     println!("suggested: {}", raw);
//! }
//! ```

pub mod prompt;

#[cfg(feature = "gemini")]
pub mod gemini;

// Mock generator for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use curio_core::*;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, DEFAULT_GEMINI_URL, DEFAULT_GEN_MODEL};

pub use prompt::{tag_prompt, TAG_SYSTEM_PROMPT};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTagGenerator;
