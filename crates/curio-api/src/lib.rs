//! # curio-api
//!
//! HTTP API layer for curio: axum router, auth extractors, handlers, and
//! the `Library` orchestration service. The binary entrypoint lives in
//! `main.rs`; this library surface exists so integration tests can drive
//! the service layer directly.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use services::Library;
pub use state::AppState;
