//! # curio-core
//!
//! Shared types for the curio knowledge-curation backend.
//!
//! This crate provides:
//! - The error taxonomy and `Result` alias
//! - Domain models (users, articles, bookmarks, tag assignments)
//! - Repository and provider traits
//! - Tag normalization and provider-output parsing
//! - UUIDv7 helpers, logging field constants, centralized defaults

pub mod defaults;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod tags;
pub mod traits;

pub use error::{Error, Result};
pub use ids::new_v7;
pub use models::*;
pub use tags::{normalize_tags, parse_generated_tags, validate_tag_name};
pub use traits::{
    ArticleRepository, BookmarkRepository, SearchProvider, TagAssignmentRepository, TagGenerator,
    UserRepository,
};
