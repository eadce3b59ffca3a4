//! Cross-cutting services composing repositories with provider backends.

pub mod library;

pub use library::Library;
