//! Centralized default constants for the curio system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers. When adding new constants, place them in the appropriate
//! section and document the rationale for the chosen value.

// =============================================================================
// SEARCH / SUMMARY PROVIDER
// =============================================================================

/// MediaWiki action API endpoint for the English Wikipedia.
pub const WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Maximum characters kept from an article summary before ellipsis
/// truncation. Matches the search-result card width in the reference UI.
pub const SUMMARY_MAX_CHARS: usize = 250;

/// Timeout for search/summary provider requests (seconds).
pub const SEARCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// TAG GENERATION PROVIDER
// =============================================================================

/// Gemini REST API base url.
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default tag-generation model.
pub const GEN_MODEL: &str = "gemini-2.0-flash";

/// Timeout for tag-generation requests (seconds). Generation is a single
/// short completion; anything beyond this is treated as provider failure.
pub const GEN_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// AUTH
// =============================================================================

/// Bearer token lifetime in minutes.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Prefix for issued bearer tokens.
pub const TOKEN_PREFIX: &str = "ck_";

/// Length of the random secret portion of a bearer token.
pub const TOKEN_SECRET_LEN: usize = 48;

// =============================================================================
// TAGS
// =============================================================================

/// Maximum length of a single tag name.
pub const TAG_MAX_LEN: usize = 100;
