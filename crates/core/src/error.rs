//! Error types for the agentwiki domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all agentwiki operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model errors ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Retriever errors ---
    #[error("Retriever error: {0}")]
    Retriever(#[from] RetrieverError),

    // --- Output parsing errors ---
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // --- Tag extraction errors ---
    #[error("Tag extraction failed for <{tag}>: {source}")]
    TagExtraction {
        tag: String,
        #[source]
        source: TagError,
    },

    // --- Loop bound ---
    #[error("Agent loop exceeded {iterations} iterations without a final answer")]
    LoopExceeded { iterations: u32 },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by model provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum RetrieverError {
    #[error("Search request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors from classifying a model completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The completion contained more than one search-query tag. The model
    /// violated the single-query-per-turn contract; the request is aborted
    /// without retry.
    #[error("malformed model output: expected at most one <search_query> tag, found {found}")]
    MalformedOutput { found: usize },
}

/// Outcomes of extracting the content of a single expected tag.
///
/// Zero and duplicate occurrences are both explicit, loud results — callers
/// decide which (if either) is acceptable in their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag not found")]
    NotFound,

    #[error("tag occurs more than once")]
    Duplicate,
}
