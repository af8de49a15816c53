//! Shared error types for widget fetching.

use thiserror::Error;

/// Why a single widget fetch failed.
///
/// A `FetchError` never aborts a page build: the orchestrator records its
/// message in the widget's result slot and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The upstream answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The upstream payload could not be understood.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The widget's own configuration cannot be fetched as written.
    #[error("Invalid widget configuration: {0}")]
    InvalidConfig(String),

    /// A container sits deeper in the layout than the configured limit.
    #[error("Container nesting exceeds maximum depth of {max_depth}")]
    NestingTooDeep {
        /// The configured maximum depth.
        max_depth: usize,
    },

    /// The fetcher panicked instead of returning.
    #[error("Widget fetcher panicked: {0}")]
    Panicked(String),

    /// Any other fetcher-specific failure.
    #[error("{0}")]
    Other(String),
}

/// A widget type identifier was empty or whitespace-only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Widget type must be a non-empty string")]
pub struct EmptyWidgetType;
