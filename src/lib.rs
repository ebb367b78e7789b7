//! Asura Adapter: a content adapter for the Asura Scans manga site
//!
//! This crate scrapes search results, series details, chapter lists and page
//! images from one site's markup and turns them into flat records.

pub mod adapter;
pub mod browser;
pub mod config;
pub mod dom;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod site;

use thiserror::Error;

/// Main error type for adapter operations
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("There is no URL in arguments")]
    MissingUrl,

    #[error("Extraction error for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the extraction rules when the markup is not shaped as expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("Text {text:?} does not match the {field} pattern")]
    PatternMismatch { field: &'static str, text: String },
}

/// Browser automation errors
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timeout after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    #[error("Failed to read rendered page: {0}")]
    Render(String),

    #[error("Failed to close browser: {0}")]
    Close(String),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction rules
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for browser operations
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

// Re-export commonly used types
pub use adapter::AsuraAdapter;
pub use config::Config;
pub use models::{ChapterRecord, MangaRecord, PageRecord, RequestContext, SearchResultRecord, Status};
