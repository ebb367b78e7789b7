//! Configuration module for the adapter
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to the defaults
//! for the live site.
//!
//! # Example
//!
//! ```no_run
//! use asura_adapter::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("adapter.toml")).unwrap();
//! println!("Scraping {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserSettings, Config, HttpConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
