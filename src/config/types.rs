use crate::site;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the adapter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Where the site lives
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL every relative link is resolved against (no trailing slash)
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Browser automation configuration for rendered pages
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// Run without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Maximum time for the navigation itself
    #[serde(rename = "page-load-timeout-secs", default = "default_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Maximum time to wait for the page images to appear
    #[serde(rename = "wait-timeout-secs", default = "default_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Explicit Chrome/Chromium binary; autodetected when absent
    #[serde(rename = "chrome-executable", default)]
    pub chrome_executable: Option<PathBuf>,
}

impl BrowserSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            page_load_timeout_secs: default_timeout_secs(),
            wait_timeout_secs: default_timeout_secs(),
            chrome_executable: None,
        }
    }
}

fn default_base_url() -> String {
    site::BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("asura-adapter/{}", env!("CARGO_PKG_VERSION"))
}

fn default_headless() -> bool {
    true
}
