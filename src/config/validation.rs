use crate::config::types::{BrowserSettings, Config, HttpConfig, SiteConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_browser_config(&config.browser)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    validate_timeout("timeout-secs", config.timeout_secs)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserSettings) -> ConfigResult<()> {
    validate_timeout("page-load-timeout-secs", config.page_load_timeout_secs)?;
    validate_timeout("wait-timeout-secs", config.wait_timeout_secs)?;

    if let Some(path) = &config.chrome_executable {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-executable cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_timeout(name: &str, secs: u64) -> ConfigResult<()> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(())
}
