//! HTTP fetching
//!
//! One GET per call, bounded by the configured timeout. There is no retry: a
//! timeout, connection failure or non-2xx status ends the call.

use crate::config::HttpConfig;
use crate::AdapterError;
use reqwest::Client;

/// Builds an HTTP client with the configured user agent and timeout
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use asura_adapter::config::HttpConfig;
/// use asura_adapter::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
///
/// `query` pairs are URL-encoded onto the request.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `AdapterError::Timeout` |
/// | Non-2xx status | `AdapterError::HttpStatus` |
/// | Connection/DNS/TLS failure, unreadable body | `AdapterError::Http` |
pub async fn fetch_html(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, AdapterError> {
    let mut request = client.get(url);
    if !query.is_empty() {
        request = request.query(query);
    }

    let response = request.send().await.map_err(|e| classify_error(url, e))?;

    let status = response.status();
    tracing::debug!(url, status = status.as_u16(), "Fetched");

    if !status.is_success() {
        return Err(AdapterError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &str, error: reqwest::Error) -> AdapterError {
    if error.is_timeout() {
        AdapterError::Timeout {
            url: url.to_string(),
        }
    } else {
        AdapterError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
