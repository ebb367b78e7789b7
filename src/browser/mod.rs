//! Rendered-page fetching
//!
//! Chapter pages are assembled client-side, so they are loaded in a real
//! browser. A browser session is an explicit resource: [`PageRenderer::acquire`]
//! hands one out, [`RenderSession::render`] uses it, and
//! [`RenderSession::release`] tears it down. [`render_scoped`] ties the three
//! together and releases the session whether or not rendering succeeded.
//!
//! # Example
//!
//! ```no_run
//! use asura_adapter::browser::{render_scoped, ChromiumRenderer, RenderRequest, WaitFor};
//! use asura_adapter::config::BrowserSettings;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let renderer = ChromiumRenderer::new(BrowserSettings::default());
//! let request = RenderRequest {
//!     url: "https://asuracomic.net/series/some-series/chapter/1",
//!     wait_for: WaitFor::attribute_contains("img", "alt", "chapter page"),
//!     page_load_timeout: Duration::from_secs(10),
//!     wait_timeout: Duration::from_secs(10),
//! };
//! let html = render_scoped(&renderer, &request).await?;
//! println!("Rendered {} bytes", html.len());
//! # Ok(())
//! # }
//! ```

mod chromium;

pub use chromium::ChromiumRenderer;

use crate::BrowserResult;
use async_trait::async_trait;
use std::time::Duration;

/// Element whose presence marks a page as ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitFor {
    /// `<tag>` elements whose `attribute` contains `value`
    AttributeContains {
        tag: String,
        attribute: String,
        value: String,
    },
}

impl WaitFor {
    pub fn attribute_contains(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        WaitFor::AttributeContains {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// The condition as a CSS selector
    pub fn css(&self) -> String {
        match self {
            WaitFor::AttributeContains {
                tag,
                attribute,
                value,
            } => format!("{}[{}*=\"{}\"]", tag, attribute, value.replace('"', "\\\"")),
        }
    }
}

/// What to load and when to consider it loaded
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub url: &'a str,
    pub wait_for: WaitFor,
    /// Bound on the navigation itself
    pub page_load_timeout: Duration,
    /// Bound on waiting for `wait_for` once navigation finished
    pub wait_timeout: Duration,
}

/// Hands out browser sessions
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn acquire(&self) -> BrowserResult<Box<dyn RenderSession>>;
}

/// A live browser session
#[async_trait]
pub trait RenderSession: Send {
    /// Loads the page, waits for the ready condition, returns the DOM markup
    async fn render(&mut self, request: &RenderRequest<'_>) -> BrowserResult<String>;

    /// Closes the session; it cannot be used afterwards
    async fn release(self: Box<Self>) -> BrowserResult<()>;
}

/// Acquires a session, renders one page and releases the session
///
/// The session is released on every path once it was acquired. A failure to
/// release is logged and does not mask the render result.
pub async fn render_scoped(
    renderer: &dyn PageRenderer,
    request: &RenderRequest<'_>,
) -> BrowserResult<String> {
    let mut session = renderer.acquire().await?;
    tracing::debug!(url = request.url, "Browser session acquired");

    let rendered = session.render(request).await;

    match session.release().await {
        Ok(()) => tracing::debug!(url = request.url, "Browser session released"),
        Err(e) => tracing::warn!(url = request.url, "Failed to release browser session: {}", e),
    }

    rendered
}
