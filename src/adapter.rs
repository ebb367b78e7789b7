//! Adapter façade
//!
//! Each operation comes in two forms. The `try_*` methods fetch, parse and
//! extract, and report failures as [`AdapterError`]. The plain methods wrap
//! them for callers that only want records: a failure is logged and turned
//! into an empty result, so "nothing found" and "something broke" look the same
//! from the outside.

use crate::browser::{render_scoped, ChromiumRenderer, PageRenderer, RenderRequest, WaitFor};
use crate::config::{load_config, BrowserSettings, Config};
use crate::extract::{parse_chapters, parse_manga, parse_pages, parse_search_results, search_term};
use crate::fetch::{build_http_client, fetch_html};
use crate::models::{ChapterRecord, MangaRecord, PageRecord, RequestContext, SearchResultRecord};
use crate::site::{self, PAGE_IMAGE_ALT_MARKER, SEARCH_PARAM, SEARCH_PATH};
use crate::{AdapterError, Result};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, error, info};

/// Content adapter for Asura Scans
pub struct AsuraAdapter {
    client: Client,
    base_url: String,
    browser: BrowserSettings,
    renderer: Box<dyn PageRenderer>,
}

impl AsuraAdapter {
    /// Creates an adapter that renders chapter pages in Chrome/Chromium
    pub fn new(config: &Config) -> Result<Self> {
        let renderer = ChromiumRenderer::new(config.browser.clone());
        Self::with_renderer(config, Box::new(renderer))
    }

    /// Loads a TOML config file and creates an adapter from it
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = load_config(path)?;
        info!(base_url = %config.site.base_url, "Configuration loaded from {}", path.display());
        Self::new(&config)
    }

    /// Creates an adapter that renders chapter pages with `renderer`
    pub fn with_renderer(config: &Config, renderer: Box<dyn PageRenderer>) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        Ok(Self {
            client,
            base_url: config.site.base_url.trim_end_matches('/').to_string(),
            browser: config.browser.clone(),
            renderer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Languages the site publishes in
    pub fn languages(&self) -> &'static [&'static str] {
        site::LANGUAGES
    }

    /// Searches the site for series matching `query`
    ///
    /// `language` is accepted for interface compatibility and ignored: the
    /// site only publishes in English.
    pub async fn search(&self, query: &str, language: Option<&str>) -> Vec<SearchResultRecord> {
        match self.try_search(query, language).await {
            Ok(results) => results,
            Err(e) => {
                error!("Error while searching manga - {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_search(
        &self,
        query: &str,
        language: Option<&str>,
    ) -> Result<Vec<SearchResultRecord>> {
        if let Some(language) = language.filter(|l| !site::supports_language(l)) {
            debug!(language, "Ignoring unsupported language filter");
        }

        let term = search_term(query);
        debug!(query, term = %term, "Searching");

        let url = format!("{}/{}", self.base_url, SEARCH_PATH);
        let body = fetch_html(&self.client, &url, &[(SEARCH_PARAM, term.as_str())]).await?;

        let results = parse_search_results(&body, &self.base_url);
        info!(term = %term, count = results.len(), "Search complete");
        Ok(results)
    }

    /// Fetches the details of the series at `context.url`
    pub async fn get_manga(&self, context: &RequestContext) -> Option<MangaRecord> {
        match self.try_get_manga(context).await {
            Ok(manga) => Some(manga),
            Err(e) => {
                error!("Error while getting manga - {}", e);
                None
            }
        }
    }

    pub async fn try_get_manga(&self, context: &RequestContext) -> Result<MangaRecord> {
        let url = context_url(context)?;
        let body = fetch_html(&self.client, url, &[]).await?;

        let manga = parse_manga(&body, url).map_err(|source| AdapterError::Extract {
            url: url.to_string(),
            source,
        })?;
        info!(url, tags = manga.tags.len(), complete = manga.complete, "Manga extracted");
        Ok(manga)
    }

    /// Lists the chapters of the series at `context.url`, oldest first
    pub async fn get_chapters(&self, context: &RequestContext) -> Vec<ChapterRecord> {
        match self.try_get_chapters(context).await {
            Ok(chapters) => chapters,
            Err(e) => {
                error!("Error while getting chapters - {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_get_chapters(&self, context: &RequestContext) -> Result<Vec<ChapterRecord>> {
        let url = context_url(context)?;
        let body = fetch_html(&self.client, url, &[]).await?;

        let chapters =
            parse_chapters(&body, url, context).map_err(|source| AdapterError::Extract {
                url: url.to_string(),
                source,
            })?;
        info!(url, count = chapters.len(), "Chapters extracted");
        Ok(chapters)
    }

    /// Lists the page images of the chapter at `context.url`
    pub async fn get_pages(&self, context: &RequestContext) -> Vec<PageRecord> {
        match self.try_get_pages(context).await {
            Ok(pages) => pages,
            Err(e) => {
                error!("Error while getting pages - {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_get_pages(&self, context: &RequestContext) -> Result<Vec<PageRecord>> {
        let url = context_url(context)?;
        let request = RenderRequest {
            url,
            wait_for: WaitFor::attribute_contains("img", "alt", PAGE_IMAGE_ALT_MARKER),
            page_load_timeout: self.browser.page_load_timeout(),
            wait_timeout: self.browser.wait_timeout(),
        };

        let markup = render_scoped(self.renderer.as_ref(), &request).await?;

        let pages = parse_pages(&markup);
        info!(url, count = pages.len(), "Pages extracted");
        Ok(pages)
    }
}

fn context_url(context: &RequestContext) -> Result<&str> {
    context.url.as_deref().ok_or(AdapterError::MissingUrl)
}
