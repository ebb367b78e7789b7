use super::{PageRenderer, RenderRequest, RenderSession};
use crate::config::BrowserSettings;
use crate::{BrowserError, BrowserResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Interval between checks for the ready condition
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How long a released browser gets to exit
const EXIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Renders pages in a Chrome/Chromium instance driven over CDP
///
/// Every [`acquire`](PageRenderer::acquire) launches a fresh browser process;
/// nothing is shared between sessions.
pub struct ChromiumRenderer {
    settings: BrowserSettings,
}

impl ChromiumRenderer {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> BrowserResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.settings.page_load_timeout())
            .window_size(1920, 1080)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--mute-audio");

        if !self.settings.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(BrowserError::Launch)
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn acquire(&self) -> BrowserResult<Box<dyn RenderSession>> {
        let config = self.browser_config()?;

        tracing::info!(headless = self.settings.headless, "Launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("Browser handler error: {}", e);
                }
            }
            tracing::debug!("Browser handler task completed");
        });

        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn render(&mut self, request: &RenderRequest<'_>) -> BrowserResult<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Navigation {
                url: request.url.to_string(),
                message: e.to_string(),
            })?;

        let rendered = load_and_wait(&page, request).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }

        rendered
    }

    async fn release(mut self: Box<Self>) -> BrowserResult<()> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Close(e.to_string()));

        // Without a CDP connection the process will not exit on its own
        if closed.is_err() {
            if let Some(Err(e)) = self.browser.kill().await {
                tracing::debug!("Failed to kill browser: {}", e);
            }
        }

        reap(self.browser.wait(), EXIT_TIMEOUT).await;
        self.handler_task.abort();

        closed
    }
}

/// Waits for the browser process to exit, giving up after `limit`
///
/// Returns true if the process was reaped.
async fn reap<F, T>(exit: F, limit: Duration) -> bool
where
    F: Future<Output = std::io::Result<T>>,
{
    match tokio::time::timeout(limit, exit).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::debug!("Failed to wait for browser exit: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!("Browser did not exit within {:?}", limit);
            false
        }
    }
}

async fn load_and_wait(page: &Page, request: &RenderRequest<'_>) -> BrowserResult<String> {
    tracing::debug!(url = request.url, "Navigating");
    match tokio::time::timeout(request.page_load_timeout, page.goto(request.url)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            return Err(BrowserError::Navigation {
                url: request.url.to_string(),
                message: e.to_string(),
            })
        }
        Err(_) => {
            return Err(BrowserError::Timeout {
                what: format!("page load of {}", request.url),
                seconds: request.page_load_timeout.as_secs(),
            })
        }
    }

    let selector = request.wait_for.css();
    let start = Instant::now();
    loop {
        match page.find_elements(selector.clone()).await {
            Ok(elements) if !elements.is_empty() => {
                tracing::debug!(
                    count = elements.len(),
                    "Ready after {:?}",
                    start.elapsed()
                );
                break;
            }
            _ if start.elapsed() >= request.wait_timeout => {
                return Err(BrowserError::Timeout {
                    what: selector,
                    seconds: request.wait_timeout.as_secs(),
                });
            }
            _ => tokio::time::sleep(POLL_INTERVAL).await,
        }
    }

    page.content()
        .await
        .map_err(|e| BrowserError::Render(e.to_string()))
}
