use crate::support::{test_config, FakeRenderer, RenderOutcome, CHAPTER_PAGE};
use asura_adapter::{AdapterError, AsuraAdapter, BrowserError, RequestContext};
use std::sync::atomic::Ordering;
use wiremock::MockServer;

const CHAPTER_URL: &str = "https://asuracomic.net/series/solo-leveling-ragnarok-5c2f0a1e/chapter/1";

async fn adapter_with(renderer: FakeRenderer) -> AsuraAdapter {
    let server = MockServer::start().await;
    AsuraAdapter::with_renderer(&test_config(&server), Box::new(renderer)).unwrap()
}

#[tokio::test]
async fn test_get_pages_rendered_chapter() {
    let renderer = FakeRenderer::new(RenderOutcome::Markup(CHAPTER_PAGE.to_string()));
    let log = renderer.log.clone();
    let adapter = adapter_with(renderer).await;

    let pages = adapter
        .get_pages(&RequestContext::with_url(CHAPTER_URL))
        .await;

    let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://gg.asuracomic.net/storage/media/1/01.webp",
            "https://gg.asuracomic.net/storage/media/1/02.webp",
            "https://gg.asuracomic.net/storage/media/1/03.webp",
        ]
    );

    let requests = log.requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![(
            CHAPTER_URL.to_string(),
            r#"img[alt*="chapter page"]"#.to_string()
        )]
    );
    assert_eq!(log.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(log.released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_pages_wait_timeout_releases_session() {
    let renderer = FakeRenderer::new(RenderOutcome::Fail);
    let log = renderer.log.clone();
    let adapter = adapter_with(renderer).await;
    let context = RequestContext::with_url(CHAPTER_URL);

    assert!(adapter.get_pages(&context).await.is_empty());
    assert!(matches!(
        adapter.try_get_pages(&context).await,
        Err(AdapterError::Browser(BrowserError::Timeout { seconds: 1, .. }))
    ));

    assert_eq!(log.acquired.load(Ordering::SeqCst), 2);
    assert_eq!(log.released.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_pages_launch_failure() {
    let renderer = FakeRenderer::new(RenderOutcome::LaunchFail);
    let log = renderer.log.clone();
    let adapter = adapter_with(renderer).await;

    let pages = adapter
        .get_pages(&RequestContext::with_url(CHAPTER_URL))
        .await;

    assert!(pages.is_empty());
    assert_eq!(log.acquired.load(Ordering::SeqCst), 0);
    assert_eq!(log.released.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_get_pages_without_url_never_acquires() {
    let renderer = FakeRenderer::new(RenderOutcome::Markup(CHAPTER_PAGE.to_string()));
    let log = renderer.log.clone();
    let adapter = adapter_with(renderer).await;

    assert!(adapter.get_pages(&RequestContext::default()).await.is_empty());
    assert_eq!(log.acquired.load(Ordering::SeqCst), 0);
}
