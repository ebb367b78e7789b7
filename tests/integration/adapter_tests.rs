use crate::support::{
    http_adapter, series_url, test_config, SEARCH_PAGE, SERIES_PAGE, SERIES_SLUG,
};
use asura_adapter::ConfigError;
use asura_adapter::site::NO_THUMBNAIL_URL;
use asura_adapter::{AdapterError, AsuraAdapter, RequestContext};
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_saved_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/series"))
        .and(query_param("name", "solo leveling ragnarok"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = http_adapter(&server);
    let results = adapter.search("Solo-Leveling: Ragnarok (2024)", None).await;

    // Three series anchors, one without a name node
    assert_eq!(results.len(), 2);

    assert_eq!(
        results[0].url,
        format!("{}/series/solo-leveling-ragnarok-5c2f0a1e", server.uri())
    );
    assert_eq!(results[0].name, "Solo Leveling: Ragnarok");
    assert_eq!(
        results[0].cover,
        "https://gg.asuracomic.net/storage/media/1/ragnarok.webp"
    );

    assert_eq!(results[1].name, "Omniscient Reader's Viewpoint");
    assert_eq!(results[1].cover, NO_THUMBNAIL_URL);
}

#[tokio::test]
async fn test_search_ignores_language() {
    let server = MockServer::start().await;
    serve(&server, "/series", SEARCH_PAGE).await;

    let adapter = http_adapter(&server);
    let results = adapter.search("solo", Some("fr")).await;

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_search_server_error_gives_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let adapter = http_adapter(&server);
    assert!(adapter.search("solo", None).await.is_empty());
    assert!(matches!(
        adapter.try_search("solo", None).await,
        Err(AdapterError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_get_manga_saved_page() {
    let server = MockServer::start().await;
    serve(&server, &format!("/series/{}", SERIES_SLUG), SERIES_PAGE).await;

    let adapter = http_adapter(&server);
    let url = series_url(&server);
    let manga = adapter
        .get_manga(&RequestContext::with_url(url.clone()))
        .await
        .expect("manga record");

    assert_eq!(manga.name.as_deref(), Some("Solo Leveling: Ragnarok"));
    assert_eq!(
        manga.description,
        "The hunter saga continues, as Sung Jinwoo's son awakens."
    );
    assert_eq!(manga.tags, vec!["Action", "Adventure", "Fantasy"]);
    assert!(!manga.complete);
    assert_eq!(manga.url, url);
}

#[tokio::test]
async fn test_get_manga_completed_series() {
    let server = MockServer::start().await;
    let page = SERIES_PAGE.replace(
        r#"<h3 class="text-sm capitalize">Ongoing</h3>"#,
        r#"<h3 class="text-sm capitalize">Completed</h3>"#,
    );
    serve(&server, &format!("/series/{}", SERIES_SLUG), &page).await;

    let adapter = http_adapter(&server);
    let manga = adapter
        .get_manga(&RequestContext::with_url(series_url(&server)))
        .await
        .expect("manga record");

    assert!(manga.complete);
}

#[tokio::test]
async fn test_get_manga_without_status_gives_nothing() {
    let server = MockServer::start().await;
    let page = SERIES_PAGE.replace(
        r#"<h3 class="text-sm">Status</h3>"#,
        r#"<h3 class="text-sm">State</h3>"#,
    );
    serve(&server, &format!("/series/{}", SERIES_SLUG), &page).await;

    let adapter = http_adapter(&server);
    let context = RequestContext::with_url(series_url(&server));

    assert!(adapter.get_manga(&context).await.is_none());
    assert!(matches!(
        adapter.try_get_manga(&context).await,
        Err(AdapterError::Extract { .. })
    ));
}

#[tokio::test]
async fn test_missing_url_gives_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SERIES_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let adapter = http_adapter(&server);
    let context = RequestContext::default().with_argument("manga_id", json!(7));

    assert!(adapter.get_manga(&context).await.is_none());
    assert!(adapter.get_chapters(&context).await.is_empty());
    assert!(adapter.get_pages(&context).await.is_empty());
    assert!(matches!(
        adapter.try_get_chapters(&context).await,
        Err(AdapterError::MissingUrl)
    ));
}

#[tokio::test]
async fn test_get_chapters_saved_page() {
    let server = MockServer::start().await;
    serve(&server, &format!("/series/{}", SERIES_SLUG), SERIES_PAGE).await;

    let adapter = http_adapter(&server);
    let url = series_url(&server);
    let context = RequestContext::with_url(url.clone()).with_argument("manga_id", json!(42));
    let chapters = adapter.get_chapters(&context).await;

    let numbers: Vec<&str> = chapters.iter().map(|c| c.chapter_number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "1.5", "2", "3"]);

    // The mirror link is listed last on the page, so it is seen first
    assert_eq!(chapters[0].url, format!("{}/chapter/1", url));
    assert_eq!(
        chapters[0].source_url,
        format!("{}/chapter/1?ref=mirror", SERIES_SLUG)
    );
    assert_eq!(chapters[0].name, "(mirror)");

    assert_eq!(chapters[1].url, format!("{}/chapter/1.5", url));
    assert_eq!(chapters[1].name, "1.5");
    assert_eq!(chapters[3].name, "The Return");

    let jan_1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(chapters[0].release_date, Some(jan_1));
    // "garbage" date keeps the previous chapter's value
    assert_eq!(chapters[1].release_date, Some(jan_1));
    assert_eq!(
        chapters[2].release_date,
        Some(Utc.with_ymd_and_hms(2024, 2, 22, 0, 0, 0).unwrap())
    );
    assert_eq!(
        chapters[3].release_date,
        Some(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap())
    );

    for chapter in &chapters {
        assert_eq!(chapter.arguments, context);
        assert_eq!(chapter.page_count, 0);
    }
}

#[tokio::test]
async fn test_get_chapters_not_found_gives_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = http_adapter(&server);
    let chapters = adapter
        .get_chapters(&RequestContext::with_url(series_url(&server)))
        .await;

    assert!(chapters.is_empty());
}

#[tokio::test]
async fn test_adapter_from_config_file() {
    let server = MockServer::start().await;
    serve(&server, "/series", SEARCH_PAGE).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[site]\nbase-url = \"{}/\"\n\n[http]\ntimeout-secs = 2\n",
        server.uri()
    )
    .unwrap();
    file.flush().unwrap();

    let adapter = AsuraAdapter::from_config_file(file.path()).unwrap();

    assert_eq!(adapter.base_url(), server.uri());
    let results = adapter.search("solo", None).await;
    assert_eq!(results.len(), 2);
    assert!(results[0].url.starts_with(&format!("{}/series/", server.uri())));
}

#[tokio::test]
async fn test_default_config_targets_live_site() {
    let server = MockServer::start().await;
    let config = test_config(&server);
    assert_eq!(config.site.base_url, server.uri());

    let adapter = AsuraAdapter::new(&asura_adapter::Config::default()).unwrap();
    assert_eq!(adapter.base_url(), "https://asuracomic.net");
    assert_eq!(adapter.languages(), &["en"]);
}

#[tokio::test]
async fn test_adapter_from_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[site]\nbase-url = \"ftp://asuracomic.net\"\n").unwrap();
    file.flush().unwrap();

    let result = AsuraAdapter::from_config_file(file.path());
    assert!(matches!(
        result,
        Err(AdapterError::Config(ConfigError::Validation(_)))
    ));

    let missing = AsuraAdapter::from_config_file(&file.path().with_extension("missing"));
    assert!(matches!(
        missing,
        Err(AdapterError::Config(ConfigError::Io(_)))
    ));
}
