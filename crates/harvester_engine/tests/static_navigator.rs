mod common;

use std::time::Duration;

use common::{article, catalog, init_logging, unwanted_article};
use harvester_core::RunEnd;
use harvester_engine::{
    AutoConfirm, HarvestSettings, Harvester, NavError, Navigator, Pacing, RecordWriter,
    StaticNavigator,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

fn navigator() -> StaticNavigator {
    StaticNavigator::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn queries_run_against_the_loaded_document() {
    init_logging();
    let server = MockServer::start().await;
    serve(&server, "/pages/one", article("hello")).await;
    let url = format!("{}/pages/one", server.uri());

    let mut nav = navigator();
    nav.navigate(&url).await.unwrap();

    assert_eq!(nav.current_url().await.unwrap().as_str(), url);
    let blocks = nav.find_elements("#content_block").await.unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(nav.find_element(".missing").await.unwrap().is_none());
}

#[tokio::test]
async fn http_errors_are_reported_with_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut nav = navigator();
    let err = nav
        .navigate(&format!("{}/gone", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Http { status: 404, .. }), "{err}");
    assert_eq!(nav.find_elements("p").await.unwrap_err(), NavError::NoPage);
}

#[tokio::test]
async fn slow_responses_time_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let mut nav = StaticNavigator::new(Duration::from_millis(50)).unwrap();
    let err = nav
        .navigate(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Timeout { .. }), "{err}");
}

#[tokio::test]
async fn invalid_urls_are_rejected_before_any_request() {
    let mut nav = navigator();
    let err = nav.navigate("not a url").await.unwrap_err();
    assert!(matches!(err, NavError::InvalidUrl { .. }), "{err}");
}

#[tokio::test]
async fn harvests_a_server_rendered_site() {
    init_logging();
    let server = MockServer::start().await;
    serve(
        &server,
        "/pages/",
        catalog(&[
            ("/pages/install", "Install"),
            ("/pages/moved", "Moved"),
            ("/pages/usage", "Usage"),
        ]),
    )
    .await;
    serve(&server, "/pages/install", article("install steps")).await;
    serve(&server, "/pages/moved", unwanted_article()).await;
    serve(&server, "/pages/usage", article("usage notes")).await;

    let temp = TempDir::new().unwrap();
    let settings = HarvestSettings {
        catalog_url: format!("{}/pages/", server.uri()),
        pacing: Pacing::none(),
        ..HarvestSettings::default()
    };
    let mut nav = navigator();
    let writer = RecordWriter::create(temp.path()).unwrap();

    let summary = Harvester::new(&mut nav, &mut AutoConfirm, writer, settings)
        .run()
        .await
        .unwrap();
    nav.shutdown().await.unwrap();

    assert_eq!(summary.end, Some(RunEnd::Completed));
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert!(temp.path().join("Install--0.json").is_file());
    assert!(temp.path().join("Usage--2.json").is_file());
    assert!(!temp.path().join("Moved--1.json").exists());
}
