use std::sync::Arc;

use importer_core::{CatalogBody, CatalogSource, PageOutOfRange, LISTING_FAILURE};
use importer_engine::{BrowseError, CatalogBrowser, GatewaySettings, ReqwestGateway};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn browser_for(server: &MockServer) -> CatalogBrowser {
    let settings = GatewaySettings::with_base_url(&server.uri()).expect("mock server uri");
    let gateway = ReqwestGateway::new(settings).expect("client builds");
    CatalogBrowser::new(Arc::new(gateway), 20)
}

fn listing(page: u32, pages: u32, total: u64, ids: &[i64], source: &str) -> serde_json::Value {
    let images: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": format!("img-{id}.png"),
                "source": source,
                "size": 2_621_440,
                "mime_type": "image/png",
                "storage_url": format!("https://storage.example.com/{id}.png"),
                "created_at": "2024-03-05T14:30:00"
            })
        })
        .collect();
    json!({
        "images": images,
        "total": total,
        "page": page,
        "page_size": 20,
        "pages": pages
    })
}

#[tokio::test]
async fn filtered_page_renders_labels_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .and(query_param("page", "2"))
        .and(query_param("source", "dropbox"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(2, 3, 45, &[21, 22], "dropbox")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser
        .load(2, Some(CatalogSource::Dropbox))
        .await
        .expect("page loads");

    let view = browser.view();
    assert_eq!(view.body, CatalogBody::Records);
    assert_eq!(view.showing_label, "Showing 2 of 45 images");
    assert_eq!(view.page_label, "Page 2 of 3");
    assert!(view.show_pagination);
    assert!(view.previous_enabled);
    assert!(view.next_enabled);
    assert_eq!(view.filter_label, Some("Dropbox"));

    let row = &view.rows[0];
    assert_eq!(row.badge, "Dropbox");
    assert_eq!(row.size_label, "2.5 MB");
    assert_eq!(row.kind_label, "PNG");
    assert_eq!(row.created_label, "Mar 5, 2024, 02:30 PM");
}

#[tokio::test]
async fn next_page_follows_the_reported_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            1,
            2,
            25,
            &[1, 2, 3],
            "google_drive",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(2, 2, 25, &[21], "google_drive")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser.load(1, None).await.expect("first page");
    let page = browser.next_page().await.expect("second page");
    assert_eq!(page.pagination.page, 2);
    assert!(!browser.view().next_enabled);

    let err = browser.next_page().await.expect_err("past the end");
    assert_eq!(
        err,
        BrowseError::OutOfRange(PageOutOfRange {
            requested: 3,
            pages: 2,
        })
    );
}

#[tokio::test]
async fn failed_reload_keeps_previous_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(1, 1, 2, &[1, 2], "dropbox")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser.load(1, None).await.expect("first load");
    let err = browser.refresh().await.expect_err("second load fails");
    assert!(matches!(err, BrowseError::Listing(_)));

    let view = browser.view();
    assert_eq!(view.body, CatalogBody::Records);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.error_banner.as_deref(), Some(LISTING_FAILURE));
}

#[tokio::test]
async fn first_load_failure_shows_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser.load(1, None).await.expect_err("gateway down");
    assert_eq!(browser.view().body, CatalogBody::Unavailable);
}

#[tokio::test]
async fn empty_catalog_has_no_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(1, 0, 0, &[], "dropbox")))
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser
        .set_filter(Some(CatalogSource::GoogleDrive))
        .await
        .expect("empty listing");

    let view = browser.view();
    assert_eq!(view.body, CatalogBody::Empty);
    assert!(!view.show_pagination);
    assert!(!view.next_enabled);
    assert_eq!(view.showing_label, "Showing 0 of 0 images");
}

#[tokio::test]
async fn out_of_range_page_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing(1, 2, 30, &[1], "google_drive")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut browser = browser_for(&server);
    browser.load(1, None).await.expect("first page");

    for page in [0, 3, 99] {
        let err = browser.set_page(page).await.expect_err("outside range");
        assert!(matches!(err, BrowseError::OutOfRange(_)));
    }
    assert!(browser.previous_page().await.is_err());
}
