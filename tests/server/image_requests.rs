//! The "one more cat" action: Datastar, form and JSON callers.

use std::time::Duration;

use reqwest::redirect::Policy;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{
    SEARCH_PATH, assert_datastar_headers, assert_html_fragment, cat_response, mount_cat,
    open_page, spawn_app,
};

fn datastar_request(
    client: &reqwest::Client,
    app: &crate::helpers::TestApp,
    page_id: &str,
) -> reqwest::RequestBuilder {
    client
        .post(app.page_url("/image"))
        .header("datastar-request", "true")
        .json(&serde_json::json!({ "pageId": page_id, "loading": true }))
}

/// Wait for the page to enter its loading state instead of guessing how
/// long the in-flight request takes to reach the server.
async fn wait_until_loading(app: &crate::helpers::TestApp, page_id: &str) {
    let id = page_id.parse().expect("valid page id");
    let page = app.pages.get(id).expect("page exists");

    tokio::time::timeout(Duration::from_secs(5), async {
        while !page.snapshot().is_loading() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("page never entered the loading state");
}

#[tokio::test]
async fn datastar_request_replaces_frame_with_new_image() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    mount_cat(&app, "https://cdn.example/b.jpg").await;

    let response = datastar_request(&reqwest::Client::new(), &app, &page_id)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert_datastar_headers(&response, "#cat-frame");

    let body = response.text().await.expect("Failed to read body");
    assert_html_fragment(&body);
    assert!(body.contains(r#"src="https://cdn.example/b.jpg""#));
    assert!(!body.contains("https://cdn.example/a.jpg"));
    assert!(!body.contains(" disabled>"));
}

#[tokio::test]
async fn form_request_redirects_back_to_page() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    mount_cat(&app, "https://cdn.example/b.jpg").await;

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client");

    let response = client
        .post(app.page_url("/image"))
        .form(&[("page_id", page_id.as_str())])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 303);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(location, Some(format!("/pages/{page_id}")));

    let body = reqwest::get(app.page_url(&format!("/pages/{page_id}")))
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains(r#"src="https://cdn.example/b.jpg""#));
}

#[tokio::test]
async fn json_request_returns_frame_state() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    mount_cat(&app, "https://cdn.example/b.jpg").await;

    let response = reqwest::Client::new()
        .post(app.page_url("/image"))
        .json(&serde_json::json!({ "page_id": page_id }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let frame: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(frame["page_id"], page_id.as_str());
    assert_eq!(frame["image_url"], "https://cdn.example/b.jpg");
    assert_eq!(frame["loading"], false);
    assert!(frame["error"].is_null());
}

#[tokio::test]
async fn failed_fetch_keeps_previous_image_and_shows_error() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&app.mock_server)
        .await;

    let response = datastar_request(&reqwest::Client::new(), &app, &page_id)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains(r#"src="https://cdn.example/a.jpg""#));
    assert!(body.contains(r#"role="alert""#));
    assert!(body.contains("no images returned"));
    assert!(!body.contains(" disabled>"));
}

#[tokio::test]
async fn next_success_clears_previous_error() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&app.mock_server)
        .await;
    mount_cat(&app, "https://cdn.example/c.jpg").await;
    let client = reqwest::Client::new();

    let failed = datastar_request(&client, &app, &page_id)
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(failed.contains(r#"role="alert""#));

    let recovered = datastar_request(&client, &app, &page_id)
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(recovered.contains(r#"src="https://cdn.example/c.jpg""#));
    assert!(!recovered.contains(r#"role="alert""#));
}

#[tokio::test]
async fn request_while_loading_is_rejected() {
    let app = spawn_app().await;
    let page_id = open_page(&app, "https://cdn.example/a.jpg").await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(cat_response("https://cdn.example/b.jpg").set_delay(Duration::from_millis(800)))
        .mount(&app.mock_server)
        .await;
    let client = reqwest::Client::new();

    let first = tokio::spawn(datastar_request(&client, &app, &page_id).send());
    wait_until_loading(&app, &page_id).await;

    // While the first request is in flight the page renders without an image.
    let loading = client
        .get(app.page_url(&format!("/pages/{page_id}")))
        .header("datastar-request", "true")
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(!loading.contains("<img"));
    assert!(loading.contains(" disabled>"));

    let second = datastar_request(&client, &app, &page_id)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), 409);

    let first = first
        .await
        .expect("request task completes")
        .expect("Failed to execute request");
    assert_eq!(first.status(), 200);
    let body = first.text().await.expect("Failed to read body");
    assert!(body.contains(r#"src="https://cdn.example/b.jpg""#));
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let app = spawn_app().await;
    mount_cat(&app, "https://cdn.example/b.jpg").await;

    let response = datastar_request(
        &reqwest::Client::new(),
        &app,
        "00000000-0000-0000-0000-000000000000",
    )
    .send()
    .await
    .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn missing_page_id_is_bad_request() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(app.page_url("/image"))
        .json(&serde_json::json!({ "loading": true }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn malformed_page_id_is_bad_request() {
    let app = spawn_app().await;

    let response = datastar_request(&reqwest::Client::new(), &app, "not-a-page")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());
}
