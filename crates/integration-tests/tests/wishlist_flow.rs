//! Integration tests for the wishlist toggle.

use reqwest::StatusCode;

use shophub_integration_tests::spawn_app_with_mock_catalog;

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let app = spawn_app_with_mock_catalog().await;

    let resp = app
        .client
        .post(app.url("/product/1/wishlist"))
        .send()
        .await
        .expect("Failed to toggle wishlist");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("HX-Trigger").map(|v| v.as_bytes()),
        Some(b"wishlist-updated".as_slice())
    );
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("In Wishlist"));

    let resp = app
        .client
        .post(app.url("/product/1/wishlist"))
        .send()
        .await
        .expect("Failed to toggle wishlist");
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Add to Wishlist"));
}

#[tokio::test]
async fn test_detail_page_reflects_wishlist_state() {
    let app = spawn_app_with_mock_catalog().await;

    app.client
        .post(app.url("/product/1/wishlist"))
        .send()
        .await
        .expect("Failed to toggle wishlist");

    let body = app
        .client
        .get(app.url("/product/1/details"))
        .send()
        .await
        .expect("Failed to get product detail")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.contains("In Wishlist"));

    // The other product is unaffected.
    let body = app
        .client
        .get(app.url("/product/2/details"))
        .send()
        .await
        .expect("Failed to get product detail")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Add to Wishlist"));
}

#[tokio::test]
async fn test_toggle_unknown_product_is_not_found() {
    let app = spawn_app_with_mock_catalog().await;

    let resp = app
        .client
        .post(app.url("/product/999/wishlist"))
        .send()
        .await
        .expect("Failed to post toggle");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
