mod common;

use actix_web::{test, web, App};
use larder::handlers;
use larder::vision::{FoodRecognizer, MockRecognizer};
use std::sync::Arc;

macro_rules! scanner_app {
    () => {{
        let recognizer: Arc<dyn FoodRecognizer> = Arc::new(MockRecognizer);
        test::init_service(
            App::new()
                .app_data(web::Data::new(common::unreachable_pool()))
                .app_data(web::Data::from(recognizer))
                .configure(handlers::scanner::configure),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_scan_single_mode_returns_fixed_item() {
    let app = scanner_app!();

    let req = test::TestRequest::post()
        .uri("/api/scan")
        .insert_header(("X-User-Id", "1"))
        .set_payload(&b"fake image bytes"[..])
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["item"]["name"], "Apple");
    assert_eq!(body["item"]["category"], "fruits");
    assert_eq!(body["item"]["freshness_score"], 8);
    assert_eq!(body["confidence"], 0.95);
}

#[actix_rt::test]
async fn test_scan_multi_mode_returns_items_and_recipes() {
    let app = scanner_app!();

    let req = test::TestRequest::post()
        .uri("/api/scan?mode=multi")
        .insert_header(("X-User-Id", "1"))
        .set_payload(&b"fake image bytes"[..])
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["items"].as_array().unwrap().len(), 4);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["name"], "Chicken Breast");
    assert_eq!(body["recipes"][1]["name"], "Chicken Fajitas");
}

#[actix_rt::test]
async fn test_scan_rejects_empty_payload() {
    let app = scanner_app!();

    let req = test::TestRequest::post()
        .uri("/api/scan")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_scan_requires_owner_header() {
    let app = scanner_app!();

    let req = test::TestRequest::post()
        .uri("/api/scan")
        .set_payload(&b"fake image bytes"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_unknown_scan_mode_is_rejected() {
    let app = scanner_app!();

    let req = test::TestRequest::post()
        .uri("/api/scan?mode=panorama")
        .insert_header(("X-User-Id", "1"))
        .set_payload(&b"fake image bytes"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
