use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio::sync::Semaphore;
use tower::ServiceExt;

use ekho_render::Branding;
use ekho_server::state::AppState;

fn test_state() -> AppState {
    AppState {
        branding: Arc::new(Branding::default()),
        default_theme: "classic".to_string(),
        render_timeout: Duration::from_secs(5),
        render_slots: Arc::new(Semaphore::new(1)),
    }
}

fn post_render(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/render")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = ekho_server::router(test_state());
    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn missing_data_field_is_rejected_with_400() {
    let app = ekho_server::router(test_state());
    let res = app.oneshot(post_render("{}")).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"], "invalid report payload");
    assert!(v["details"].as_str().unwrap().contains("no data field"));
}

#[tokio::test]
async fn non_object_data_is_rejected_with_400() {
    let app = ekho_server::router(test_state());
    let res = app
        .oneshot(post_render(r#"{ "data": [1, 2, 3] }"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_theme_is_rejected_with_400() {
    let app = ekho_server::router(test_state());
    let res = app
        .oneshot(post_render(
            r#"{ "data": { "site": "example.com" }, "theme": "vaporwave" }"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(v["error"].as_str().unwrap().contains("unknown theme"));
}
