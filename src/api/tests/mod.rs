use super::*;
use crate::jobs::test_helpers::MockBehavior;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Router plus a handle on the downloader behind it
fn test_app(behavior: MockBehavior) -> (Router, Arc<VideoDownloader>, tempfile::TempDir) {
    let (downloader, temp_dir) = crate::jobs::test_helpers::create_test_downloader(behavior);
    let downloader = Arc::new(downloader);
    let config = downloader.get_config();
    let app = create_router(downloader.clone(), config);
    (app, downloader, temp_dir)
}

/// Router whose jobs succeed with "video.mp4"
fn succeeding_app() -> (Router, Arc<VideoDownloader>, tempfile::TempDir) {
    test_app(MockBehavior::Succeed {
        file_name: "video.mp4".to_string(),
    })
}

/// Block until the status snapshot turns terminal
async fn wait_terminal(downloader: &Arc<VideoDownloader>) {
    let mut rx = downloader.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !rx.borrow().phase.is_terminal() {
            rx.changed().await.expect("status channel closed");
        }
    })
    .await
    .expect("job did not reach a terminal phase in time");
}

/// Collect a response body into JSON
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (_, downloader, _temp_dir) = succeeding_app();

    // Port 0 = OS assigns a free port
    let mut config = (*downloader.get_config()).clone();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let api_handle = tokio::spawn({
        let downloader = downloader.clone();
        let config = config.clone();
        async move { start_api_server(downloader, config).await }
    });

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    api_handle.abort();

    // The test passes if we got here without panicking
}

#[tokio::test]
async fn test_cors_enabled() {
    let (app, _, _temp_dir) = succeeding_app();

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _temp_dir) = succeeding_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_index_page_served() {
    let (app, _, _temp_dir) = succeeding_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<form"), "UI page should contain the form");
}

#[tokio::test]
async fn test_openapi_endpoint_documents_routes() {
    let (app, _, _temp_dir) = succeeding_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(
        json["paths"]["/api/v1/jobs"].get("post").is_some(),
        "POST /api/v1/jobs should be documented"
    );
    assert!(
        json["paths"]["/api/v1/jobs/{id}/file"].get("get").is_some(),
        "GET /api/v1/jobs/{{id}}/file should be documented"
    );
    assert!(
        json["paths"]["/api/v1/files/latest"].get("get").is_some(),
        "GET /api/v1/files/latest should be documented"
    );
}
