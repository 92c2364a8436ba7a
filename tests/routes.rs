use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use paginator::routes::router;
use paginator::{PaginationConfig, PaginationParams};

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(router(PaginationConfig::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn params_with_count() {
    let (status, body) = get(
        router(PaginationConfig::default()),
        "/api/pagination?page=2&limit=10&count=95",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "page": 2,
            "pagination": {
                "currentPage": 2,
                "currentPageSize": 10,
                "totalPages": 10,
                "totalRecords": 95
            }
        })
    );

    let params: PaginationParams = serde_json::from_value(body).unwrap();
    assert!(params.pagination.has_prev());
    assert!(params.pagination.has_next());
}

#[tokio::test]
async fn params_default_to_empty_result() {
    let (status, body) = get(router(PaginationConfig::default()), "/api/pagination").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["totalRecords"], 0);
}

#[tokio::test]
async fn params_reject_in_strict_mode() {
    let (status, body) = get(
        router(PaginationConfig::strict()),
        "/api/pagination?limit=500&count=10",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "每页数量 500 超过上限 100"}));
}

#[tokio::test]
async fn params_clamp_in_lenient_mode() {
    let (status, body) = get(
        router(PaginationConfig::default()),
        "/api/pagination?page=-4&limit=500&count=250",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pagination"]["currentPageSize"], 100);
    assert_eq!(body["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn params_reject_malformed_count() {
    for uri in ["/api/pagination?count=abc", "/api/pagination?page=2&count=-1"] {
        let (status, body) = get(router(PaginationConfig::default()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("查询参数无效"));
    }
}

#[tokio::test]
async fn init_uses_router_config() {
    let config = PaginationConfig {
        default_limit: 25,
        ..PaginationConfig::default()
    };
    let (status, body) = get(router(config), "/api/pagination/init?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"page": 3, "limit": 25, "offset": 50}));
}
