use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::*;

async fn status_of(router: Router, uri: &str) -> StatusCode {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn healthz_returns_ok() {
    assert_eq!(status_of(base_routes(), "/healthz").await, StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    assert_eq!(status_of(base_routes(), "/nope").await, StatusCode::NOT_FOUND);
}
