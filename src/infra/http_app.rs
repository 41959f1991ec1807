use axum::{
    routing::{any_service, get},
    Router,
};
use std::sync::Arc;

use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::alert::AlertTool;
use crate::tools::tool_router;

/// `/healthz` + streamable MCP at `/mcp`.
pub fn build_app(tool: Arc<AlertTool>) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(tool_router::factory(tool), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::silent_tool;
    use axum::body::{to_bytes, Body};
    use hyper::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_answers_ok() {
        let app = build_app(silent_tool());
        let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_success());
        let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
