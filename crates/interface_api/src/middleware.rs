//! API middleware

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Request logging middleware
///
/// Logs one line per request with its outcome and latency. The request id is
/// the `x-request-id` header set by the request id layer.
pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        status = %status.as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "API request"
    );

    response
}
