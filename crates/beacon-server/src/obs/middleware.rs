//! Pre/post dispatch hooks.
//!
//! The start time lives in the request's own extensions (`RequestTiming`), so
//! concurrent requests never see each other's timestamps. The post-hook counts
//! every response; the latency observation is skipped when no timing context
//! was recorded.

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;
use crate::obs::RequestMetrics;

/// Endpoint label used when no route matched.
pub const UNKNOWN_ENDPOINT: &str = "unknown";

/// Request-scoped start timestamp.
#[derive(Debug, Clone, Copy)]
pub struct RequestTiming {
    start: Instant,
}

impl RequestTiming {
    pub fn now() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Pre-hook: stamp the request with its start time.
pub fn begin_request(req: &mut Request) {
    req.extensions_mut().insert(RequestTiming::now());
}

/// Matched route template, or `"unknown"` for the fallback.
pub fn endpoint_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_ENDPOINT.to_string())
}

/// Post-hook: count the response and observe its latency.
///
/// A missing `timing` only skips the histogram; the response is returned as-is.
pub fn finish_request(
    metrics: &RequestMetrics,
    method: &Method,
    endpoint: &str,
    timing: Option<RequestTiming>,
    response: Response,
) -> Response {
    let status = response.status();

    if let Err(e) = metrics
        .requests
        .inc(&[method.as_str(), endpoint, status.as_str()])
    {
        tracing::warn!(error = %e, "request counter update failed");
    }

    match timing {
        Some(t) => {
            let elapsed = t.elapsed();
            metrics.duration.observe(elapsed);
            tracing::debug!(%method, endpoint, status = status.as_u16(), ?elapsed, "request completed");
        }
        None => {
            tracing::debug!(%method, endpoint, status = status.as_u16(), "no request timing; latency not recorded");
        }
    }

    response
}

/// Axum middleware running both hooks around the inner service.
pub async fn track_requests(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    begin_request(&mut req);

    let method = req.method().clone();
    let endpoint = endpoint_label(&req);
    let timing = req.extensions().get::<RequestTiming>().copied();

    let response = next.run(req).await;
    finish_request(state.metrics(), &method, &endpoint, timing, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};

    use crate::config::MetricsSection;

    fn metrics() -> RequestMetrics {
        RequestMetrics::new(&MetricsSection::default()).unwrap()
    }

    #[test]
    fn begin_request_stores_timing_in_extensions() {
        let mut req = Request::new(Body::empty());
        assert!(req.extensions().get::<RequestTiming>().is_none());
        begin_request(&mut req);
        assert!(req.extensions().get::<RequestTiming>().is_some());
    }

    #[test]
    fn unmatched_request_gets_unknown_endpoint() {
        let req = Request::new(Body::empty());
        assert_eq!(endpoint_label(&req), UNKNOWN_ENDPOINT);
    }

    #[test]
    fn post_hook_without_timing_counts_but_skips_histogram() {
        let m = metrics();
        let resp = finish_request(&m, &Method::GET, "/health", None, StatusCode::OK.into_response());

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(m.requests.get(&["GET", "/health", "200"]), 1);
        assert_eq!(m.duration.count(), 0);
    }

    #[test]
    fn post_hook_with_timing_observes_latency() {
        let m = metrics();
        let timing = RequestTiming::now();
        let resp = finish_request(
            &m,
            &Method::POST,
            UNKNOWN_ENDPOINT,
            Some(timing),
            StatusCode::NOT_FOUND.into_response(),
        );

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(m.requests.get(&["POST", "unknown", "404"]), 1);
        assert_eq!(m.duration.count(), 1);
    }
}
