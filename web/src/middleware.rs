//! Axum middleware: per-client rate limiting and request logging.
//!
//! Both are plain tower `Layer`/`Service` pairs. The rate limiter sits inside
//! the request-log layer so that rejected requests still show up in the logs.

use crate::extractors::client_key;
use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use seatwise_runtime::FixedWindowLimiter;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Exact response body sent on rate-limit rejection.
pub const RATE_LIMITED_BODY: &str = r#"{"error":"rate_limit_exceeded"}"#;

/// Path prefixes shielded by the limiter. Everything else bypasses it.
const GATED_PREFIXES: [&str; 2] = ["/api/attendees", "/api/registrations"];

/// Create a layer that throttles customer API paths per client.
#[must_use]
pub fn rate_limit_layer(limiter: Arc<FixedWindowLimiter>) -> RateLimitLayer {
    RateLimitLayer { limiter }
}

/// Layer for per-client rate limiting.
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    limiter: Arc<FixedWindowLimiter>,
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitMiddleware {
            inner,
            limiter: Arc::clone(&self.limiter),
        }
    }
}

/// Middleware service enforcing the fixed-window limit.
#[derive(Clone, Debug)]
pub struct RateLimitMiddleware<S> {
    inner: S,
    limiter: Arc<FixedWindowLimiter>,
}

impl<S> Service<Request> for RateLimitMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let path = req.uri().path();
        let gated = GATED_PREFIXES.iter().any(|prefix| path.starts_with(prefix));

        if gated {
            let key = client_key(
                req.headers(),
                req.extensions().get::<ConnectInfo<SocketAddr>>(),
            );
            if !self.limiter.allow(&key) {
                tracing::warn!(client = %key, path = %req.uri().path(), "rate limit exceeded");
                // Inner service is never called for a rejected request.
                let response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::CONTENT_TYPE, "application/json")],
                    RATE_LIMITED_BODY,
                )
                    .into_response();
                return Box::pin(async move { Ok(response) });
            }
        }

        let fut = self.inner.call(req);
        Box::pin(fut)
    }
}

/// Create a layer that logs every request with a correlation ID.
///
/// Extracts the correlation ID from `X-Correlation-ID` (or generates one),
/// runs the request inside a span carrying it, logs method, path, status,
/// and duration on completion, and echoes the ID in the response header.
#[must_use]
pub fn request_log_layer() -> RequestLogLayer {
    RequestLogLayer
}

/// Layer for request logging and correlation tracking.
#[derive(Clone, Debug)]
pub struct RequestLogLayer;

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogMiddleware { inner }
    }
}

/// Middleware service for request logging.
#[derive(Clone, Debug)]
pub struct RequestLogMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for RequestLogMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        req.extensions_mut().insert(correlation_id);

        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
        );

        let started = Instant::now();
        let fut = self.inner.call(req);

        Box::pin(
            async move {
                let mut response = fut.await?;

                tracing::info!(
                    status = response.status().as_u16(),
                    duration_ms = started.elapsed().as_millis(),
                    "request completed"
                );

                if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
                    response.headers_mut().insert(CORRELATION_ID_HEADER, value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get, routing::post};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(limit: u32) -> Router {
        let limiter = Arc::new(FixedWindowLimiter::new(limit, Duration::from_secs(60)));
        Router::new()
            .route("/api/attendees", post(|| async { "created" }))
            .route("/api/events", get(|| async { "events" }))
            .layer(rate_limit_layer(limiter))
            .layer(request_log_layer())
    }

    fn post_attendees(forwarded_for: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/attendees")
            .header("X-Forwarded-For", forwarded_for)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn over_limit_requests_get_429_with_exact_body() {
        let app = app(2);

        for _ in 0..2 {
            let response = app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), RATE_LIMITED_BODY.as_bytes());
    }

    #[tokio::test]
    async fn clients_are_limited_independently() {
        let app = app(1);

        assert_eq!(
            app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap().status(),
            StatusCode::OK
        );
        assert_eq!(
            app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            app.clone().oneshot(post_attendees("198.51.100.7")).await.unwrap().status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn first_forwarded_value_identifies_the_client() {
        let app = app(1);

        let first = post_attendees("203.0.113.9, 10.0.0.1");
        let second = post_attendees("203.0.113.9, 10.9.9.9");
        assert_eq!(app.clone().oneshot(first).await.unwrap().status(), StatusCode::OK);
        // Same first hop, different proxy chain: still the same client.
        assert_eq!(
            app.clone().oneshot(second).await.unwrap().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn non_gated_paths_bypass_the_limiter() {
        let app = app(1);

        // Exhaust the client's budget on a gated path.
        let _ = app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap();
        let _ = app.clone().oneshot(post_attendees("203.0.113.9")).await.unwrap();

        for _ in 0..5 {
            let request = Request::builder()
                .uri("/api/events")
                .header("X-Forwarded-For", "203.0.113.9")
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn correlation_id_is_echoed_back() {
        let app = app(10);
        let id = Uuid::new_v4();

        let request = Request::builder()
            .uri("/api/events")
            .header(CORRELATION_ID_HEADER, id.to_string())
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let echoed = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation header present")
            .to_str()
            .unwrap();
        assert_eq!(echoed, id.to_string());
    }

    #[tokio::test]
    async fn generated_correlation_id_is_a_uuid() {
        let app = app(10);

        let request = Request::builder()
            .uri("/api/events")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let generated = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation header present")
            .to_str()
            .unwrap();
        assert!(Uuid::parse_str(generated).is_ok());
    }
}
