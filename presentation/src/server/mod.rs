//! HTTP API for the council
//!
//! An axum router over a shared [`AskCouncilUseCase`], with a per-client
//! rate limiter on `/api/` paths and a tower-http trace layer. Every request
//! carries an `x-request-id`: the caller's own, or a fresh uuid. The id is
//! recorded on the request span and echoed on the response.

pub mod error;
pub mod rate_limit;
pub mod routes;

pub use error::ApiError;
pub use rate_limit::RateLimiter;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use council_application::AskCouncilUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span, warn};

/// Application state shared across handlers
pub struct AppState {
    pub use_case: Arc<AskCouncilUseCase>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(use_case: Arc<AskCouncilUseCase>, rate_limiter: RateLimiter) -> Self {
        Self {
            use_case,
            rate_limiter,
        }
    }
}

/// Build the router with every route and middleware attached.
pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Serve the API on `addr` until Ctrl-C, then flush pending cache writes.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let use_case = state.use_case.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Shutting down, flushing cache writes");
    use_case.cache().flush().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::{StatusCode, header};
    use council_application::{Generator, GeneratorError, GeneratorRegistry, ResultCache};
    use council_domain::{CouncilResponse, CouncilStats, Generation, ProviderId};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    struct EchoGenerator {
        provider: ProviderId,
        ready: bool,
    }

    #[async_trait]
    impl Generator for EchoGenerator {
        fn provider(&self) -> &ProviderId {
            &self.provider
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn generate(
            &self,
            _prompt: &str,
            _temperature: f64,
            _max_tokens: u32,
        ) -> Result<Generation, GeneratorError> {
            Ok(Generation::new("Water vapor condenses into droplets.", 10, 6))
        }
    }

    fn test_router(rate_limit: u32) -> Router {
        let registry = GeneratorRegistry::new()
            .register(Arc::new(EchoGenerator {
                provider: ProviderId::Claude,
                ready: true,
            }))
            .register(Arc::new(EchoGenerator {
                provider: ProviderId::Gpt4,
                ready: true,
            }))
            .register(Arc::new(EchoGenerator {
                provider: ProviderId::Ollama,
                ready: false,
            }));
        let use_case = AskCouncilUseCase::new(
            Arc::new(registry),
            Arc::new(ResultCache::new(Duration::from_secs(3600))),
        );
        router(AppState::new(
            Arc::new(use_case),
            RateLimiter::per_minute(rate_limit),
        ))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ask(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/council/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router(20).oneshot(get("/api/v1/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["providers_configured"], 2);
        assert_eq!(json["cache_enabled"], true);
    }

    #[tokio::test]
    async fn test_ask_returns_council_response() {
        let response = test_router(20)
            .oneshot(ask(r#"{"question": "What causes rain?", "providers": ["claude", "gpt4"]}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let council: CouncilResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(council.responses.len(), 2);
        assert_eq!(council.consensus_score.unwrap().value(), 1.0);
        assert!(council.synthesis.unwrap().contains("broad agreement"));
        assert_eq!(council.request_id.len(), 8);
    }

    #[tokio::test]
    async fn test_ask_rejects_invalid_temperature() {
        let response = test_router(20)
            .oneshot(ask(r#"{"question": "q", "temperature": 3.5}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["field"], "temperature");
    }

    #[tokio::test]
    async fn test_ask_rejects_unknown_mode_and_blank_question() {
        let router = test_router(20);

        let response = router
            .clone()
            .oneshot(ask(r#"{"question": "q", "mode": "poem"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["field"], "mode");

        let response = router.oneshot(ask(r#"{"question": "   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["field"], "question");
    }

    #[tokio::test]
    async fn test_ask_rejects_malformed_body() {
        let response = test_router(20).oneshot(ask("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["field"], "body");
    }

    #[tokio::test]
    async fn test_models_lists_readiness() {
        let response = test_router(20).oneshot(get("/api/v1/models")).await.unwrap();
        let json = body_json(response).await;
        let models = json["models"].as_array().unwrap();

        assert_eq!(models.len(), 3);
        assert_eq!(models[0]["name"], "claude");
        assert_eq!(models[0]["configured"], true);
        assert_eq!(models[0]["type"], "cloud");
        assert_eq!(models[2]["name"], "ollama");
        assert_eq!(models[2]["configured"], false);
        assert_eq!(models[2]["type"], "local");
    }

    #[tokio::test]
    async fn test_stats_after_requests() {
        let router = test_router(20);
        let body = r#"{"question": "What causes rain?", "providers": ["claude"]}"#;
        for _ in 0..2 {
            let response = router.clone().oneshot(ask(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router.oneshot(get("/api/v1/stats")).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: CouncilStats = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.cached_responses, 1);
        assert_eq!(stats.cache.hits, 1);
    }

    #[tokio::test]
    async fn test_rate_limit_returns_429_with_retry_after() {
        let router = test_router(2);
        let from_client = || {
            Request::builder()
                .uri("/api/v1/health")
                .header("x-forwarded-for", "203.0.113.7")
                .body(Body::empty())
                .unwrap()
        };

        for _ in 0..2 {
            let response = router.clone().oneshot(from_client()).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router.clone().oneshot(from_client()).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "60");
        assert!(body_json(response).await["error"].is_string());

        // A different client is unaffected
        let other = Request::builder()
            .uri("/api/v1/health")
            .header("x-forwarded-for", "198.51.100.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(router.oneshot(other).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_response_carries_generated_request_id() {
        let response = test_router(20).oneshot(get("/api/v1/health")).await.unwrap();
        let request_id = response.headers()["x-request-id"].to_str().unwrap();
        assert_eq!(request_id.len(), 36);
        assert!(uuid_like(request_id));
    }

    #[tokio::test]
    async fn test_caller_request_id_is_echoed() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/council/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-request-id", "trace-4711")
            .body(Body::from(r#"{"question": "What causes rain?"}"#))
            .unwrap();
        let response = test_router(20).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "trace-4711");
    }

    #[tokio::test]
    async fn test_rejected_requests_still_carry_request_id() {
        let response = test_router(20).oneshot(ask("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().contains_key("x-request-id"));
    }

    fn uuid_like(id: &str) -> bool {
        id.split('-').map(str::len).collect::<Vec<_>>() == [8, 4, 4, 4, 12]
    }
}
