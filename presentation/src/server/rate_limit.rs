//! Fixed-window per-client rate limiting

use super::AppState;
use super::error::ApiError;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Length of one counting window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Expired windows are pruned once this many clients are tracked
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// At most `limit` requests per client per window
#[derive(Clone)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, RATE_LIMIT_WINDOW)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count a request from `client`; `false` when it exceeds the limit.
    pub async fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now()).await
    }

    async fn check_at(&self, client: &str, now: Instant) -> bool {
        let mut clients = self.clients.lock().await;

        if clients.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = clients.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.limit {
            return false;
        }
        entry.count += 1;
        true
    }
}

/// Client address: socket peer, else the first `X-Forwarded-For` hop.
fn client_id(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Applies the limiter to `/api/` paths.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with("/api/") {
        return next.run(request).await;
    }

    let client = client_id(&request);
    if !state.rate_limiter.check(&client).await {
        warn!("Rate limit exceeded for {}", client);
        return ApiError::RateLimited.into_response();
    }

    debug!("Rate limit OK for {}", client);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_within_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("10.0.0.1", now).await);
        assert!(limiter.check_at("10.0.0.1", now).await);
        assert!(!limiter.check_at("10.0.0.1", now).await);
        // Other clients have their own window
        assert!(limiter.check_at("10.0.0.2", now).await);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at("c", start).await);
        assert!(!limiter.check_at("c", start + Duration::from_secs(59)).await);
        assert!(limiter.check_at("c", start + Duration::from_secs(60)).await);
    }
}
