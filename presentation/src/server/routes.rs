//! API routes

use super::AppState;
use super::error::ApiError;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use council_application::CouncilSettings;
use council_domain::{
    CouncilRequest, CouncilResponse, CouncilStats, DomainError, ProviderId, Question, ResponseMode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

pub fn api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/council/ask", post(ask_council))
        .route("/api/v1/models", get(list_models))
        .route("/api/v1/stats", get(get_stats))
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers_configured: usize,
    pub cache_enabled: bool,
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let providers_configured = state
        .use_case
        .provider_readiness()
        .iter()
        .filter(|p| p.ready)
        .count();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers_configured,
        cache_enabled: state.use_case.cache().is_enabled(),
    })
}

// ============================================================================
// Council
// ============================================================================

/// JSON body of `POST /api/v1/council/ask`
///
/// Everything but `question` is optional and falls back to the server
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequestBody {
    pub question: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, alias = "models")]
    pub providers: Option<Vec<ProviderId>>,
    #[serde(default)]
    pub optimize_prompts: Option<bool>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub stream: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl AskRequestBody {
    /// Fill defaults from `settings` and validate.
    pub fn into_request(self, settings: &CouncilSettings) -> Result<CouncilRequest, DomainError> {
        let mode: ResponseMode = match self.mode.as_deref() {
            Some(mode) => mode.parse()?,
            None => Default::default(),
        };

        let mut request = CouncilRequest::new(Question::new(self.question))
            .with_mode(mode)
            .with_providers(
                self.providers
                    .unwrap_or_else(|| settings.default_providers.clone()),
            )
            .with_temperature(self.temperature.unwrap_or(settings.default_temperature));

        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if self.optimize_prompts == Some(false) {
            request = request.without_optimization();
        }
        if let Some(user_id) = self.user_id {
            request = request.with_user_id(user_id);
        }
        request.stream = self.stream;

        request.validate()?;
        Ok(request)
    }
}

async fn ask_council(
    State(state): State<AppStateArc>,
    body: Result<Json<AskRequestBody>, JsonRejection>,
) -> Result<Json<CouncilResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    let request = body.into_request(state.use_case.settings())?;

    info!("Council request via API ({} mode)", request.mode);
    Ok(Json(state.use_case.ask(&request).await))
}

// ============================================================================
// Models & stats
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub configured: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

async fn list_models(State(state): State<AppStateArc>) -> Json<ModelsResponse> {
    let models = state
        .use_case
        .provider_readiness()
        .into_iter()
        .map(|readiness| ModelInfo {
            name: readiness.provider.to_string(),
            configured: readiness.ready,
            kind: readiness.provider.kind_label().to_string(),
        })
        .collect();

    Json(ModelsResponse { models })
}

async fn get_stats(State(state): State<AppStateArc>) -> Json<CouncilStats> {
    Json(state.use_case.stats().await)
}
