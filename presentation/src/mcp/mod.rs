//! MCP server for the council
//!
//! Serves three tools over stdio so MCP clients (desktop assistants,
//! editors) can consult the council in-process, without the HTTP API:
//!
//! - `ask_council`: fan a question out and return the rendered answer
//! - `get_council_stats`: usage and cache statistics
//! - `list_council_models`: registered providers and their readiness

mod format;

pub use format::{DETAIL_EXCERPT_CHARS, render_answer, render_models, render_stats};

use council_application::{AskCouncilUseCase, CouncilSettings};
use council_domain::{CouncilRequest, DomainError, ProviderId, Question, ResponseMode};
use rmcp::model::ErrorData;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::io::stdio,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum McpServeError {
    #[error("Failed to start MCP server: {0}")]
    Start(String),

    #[error("MCP server task failed: {0}")]
    Task(String),
}

#[derive(Clone)]
pub struct CouncilMcpServer {
    use_case: Arc<AskCouncilUseCase>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CouncilMcpServer {
    pub fn new(use_case: Arc<AskCouncilUseCase>) -> Self {
        Self {
            use_case,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Ask the AI council a question. Several providers answer at once and the answers are combined. Parameters: question (required), mode (synthesis, detailed or debate; default synthesis), models (comma-separated provider names, e.g. \"claude,gpt4,gemini\")."
    )]
    async fn ask_council(
        &self,
        params: Map<String, Value>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = request_from_arguments(&params, self.use_case.settings())
            .map_err(|e| ErrorData::invalid_request(e.to_string(), None))?;

        info!(
            mode = %request.mode,
            providers = request.providers.len(),
            "ask_council called"
        );
        let response = self.use_case.ask(&request).await;
        info!(request_id = %response.request_id, cached = response.cached, "Council answer ready");

        Ok(CallToolResult::success(vec![Content::text(render_answer(
            &response,
        ))]))
    }

    #[tool(description = "Usage statistics of the council: requests, cost, average latency, cache hit rate and per-provider counts.")]
    async fn get_council_stats(
        &self,
        _params: Map<String, Value>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("get_council_stats called");
        let stats = self.use_case.stats().await;
        Ok(CallToolResult::success(vec![Content::text(render_stats(
            &stats,
        ))]))
    }

    #[tool(description = "List the council's providers, whether each runs locally or in the cloud, and whether it is configured.")]
    async fn list_council_models(
        &self,
        _params: Map<String, Value>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("list_council_models called");
        let readiness = self.use_case.provider_readiness();
        Ok(CallToolResult::success(vec![Content::text(render_models(
            &readiness,
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for CouncilMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Ask several AI providers (Claude, GPT-4, Gemini, Mistral, DeepSeek, Cohere, Ollama) \
                 the same question at once and get one consolidated answer with a consensus score. \
                 Use list_council_models to see which providers are configured."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Build a council request from `ask_council` arguments.
///
/// `models` may be a comma-separated string or an array of names; when
/// absent the configured default providers are used. Optional
/// `temperature` and `max_tokens` are honoured too.
pub fn request_from_arguments(
    arguments: &Map<String, Value>,
    settings: &CouncilSettings,
) -> Result<CouncilRequest, DomainError> {
    let question = arguments
        .get("question")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mode: ResponseMode = match arguments.get("mode").and_then(Value::as_str) {
        Some(mode) => mode.parse()?,
        None => ResponseMode::default(),
    };

    let providers = match arguments.get("models") {
        Some(Value::String(list)) => parse_model_list(list),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ProviderId::from)
            .collect(),
        _ => settings.default_providers.clone(),
    };

    let temperature = arguments
        .get("temperature")
        .and_then(Value::as_f64)
        .unwrap_or(settings.default_temperature);

    let mut request = CouncilRequest::new(Question::new(question))
        .with_mode(mode)
        .with_providers(providers)
        .with_temperature(temperature);

    if let Some(max_tokens) = arguments.get("max_tokens").and_then(Value::as_u64) {
        request = request.with_max_tokens(u32::try_from(max_tokens).unwrap_or(u32::MAX));
    }

    request.validate()?;
    Ok(request)
}

/// "claude, gpt4,,gemini" -> [claude, gpt4, gemini]
fn parse_model_list(list: &str) -> Vec<ProviderId> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ProviderId::from)
        .collect()
}

/// Serve the council over stdio until the client disconnects, then flush
/// pending cache writes.
pub async fn serve_stdio(use_case: Arc<AskCouncilUseCase>) -> Result<(), McpServeError> {
    let service = CouncilMcpServer::new(use_case.clone())
        .serve(stdio())
        .await
        .map_err(|e| McpServeError::Start(e.to_string()))?;

    info!("AI Council MCP server running over stdio");
    service
        .waiting()
        .await
        .map_err(|e| McpServeError::Task(e.to_string()))?;

    use_case.cache().flush().await;
    Ok(())
}
