//! Ask Council use case
//!
//! Orchestrates one council consultation: cache-aside lookup, provider
//! selection, concurrent dispatch, aggregation, caching and statistics.
//! Provider faults are recorded as data; `ask` always returns a renderable
//! response.

use crate::cache::ResultCache;
use crate::config::CouncilSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::generator::Generator;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::registry::{GeneratorRegistry, ProviderReadiness};
use crate::stats::RunningStats;
use council_domain::{
    Aggregator, CacheKey, CouncilRequest, CouncilResponse, CouncilStats, GenerationResult,
    PromptTemplate, ProviderId, cost_for,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Synthesis of the degenerate response returned when none of the
/// requested providers is registered and ready.
pub const NO_ACTIVE_PROVIDER: &str =
    "No requested provider is configured. Check your API keys.";

/// Use case for consulting the council (the orchestrator)
pub struct AskCouncilUseCase {
    registry: Arc<GeneratorRegistry>,
    cache: Arc<ResultCache>,
    settings: CouncilSettings,
    stats: RunningStats,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AskCouncilUseCase {
    pub fn new(registry: Arc<GeneratorRegistry>, cache: Arc<ResultCache>) -> Self {
        Self {
            registry,
            cache,
            settings: CouncilSettings::default(),
            stats: RunningStats::new(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_settings(mut self, settings: CouncilSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn settings(&self) -> &CouncilSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Every registered provider with its readiness, in registration order.
    pub fn provider_readiness(&self) -> Vec<ProviderReadiness> {
        self.registry.readiness()
    }

    /// Snapshot of the running statistics and cache counters.
    pub async fn stats(&self) -> CouncilStats {
        self.stats.snapshot(self.cache.stats().await).await
    }

    /// Execute the use case with default (no-op) progress
    pub async fn ask(&self, request: &CouncilRequest) -> CouncilResponse {
        self.ask_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// `request` must already be validated.
    pub async fn ask_with_progress(
        &self,
        request: &CouncilRequest,
        progress: &dyn ProgressNotifier,
    ) -> CouncilResponse {
        let request_id = new_request_id();
        let started = Instant::now();
        let requested = request.requested_providers();

        info!(
            request_id = %request_id,
            mode = %request.mode,
            providers = ?provider_names(&requested),
            "Council request received"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "council_request",
            json!({
                "request_id": request_id,
                "question": request.question.content(),
                "mode": request.mode.as_str(),
                "providers": provider_names(&requested),
                "optimize_prompts": request.optimize_prompts,
                "temperature": request.temperature,
                "max_tokens": request.max_tokens,
                "user_id": request.user_id,
            }),
        ));

        let key = CacheKey::derive(&request.question, &requested, request.mode);
        if let Some(mut response) = self.cache.get(&key).await {
            response.mark_cached();
            response.request_id = request_id;
            self.stats.record_cache_hit().await;
            progress.on_cache_hit();

            info!(request_id = %response.request_id, key = key.short(), "Served from cache");
            self.conversation_logger.log(ConversationEvent::new(
                "council_cache_hit",
                json!({
                    "request_id": response.request_id,
                    "cache_key": key.as_str(),
                }),
            ));
            return response;
        }

        let active = self.select_active(&requested);
        if active.is_empty() {
            warn!(
                request_id = %request_id,
                requested = ?provider_names(&requested),
                "No requested provider is ready"
            );
            return CouncilResponse::degenerate(request.mode, request_id, NO_ACTIVE_PROVIDER);
        }

        let results = self
            .dispatch(request, &active, &request_id, progress)
            .await;

        let aggregation =
            Aggregator::aggregate(request.mode, request.question.content(), &results);
        let total_cost = results.iter().map(|r| r.cost).sum();
        let response = CouncilResponse {
            synthesis: aggregation.synthesis,
            responses: results
                .into_iter()
                .map(|r| (r.provider.to_string(), r))
                .collect(),
            consensus_score: aggregation.consensus_score,
            total_cost,
            total_latency_ms: started.elapsed().as_secs_f64() * 1000.0,
            cached: false,
            mode: request.mode,
            request_id,
        };

        self.cache
            .set(&key, request.question.content(), &response)
            .await;
        self.stats.record_completed(&response).await;

        info!(
            request_id = %response.request_id,
            responded = response.successful_responses().count(),
            failed = response.failed_responses().count(),
            consensus = ?response.consensus_score.map(|s| s.value()),
            "Council request completed in {:.0}ms, cost ${:.4}",
            response.total_latency_ms,
            response.total_cost
        );
        self.conversation_logger.log(ConversationEvent::new(
            "council_response",
            json!({
                "request_id": response.request_id,
                "mode": response.mode.as_str(),
                "total_cost": response.total_cost,
                "total_latency_ms": response.total_latency_ms,
                "consensus_score": response.consensus_score,
                "synthesis": response.synthesis,
            }),
        ));

        response
    }

    /// Requested providers that are registered and ready, in request order.
    fn select_active(&self, requested: &[ProviderId]) -> Vec<Arc<dyn Generator>> {
        requested
            .iter()
            .filter_map(|provider| match self.registry.get(provider) {
                Some(generator) if generator.is_ready() => Some(generator),
                Some(_) => {
                    debug!(provider = %provider, "Skipping provider that is not ready");
                    None
                }
                None => {
                    debug!(provider = %provider, "Skipping unknown provider");
                    None
                }
            })
            .collect()
    }

    /// Query every active provider in parallel and wait for all of them.
    ///
    /// Returns one result per active provider, in `active` order.
    async fn dispatch(
        &self,
        request: &CouncilRequest,
        active: &[Arc<dyn Generator>],
        request_id: &str,
        progress: &dyn ProgressNotifier,
    ) -> Vec<GenerationResult> {
        let max_tokens = request
            .max_tokens
            .unwrap_or(self.settings.default_max_tokens);

        debug!(request_id, count = active.len(), "Dispatching to providers");
        progress.on_dispatch_start(active.len());

        let mut join_set = JoinSet::new();
        let mut task_providers = HashMap::with_capacity(active.len());

        for generator in active {
            let generator = Arc::clone(generator);
            let provider = generator.provider().clone();
            let prompt = PromptTemplate::build(
                &provider,
                request.question.content(),
                request.optimize_prompts,
            );
            let temperature = request.temperature;

            let handle = join_set
                .spawn(async move { consult(generator, prompt, temperature, max_tokens).await });
            task_providers.insert(handle.id(), provider);
        }

        let mut by_provider: HashMap<ProviderId, GenerationResult> =
            HashMap::with_capacity(active.len());

        while let Some(joined) = join_set.join_next_with_id().await {
            let result = match joined {
                Ok((_, result)) => result,
                Err(e) => {
                    let Some(provider) = task_providers.get(&e.id()).cloned() else {
                        warn!("Task join error: {}", e);
                        continue;
                    };
                    GenerationResult::failure(provider, format!("Task failed: {}", e), 0.0)
                }
            };

            match &result.error {
                Some(error) => warn!(
                    request_id,
                    provider = %result.provider,
                    "Provider {} failed: {}",
                    result.provider,
                    error
                ),
                None => info!(
                    request_id,
                    provider = %result.provider,
                    "Provider {} responded in {:.0}ms",
                    result.provider,
                    result.latency_ms
                ),
            }
            progress.on_provider_complete(&result.provider, !result.is_error());
            self.conversation_logger.log(ConversationEvent::new(
                "provider_result",
                json!({
                    "request_id": request_id,
                    "provider": result.provider.as_str(),
                    "latency_ms": result.latency_ms,
                    "input_tokens": result.input_tokens,
                    "output_tokens": result.output_tokens,
                    "cost": result.cost,
                    "error": result.error,
                    "content_chars": result.content.chars().count(),
                }),
            ));

            by_provider.insert(result.provider.clone(), result);
        }

        progress.on_dispatch_complete();

        active
            .iter()
            .filter_map(|generator| by_provider.remove(generator.provider()))
            .collect()
    }
}

/// Call one provider and record the outcome, success or failure.
async fn consult(
    generator: Arc<dyn Generator>,
    prompt: String,
    temperature: f64,
    max_tokens: u32,
) -> GenerationResult {
    let provider = generator.provider().clone();
    let started = Instant::now();
    let outcome = generator.generate(&prompt, temperature, max_tokens).await;
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(generation) => {
            let cost = cost_for(&provider, generation.input_tokens, generation.output_tokens);
            GenerationResult::success(provider, generation, latency_ms, cost)
        }
        Err(e) => GenerationResult::failure(provider, e.to_string(), latency_ms),
    }
}

/// Short per-call identifier: the first 8 hex digits of a random UUID.
fn new_request_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

fn provider_names(providers: &[ProviderId]) -> Vec<&str> {
    providers.iter().map(|p| p.as_str()).collect()
}
