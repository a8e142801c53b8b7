//! Markdown renderings returned as MCP tool text

use council_application::ProviderReadiness;
use council_domain::util::truncate_chars;
use council_domain::{CouncilResponse, CouncilStats};

/// Characters of each provider answer shown under "Details per provider".
pub const DETAIL_EXCERPT_CHARS: usize = 500;

/// Synthesis, per-provider details, then a one-line summary.
pub fn render_answer(response: &CouncilResponse) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(synthesis) = response.synthesis.as_deref().filter(|s| !s.is_empty()) {
        parts.push(synthesis.to_string());
    }

    if !response.responses.is_empty() {
        parts.push("\n---\n**Details per provider:**".to_string());
        for (name, result) in &response.responses {
            match &result.error {
                Some(error) => parts.push(format!("\n**{}**: Error - {}", name, error)),
                None => {
                    let (excerpt, _) = truncate_chars(&result.content, DETAIL_EXCERPT_CHARS);
                    parts.push(format!(
                        "\n**{}** ({:.0}ms, ${:.4}):\n{}",
                        name, result.latency_ms, result.cost, excerpt
                    ));
                }
            }
        }
    }

    let consensus = response.consensus_score.map(|s| s.percent()).unwrap_or(0);
    let mut meta = format!(
        "\n\n---\n*Latency: {:.0}ms | Cost: ${:.4} | Consensus: {}%",
        response.total_latency_ms, response.total_cost, consensus
    );
    if response.cached {
        meta.push_str(" | Cached");
    }
    meta.push('*');
    parts.push(meta);

    parts.join("\n")
}

pub fn render_stats(stats: &CouncilStats) -> String {
    let mut lines = vec![
        "**AI Council statistics**".to_string(),
        format!("- Total requests: {}", stats.total_requests),
        format!("- Cached responses: {}", stats.cached_responses),
        format!("- Total cost: ${:.4}", stats.total_cost),
        format!("- Average latency: {:.0}ms", stats.avg_latency_ms),
        format!("- Cache hit rate: {:.1}%", stats.cache.hit_rate),
    ];

    if !stats.requests_by_provider.is_empty() {
        lines.push("\n**By provider:**".to_string());
        for (provider, count) in &stats.requests_by_provider {
            lines.push(format!("  - {}: {} requests", provider, count));
        }
    }

    lines.join("\n")
}

pub fn render_models(readiness: &[ProviderReadiness]) -> String {
    let mut lines = vec!["**Available providers:**".to_string()];
    for entry in readiness {
        let status = if entry.ready { "Configured" } else { "Not configured" };
        let kind = if entry.local { "Local" } else { "Cloud" };
        lines.push(format!("  - **{}** [{}]: {}", entry.provider, kind, status));
    }
    lines.join("\n")
}
