//! Console output formatter for council responses

use colored::Colorize;
use council_application::ProviderReadiness;
use council_domain::{CouncilResponse, CouncilStats, GenerationResult};

/// Formats council responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Synthesis or debate document only.
    ///
    /// Detailed responses carry no document, so they fall back to the
    /// per-provider answers.
    pub fn format_text(response: &CouncilResponse) -> String {
        match &response.synthesis {
            Some(synthesis) => format!("{}\n", synthesis),
            None => {
                let mut output = String::new();
                for result in response.responses.values() {
                    output.push_str(&Self::provider_section(result));
                }
                output
            }
        }
    }

    /// Every provider section, the document and a metadata footer.
    pub fn format_full(question: &str, response: &CouncilResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Council"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));
        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            response.mode
        ));

        output.push_str(&Self::section_header("Provider responses"));
        for result in response.responses.values() {
            output.push_str(&Self::provider_section(result));
        }

        if let Some(synthesis) = &response.synthesis {
            output.push_str(&Self::section_header("Council document"));
            output.push_str(&format!("\n{}\n", synthesis));
        }

        output.push_str(&Self::section_header("Metadata"));
        output.push_str(&format!("  Request ID:  {}\n", response.request_id));
        if let Some(score) = response.consensus_score {
            output.push_str(&format!("  Consensus:   {}%\n", score.percent()));
        }
        output.push_str(&format!("  Total cost:  ${:.4}\n", response.total_cost));
        output.push_str(&format!("  Latency:     {:.0}ms\n", response.total_latency_ms));
        if response.cached {
            output.push_str(&format!("  {}\n", "Served from cache".dimmed()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(response: &CouncilResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Provider listing for `ai-council models`.
    pub fn format_providers(providers: &[ProviderReadiness]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n",
            format!("{:<10} {:<7} {}", "PROVIDER", "TYPE", "STATUS").bold()
        ));

        for readiness in providers {
            let status = if readiness.ready {
                "configured".green()
            } else {
                "not configured".red()
            };
            output.push_str(&format!(
                "{:<10} {:<7} {}\n",
                readiness.provider.as_str(),
                readiness.provider.kind_label(),
                status
            ));
        }

        let ready = providers.iter().filter(|p| p.ready).count();
        output.push_str(&format!(
            "\n{} of {} providers ready\n",
            ready,
            providers.len()
        ));
        output
    }

    /// Statistics block.
    pub fn format_stats(stats: &CouncilStats) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Statistics"));
        output.push_str(&format!("  Requests:        {}\n", stats.total_requests));
        output.push_str(&format!("  Cached answers:  {}\n", stats.cached_responses));
        output.push_str(&format!("  Total cost:      ${:.4}\n", stats.total_cost));
        output.push_str(&format!("  Avg latency:     {:.2}ms\n", stats.avg_latency_ms));
        output.push_str(&format!(
            "  Cache hit rate:  {:.2}% ({} hits, {} misses)\n",
            stats.cache.hit_rate, stats.cache.hits, stats.cache.misses
        ));
        for (provider, count) in &stats.requests_by_provider {
            output.push_str(&format!("  {:<16} {}\n", format!("{}:", provider), count));
        }
        output
    }

    fn provider_section(result: &GenerationResult) -> String {
        let title = format!("── {} ──", result.provider);
        match &result.error {
            None => format!(
                "\n{}\n{}\n{}\n",
                title.yellow().bold(),
                result.content,
                format!(
                    "({:.0}ms, {} in / {} out tokens, ${:.4})",
                    result.latency_ms, result.input_tokens, result.output_tokens, result.cost
                )
                .dimmed()
            ),
            Some(error) => format!(
                "\n{}\n{} {}\n",
                title.red().bold(),
                "Error:".red(),
                error
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
