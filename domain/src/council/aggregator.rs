//! Aggregation of provider results into the requested output shape.
//!
//! Pure functions over a completed result set. Nothing here performs I/O
//! or mutates its inputs.

use super::consensus::{ConsensusScore, consensus, usable};
use super::mode::ResponseMode;
use super::result::GenerationResult;
use crate::util::truncate_chars;

/// Excerpt length per provider in a synthesis, in characters.
pub const EXCERPT_CHARS: usize = 500;

/// Returned by a synthesis when no provider produced usable text.
pub const NO_USABLE_SYNTHESIS: &str = "No provider was able to produce a usable response.";

/// Returned by a debate when no provider produced usable text.
pub const NO_USABLE_DEBATE: &str = "No provider was able to take part in the debate.";

/// What the aggregator produced for a request
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Rendered document (absent in Detailed mode)
    pub synthesis: Option<String>,
    /// Consensus score, present only when at least two providers were usable
    pub consensus_score: Option<ConsensusScore>,
}

/// Folds provider results into a synthesis, a debate, or nothing (Detailed)
pub struct Aggregator;

impl Aggregator {
    /// Route to the renderer for `mode` and score consensus.
    pub fn aggregate(mode: ResponseMode, question: &str, results: &[GenerationResult]) -> Aggregation {
        if !mode.renders_document() {
            return Aggregation {
                synthesis: None,
                consensus_score: None,
            };
        }

        let consensus_score = if usable(results).len() >= 2 {
            consensus(results)
        } else {
            None
        };

        Aggregation {
            synthesis: Self::render(mode, question, results),
            consensus_score,
        }
    }

    /// Render the document for `mode`; `None` for Detailed.
    pub fn render(mode: ResponseMode, question: &str, results: &[GenerationResult]) -> Option<String> {
        match mode {
            ResponseMode::Synthesis => Some(Self::synthesize(question, results)),
            ResponseMode::Debate => Some(Self::debate(question, results)),
            ResponseMode::Detailed => None,
        }
    }

    /// Unified synthesis with a truncated excerpt per provider.
    pub fn synthesize(question: &str, results: &[GenerationResult]) -> String {
        let usable = usable(results);

        match usable.as_slice() {
            [] => NO_USABLE_SYNTHESIS.to_string(),
            [only] => format!("**Response from {}:**\n\n{}", only.provider, only.content),
            _ => {
                let mut parts: Vec<String> = Vec::new();
                parts.push("## Council Synthesis\n".to_string());
                parts.push(format!("**Question:** {}\n", question));
                parts.push(format!("**Providers consulted:** {}\n", provider_list(&usable)));
                parts.push("---\n".to_string());

                parts.push("### Key points by provider\n".to_string());
                for result in &usable {
                    let (excerpt, truncated) = truncate_chars(&result.content, EXCERPT_CHARS);
                    let ellipsis = if truncated { "..." } else { "" };
                    parts.push(format!("**{}:** {}{}\n", result.provider, excerpt, ellipsis));
                }

                let score = consensus(results).unwrap_or(ConsensusScore::UNANIMOUS);
                parts.push(format!("\n### Consensus: {}%\n", score.percent()));
                parts.push(format!("{}\n", score.verdict().synthesis_text()));

                parts.join("\n")
            }
        }
    }

    /// Debate transcript with every usable answer in full.
    pub fn debate(question: &str, results: &[GenerationResult]) -> String {
        let usable = usable(results);
        if usable.is_empty() {
            return NO_USABLE_DEBATE.to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        parts.push("## Council Debate\n".to_string());
        parts.push(format!("**Topic:** {}\n", question));
        parts.push(format!("**Participants:** {}\n", provider_list(&usable)));
        parts.push("---\n".to_string());

        for result in &usable {
            parts.push(format!("### {}\n", result.provider));
            parts.push(format!("{}\n", result.content));
            parts.push("---\n".to_string());
        }

        let score = consensus(results).unwrap_or(ConsensusScore::UNANIMOUS);
        parts.push("\n### Debate analysis\n".to_string());
        parts.push(format!("**Consensus score:** {}%\n", score.percent()));
        parts.push(format!("**Verdict:** {}\n", score.verdict().debate_text()));

        parts.join("\n")
    }
}

fn provider_list(results: &[&GenerationResult]) -> String {
    results
        .iter()
        .map(|r| r.provider.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
