//! Consensus scoring
//!
//! Lexical agreement between provider answers: each usable answer is
//! reduced to its set of lower-cased whitespace tokens and every unordered
//! pair is compared with the Jaccard index. The score is the mean over all
//! pairs.
//!
//! ```
//! use council_domain::council::consensus::{consensus, Verdict};
//! use council_domain::{Generation, GenerationResult, ProviderId};
//!
//! let a = GenerationResult::success(ProviderId::Claude, Generation::new("rain is water", 1, 1), 1.0, 0.0);
//! let b = GenerationResult::success(ProviderId::Gpt4, Generation::new("Rain is water", 1, 1), 1.0, 0.0);
//!
//! let score = consensus(&[a, b]).unwrap();
//! assert_eq!(score.value(), 1.0);
//! assert_eq!(score.verdict(), Verdict::BroadAgreement);
//! ```

use super::result::GenerationResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scores above this are "broad agreement".
pub const AGREEMENT_THRESHOLD: f64 = 0.7;

/// Scores above this (and not above [`AGREEMENT_THRESHOLD`]) are "complementary".
pub const COMPLEMENTARY_THRESHOLD: f64 = 0.4;

/// Normalized agreement between provider answers, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsensusScore(f64);

impl ConsensusScore {
    /// Full agreement; used when a single provider answered.
    pub const UNANIMOUS: ConsensusScore = ConsensusScore(1.0);

    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Score as a whole percentage, e.g. 0.734 -> 73
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn verdict(&self) -> Verdict {
        if self.0 > AGREEMENT_THRESHOLD {
            Verdict::BroadAgreement
        } else if self.0 > COMPLEMENTARY_THRESHOLD {
            Verdict::Complementary
        } else {
            Verdict::Divergent
        }
    }
}

/// Qualitative reading of a consensus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    BroadAgreement,
    Complementary,
    Divergent,
}

impl Verdict {
    /// Sentence used in the synthesis document
    pub fn synthesis_text(&self) -> &'static str {
        match self {
            Verdict::BroadAgreement => {
                "The providers are in broad agreement on the main points."
            }
            Verdict::Complementary => {
                "The providers offer complementary perspectives with some points of convergence."
            }
            Verdict::Divergent => {
                "The providers show significant divergence. Review the individual responses for details."
            }
        }
    }

    /// Sentence used in the debate transcript
    pub fn debate_text(&self) -> &'static str {
        match self {
            Verdict::BroadAgreement => "The participants are in broad agreement.",
            Verdict::Complementary => {
                "The participants offer complementary perspectives with nuances."
            }
            Verdict::Divergent => {
                "The positions show significant divergence; the question deserves a closer look."
            }
        }
    }
}

/// Results with non-empty content and no error, in input order.
pub fn usable(results: &[GenerationResult]) -> Vec<&GenerationResult> {
    results.iter().filter(|r| r.is_usable()).collect()
}

/// Consensus over the usable subset of `results`.
///
/// Returns `None` when nothing is usable, [`ConsensusScore::UNANIMOUS`] for
/// a single usable answer, and the mean pairwise Jaccard similarity otherwise.
pub fn consensus(results: &[GenerationResult]) -> Option<ConsensusScore> {
    let usable = usable(results);
    match usable.len() {
        0 => None,
        1 => Some(ConsensusScore::UNANIMOUS),
        _ => Some(pairwise_jaccard(
            usable.iter().map(|r| r.content.as_str()),
        )),
    }
}

fn token_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn pairwise_jaccard<'a>(texts: impl Iterator<Item = &'a str>) -> ConsensusScore {
    let sets: Vec<HashSet<String>> = texts.map(token_set).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..sets.len() {
        for j in (i + 1)..sets.len() {
            let union = sets[i].union(&sets[j]).count();
            if union == 0 {
                continue;
            }
            let intersection = sets[i].intersection(&sets[j]).count();
            total += intersection as f64 / union as f64;
            pairs += 1;
        }
    }

    if pairs == 0 {
        return ConsensusScore::new(0.0);
    }
    ConsensusScore::new(total / pairs as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::ProviderId;
    use crate::council::result::Generation;

    fn answer(provider: ProviderId, text: &str) -> GenerationResult {
        GenerationResult::success(provider, Generation::new(text, 1, 1), 10.0, 0.0)
    }

    #[test]
    fn test_no_usable_results() {
        let results = vec![
            GenerationResult::failure(ProviderId::Claude, "Timeout", 10.0),
            answer(ProviderId::Gpt4, ""),
        ];
        assert!(consensus(&results).is_none());
        assert!(consensus(&[]).is_none());
    }

    #[test]
    fn test_single_usable_is_unanimous() {
        let results = vec![
            answer(ProviderId::Claude, "water falls"),
            GenerationResult::failure(ProviderId::Gpt4, "boom", 1.0),
        ];
        assert_eq!(consensus(&results), Some(ConsensusScore::UNANIMOUS));
    }

    #[test]
    fn test_identical_text_scores_one() {
        let text = "Rain forms when water vapor condenses into droplets";
        let results = vec![answer(ProviderId::Claude, text), answer(ProviderId::Gpt4, text)];
        assert_eq!(consensus(&results).unwrap().value(), 1.0);
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        let results = vec![
            answer(ProviderId::Claude, "alpha beta gamma"),
            answer(ProviderId::Gpt4, "delta epsilon"),
        ];
        assert_eq!(consensus(&results).unwrap().value(), 0.0);
    }

    #[test]
    fn test_tokens_are_case_insensitive() {
        let results = vec![
            answer(ProviderId::Claude, "Hello World"),
            answer(ProviderId::Gpt4, "hello world"),
        ];
        assert_eq!(consensus(&results).unwrap().value(), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 shared out of 4
        let results = vec![
            answer(ProviderId::Claude, "a b c"),
            answer(ProviderId::Gpt4, "b c d"),
        ];
        assert!((consensus(&results).unwrap().value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_over_pairs() {
        // pairs: (x,x)=1.0, (x,y)=0.0, (x,y)=0.0 -> mean 1/3
        let results = vec![
            answer(ProviderId::Claude, "x"),
            answer(ProviderId::Gpt4, "x"),
            answer(ProviderId::Gemini, "y"),
        ];
        let score = consensus(&results).unwrap().value();
        assert!((score - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_whitespace_only_pairs_are_skipped() {
        let results = vec![
            answer(ProviderId::Claude, "   "),
            answer(ProviderId::Gpt4, "\n\t"),
        ];
        assert_eq!(consensus(&results).unwrap().value(), 0.0);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(ConsensusScore::new(1.7).value(), 1.0);
        assert_eq!(ConsensusScore::new(-0.2).value(), 0.0);
    }

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(ConsensusScore::new(0.71).verdict(), Verdict::BroadAgreement);
        assert_eq!(ConsensusScore::new(0.7).verdict(), Verdict::Complementary);
        assert_eq!(ConsensusScore::new(0.41).verdict(), Verdict::Complementary);
        assert_eq!(ConsensusScore::new(0.4).verdict(), Verdict::Divergent);
        assert_eq!(ConsensusScore::new(0.0).verdict(), Verdict::Divergent);
    }

    #[test]
    fn test_percent() {
        assert_eq!(ConsensusScore::new(0.734).percent(), 73);
        assert_eq!(ConsensusScore::UNANIMOUS.percent(), 100);
    }
}
