//! Domain layer for ai-council
//!
//! This crate contains the core business logic and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A question is fanned out to several text-generation providers at once.
//! Every provider's outcome (success or failure) is recorded as a
//! [`GenerationResult`], and the set is folded into a [`CouncilResponse`]:
//!
//! - **Synthesis** (default): one document with an excerpt per provider
//!   and a lexical consensus score
//! - **Detailed**: the raw per-provider answers only
//! - **Debate**: every answer in full, followed by an analysis section
//!
//! ## Caching
//!
//! Responses are content-addressed by [`CacheKey`], derived from the
//! normalized question, the provider set and the mode.

pub mod core;
pub mod council;
pub mod pricing;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    provider::ProviderId,
    question::{MAX_QUESTION_CHARS, Question},
};
pub use council::{
    aggregator::{Aggregation, Aggregator, NO_USABLE_DEBATE, NO_USABLE_SYNTHESIS},
    cache::{CacheEntry, CacheKey},
    consensus::{ConsensusScore, Verdict, consensus},
    mode::ResponseMode,
    request::{CouncilRequest, DEFAULT_TEMPERATURE, MAX_OUTPUT_TOKENS},
    response::CouncilResponse,
    result::{Generation, GenerationResult},
    stats::{CacheStats, CouncilStats},
};
pub use pricing::{Price, cost_for};
pub use prompt::PromptTemplate;
