//! Application layer for ai-council
//!
//! This crate contains the orchestration use case, the result cache,
//! port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod cache;
pub mod config;
pub mod ports;
pub mod registry;
pub mod stats;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use cache::ResultCache;
pub use config::CouncilSettings;
pub use ports::{
    cache_store::{CacheStoreError, DurableCacheStore},
    clock::{Clock, SystemClock},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    generator::{Generator, GeneratorError},
    progress::{NoProgress, ProgressNotifier},
};
pub use registry::{GeneratorRegistry, ProviderReadiness};
pub use stats::RunningStats;
pub use use_cases::ask_council::{AskCouncilUseCase, NO_ACTIVE_PROVIDER};
