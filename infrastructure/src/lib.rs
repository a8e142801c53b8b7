//! Infrastructure layer for ai-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider generators, the durable cache
//! tier, the JSONL audit trail, and configuration file loading.

pub mod cache;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use cache::FileCacheStore;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{ApiFormat, HttpGenerator, HttpTransport, build_registry};
