//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod cache_store;
pub mod clock;
pub mod conversation_logger;
pub mod generator;
pub mod progress;
