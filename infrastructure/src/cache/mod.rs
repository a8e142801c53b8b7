//! Durable cache tier adapters.

mod file_store;

pub use file_store::FileCacheStore;
