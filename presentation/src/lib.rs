//! Presentation layer for ai-council
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, the HTTP API and the MCP server.

pub mod cli;
pub mod mcp;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{AskArgs, Cli, Command, OutputFormat, ServeArgs};
pub use mcp::CouncilMcpServer;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{AppState, RateLimiter};
