//! Progress notification port
//!
//! Defines the interface for reporting progress while the council is
//! being consulted.

use council_domain::ProviderId;

/// Callback for progress updates during a council fan-out
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, server logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once the active providers are known, before dispatch
    fn on_dispatch_start(&self, total: usize);

    /// Called as each provider finishes, in completion order
    fn on_provider_complete(&self, provider: &ProviderId, success: bool);

    /// Called when every provider has reached a terminal state
    fn on_dispatch_complete(&self);

    /// Called when the answer was served from the result cache
    fn on_cache_hit(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _total: usize) {}
    fn on_provider_complete(&self, _provider: &ProviderId, _success: bool) {}
    fn on_dispatch_complete(&self) {}
}
