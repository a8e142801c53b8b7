//! Application-level configuration.
//!
//! - [`CouncilSettings`]: defaults applied to council requests

pub mod council_settings;

pub use council_settings::CouncilSettings;
