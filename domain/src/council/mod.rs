//! The council: requests, per-provider results, consensus and rendering.
//!
//! - [`request::CouncilRequest`]: validated input
//! - [`result::GenerationResult`]: one provider's outcome
//! - [`response::CouncilResponse`]: aggregate result (cached and returned)
//! - [`consensus`]: lexical agreement score and verdicts
//! - [`aggregator::Aggregator`]: synthesis and debate rendering
//! - [`cache::CacheKey`]: request fingerprint

pub mod aggregator;
pub mod cache;
pub mod consensus;
pub mod mode;
pub mod request;
pub mod response;
pub mod result;
pub mod stats;
