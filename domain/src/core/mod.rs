//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`]: text-generation providers that can sit on the council
//! - [`question::Question`]: a validated question to pose to the council
//! - [`error::DomainError`]: boundary validation errors

pub mod error;
pub mod provider;
pub mod question;
