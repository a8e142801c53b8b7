//! Use cases (application services)

pub mod ask_council;
