//! Progress display for council consultations

pub mod reporter;
