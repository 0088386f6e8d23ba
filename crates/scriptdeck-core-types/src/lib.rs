//! Core types shared across Scriptdeck facilities
//!
//! This crate provides foundational types used by the session engine,
//! the normalization core, and the front-end glue:
//!
//! - **Correlation types**: RequestId for tying log lines to one session request
//! - **Boundary values**: ParamValue, the primitive-only parameter type

pub mod correlation;
pub mod params;

pub use correlation::RequestId;
pub use params::ParamValue;
