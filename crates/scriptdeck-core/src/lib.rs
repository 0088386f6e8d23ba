//! Scriptdeck Core - Result normalization and shared facilities
//!
//! This crate provides the pure heart of Scriptdeck:
//! - The raw-output record model returned by host invocations
//! - The result normalizer mapping shape-unknown output to a renderable form
//! - The canonical error facility with stable error codes
//! - The configuration model mirroring the front-end's config file
//! - The logging facility (tracing profiles)
//!
//! Everything here is I/O-free; the session engine and front-end layers
//! build on top of it.

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod normalize;
pub mod record;

// Re-export commonly used types
pub use config::{ActionSpec, AppConfig, HostConfig, ParameterSpec, UiConfig};
pub use errors::{Result, SessionError, SessionErrorKind};
pub use normalize::{normalize, DisplayResult, Pair};
pub use record::{stringify, RawOutput};
