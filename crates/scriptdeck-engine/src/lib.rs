//! Scriptdeck Engine - Session orchestration layer
//!
//! Owns the long-lived execution context: the command-host capability
//! contract, the PowerShell subprocess adapter, and the serialized
//! session through which every load and invocation flows.

pub mod host;
pub mod request;
pub mod session;

pub use host::{CommandHost, HostResult};
pub use request::InvocationRequest;
pub use session::Session;
