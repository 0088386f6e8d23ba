//! Command-host capability contract
//!
//! The embedded execution host is an external collaborator; the engine
//! only depends on this narrow contract: register function definitions
//! from source text, invoke a registered function with named arguments,
//! release the context. Diagnostics come back as plain lines; the
//! session layer decides how they surface.

use scriptdeck_core_types::ParamValue;
use serde_json::Value;

pub mod pwsh;
pub mod testing;

pub use pwsh::PwshHost;
pub use testing::ScriptedHost;

/// Host-level result: failure carries the raw diagnostic lines.
pub type HostResult<T> = std::result::Result<T, Vec<String>>;

/// The capability contract an execution host must provide.
///
/// Implementations are driven from the session's single worker thread,
/// so methods take `&mut self` and need no internal locking. A method
/// may block; the session keeps caller threads free regardless.
pub trait CommandHost: Send {
    /// Parse and register all function definitions found in `source`.
    ///
    /// Re-registering with different text replaces earlier definitions.
    /// A failed load must leave the context usable for a corrected retry.
    ///
    /// # Errors
    ///
    /// Diagnostic lines from the parse/definition pass.
    fn load_definitions(&mut self, source: &str) -> HostResult<()>;

    /// Invoke a registered function with every entry of `args` bound as
    /// a named argument, returning the structured result records.
    ///
    /// # Errors
    ///
    /// Diagnostic lines; when any are reported, no records are returned.
    fn invoke(&mut self, function: &str, args: &[(String, ParamValue)]) -> HostResult<Vec<Value>>;

    /// Release the execution context. Must be safe to call repeatedly.
    fn shutdown(&mut self);
}
