//! In-process host double for tests
//!
//! `ScriptedHost` implements the [`CommandHost`] contract without any
//! child process: functions are Rust closures registered up front,
//! loads can be scripted to fail with canned diagnostics, and every
//! invocation's start/end instants are recorded so tests can assert the
//! session's serialization guarantee.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::Value;

use super::{CommandHost, HostResult};
use scriptdeck_core_types::ParamValue;

type HostFn = Box<dyn FnMut(&[(String, ParamValue)]) -> HostResult<Vec<Value>> + Send>;

/// One observed invocation, for assertions on ordering and overlap.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub function: String,
    pub started: Instant,
    pub ended: Instant,
}

/// Shared view of the calls a [`ScriptedHost`] has served.
pub type CallLog = Arc<Mutex<Vec<CallRecord>>>;

/// Scriptable in-process execution host.
#[derive(Default)]
pub struct ScriptedHost {
    functions: HashMap<String, HostFn>,
    load_failures: VecDeque<Vec<String>>,
    loaded_sources: Vec<String>,
    latency: Duration,
    calls: CallLog,
    shut_down: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under `name`.
    pub fn register<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&[(String, ParamValue)]) -> HostResult<Vec<Value>> + Send + 'static,
    {
        self.functions.insert(name.into(), Box::new(f));
        self
    }

    /// Make the next `load_definitions` call fail with these diagnostics.
    /// Queued failures are consumed in order; later loads succeed again.
    pub fn fail_next_load(mut self, diagnostics: Vec<String>) -> Self {
        self.load_failures.push_back(diagnostics);
        self
    }

    /// Hold every invocation for `latency` before answering, widening
    /// the window an overlap would need to slip through.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Handle on the call log, cloneable before the host moves into a
    /// session.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    /// Source texts accepted by successful loads, in order.
    pub fn loaded_sources(&self) -> &[String] {
        &self.loaded_sources
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl CommandHost for ScriptedHost {
    fn load_definitions(&mut self, source: &str) -> HostResult<()> {
        if let Some(diagnostics) = self.load_failures.pop_front() {
            return Err(diagnostics);
        }
        self.loaded_sources.push(source.to_string());
        Ok(())
    }

    fn invoke(&mut self, function: &str, args: &[(String, ParamValue)]) -> HostResult<Vec<Value>> {
        let started = Instant::now();
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let result = match self.functions.get_mut(function) {
            Some(f) => f(args),
            None => Err(vec![format!(
                "The term '{}' is not recognized as a name of a cmdlet, function, \
                 script file, or executable program.",
                function
            )]),
        };

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(CallRecord {
                function: function.to_string(),
                started,
                ended: Instant::now(),
            });
        }
        result
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registered_function_answers() {
        let mut host = ScriptedHost::new().register("Get-Thing", |_| Ok(vec![json!({"A": 1})]));
        let records = host.invoke("Get-Thing", &[]).unwrap();
        assert_eq!(records, vec![json!({"A": 1})]);
    }

    #[test]
    fn test_unknown_function_reports_diagnostic() {
        let mut host = ScriptedHost::new();
        let diags = host.invoke("Missing-Fn", &[]).unwrap_err();
        assert!(diags[0].contains("'Missing-Fn'"));
    }

    #[test]
    fn test_scripted_load_failure_is_consumed() {
        let mut host = ScriptedHost::new().fail_next_load(vec!["syntax error".to_string()]);
        assert!(host.load_definitions("broken {").is_err());
        assert!(host.load_definitions("function Ok {}").is_ok());
        assert_eq!(host.loaded_sources(), ["function Ok {}"]);
    }

    #[test]
    fn test_call_log_records_invocations() {
        let mut host = ScriptedHost::new().register("F", |_| Ok(vec![]));
        let log = host.call_log();
        host.invoke("F", &[]).unwrap();
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function, "F");
        assert!(calls[0].ended >= calls[0].started);
    }
}
