//! Invocation requests
//!
//! One request names a registered function and carries the named
//! parameters to bind. Validation happens here, before anything reaches
//! the session queue.

use scriptdeck_core::errors::{Result, SessionError};
use scriptdeck_core_types::ParamValue;

/// A single invocation: function name plus ordered named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    function_name: String,
    parameters: Vec<(String, ParamValue)>,
}

impl InvocationRequest {
    /// Create a request for `function_name`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the name is empty or whitespace-only.
    pub fn new(function_name: impl Into<String>) -> Result<Self> {
        let function_name = function_name.into();
        if function_name.trim().is_empty() {
            return Err(SessionError::InvalidRequest {
                reason: "function name must not be empty".to_string(),
            });
        }
        Ok(Self {
            function_name,
            parameters: Vec::new(),
        })
    }

    /// Bind one named parameter, preserving insertion order.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Bind a batch of named parameters.
    pub fn with_parameters(mut self, params: Vec<(String, ParamValue)>) -> Self {
        self.parameters.extend(params);
        self
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn parameters(&self) -> &[(String, ParamValue)] {
        &self.parameters
    }
}
