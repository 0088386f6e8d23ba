use thiserror::Error;

/// Result type alias using SessionError
pub type Result<T> = std::result::Result<T, SessionError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and front-end display logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// The host process or context could not be started
    SessionOpenFailure,
    /// Function definitions failed to parse or register
    LoadError,
    /// An operation was attempted after the session was released
    SessionClosed,
    /// A function ran but the host reported diagnostics
    InvocationError,
    /// A request was rejected before reaching the host
    InvalidRequest,
    /// The configuration file could not be parsed
    ConfigError,
}

impl SessionErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            SessionErrorKind::SessionOpenFailure => "ERR_SESSION_OPEN_FAILURE",
            SessionErrorKind::LoadError => "ERR_LOAD",
            SessionErrorKind::SessionClosed => "ERR_SESSION_CLOSED",
            SessionErrorKind::InvocationError => "ERR_INVOCATION",
            SessionErrorKind::InvalidRequest => "ERR_INVALID_REQUEST",
            SessionErrorKind::ConfigError => "ERR_CONFIG",
        }
    }
}

/// Comprehensive error taxonomy for Scriptdeck session operations
///
/// Host-reported diagnostics are surfaced verbatim (joined lines), never
/// partially recovered. A failed load or invoke is fatal to that request
/// only: the session stays usable unless `close()` was called.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The execution host could not be started
    #[error("Failed to open host session: {message}")]
    SessionOpenFailure { message: String },

    /// Function definitions failed to parse or register
    #[error("Script definitions failed to load: {diagnostics}")]
    LoadError { diagnostics: String },

    /// The session was released; no further operations are possible
    #[error("Session is closed")]
    SessionClosed,

    /// The host executed the function but reported diagnostics
    #[error("Function '{function_name}' failed: {diagnostics}")]
    InvocationError {
        function_name: String,
        diagnostics: String,
    },

    /// The request was rejected before reaching the host
    #[error("Invalid invocation request: {reason}")]
    InvalidRequest { reason: String },

    /// The configuration file could not be parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SessionError {
    /// Get the error kind
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            SessionError::SessionOpenFailure { .. } => SessionErrorKind::SessionOpenFailure,
            SessionError::LoadError { .. } => SessionErrorKind::LoadError,
            SessionError::SessionClosed => SessionErrorKind::SessionClosed,
            SessionError::InvocationError { .. } => SessionErrorKind::InvocationError,
            SessionError::InvalidRequest { .. } => SessionErrorKind::InvalidRequest,
            SessionError::ConfigError { .. } => SessionErrorKind::ConfigError,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Build a LoadError from individual diagnostic lines
    pub fn load(diagnostics: &[String]) -> Self {
        SessionError::LoadError {
            diagnostics: diagnostics.join("\n"),
        }
    }

    /// Build an InvocationError from individual diagnostic lines
    pub fn invocation(function_name: impl Into<String>, diagnostics: &[String]) -> Self {
        SessionError::InvocationError {
            function_name: function_name.into(),
            diagnostics: diagnostics.join("\n"),
        }
    }
}

/// Conversion from serde_json::Error to SessionError
impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::ConfigError {
            message: err.to_string(),
        }
    }
}
