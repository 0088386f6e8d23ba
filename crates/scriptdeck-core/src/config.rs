//! Configuration model
//!
//! Mirrors the front-end's `config.json`: a window section with declared
//! parameters and actions, plus the host section pointing at the
//! function-definition script. Keys are camelCase; every field is
//! defaulted so a minimal config stays minimal.
//!
//! File I/O (locating and reading the config file) belongs to the
//! caller; this module only defines the schema and the JSON parse.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SessionError};
use scriptdeck_core_types::ParamValue;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub host: HostConfig,
}

/// Window metadata and the declared parameters/actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub parameters: Vec<ParameterSpec>,
    pub actions: Vec<ActionSpec>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Scriptdeck".to_string(),
            window_width: 900,
            window_height: 600,
            parameters: Vec::new(),
            actions: Vec::new(),
        }
    }
}

/// One operator-editable parameter declared by the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSpec {
    /// Argument name passed to the host function
    pub name: String,
    /// Human-readable label shown next to the input
    pub label: String,
    /// Input kind; only "text" is currently defined
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial value
    pub default: ParamValue,
}

impl Default for ParameterSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            kind: "text".to_string(),
            default: ParamValue::Text(String::new()),
        }
    }
}

/// One declared action: a button bound to a host function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSpec {
    /// Display name of the action
    pub name: String,
    /// Host function the action invokes
    pub function_name: String,
    /// Reserved: sub-field selection before normalization. Parsed and
    /// retained but not consumed anywhere yet.
    pub result_field: String,
}

/// Host section: where the function definitions live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    /// Path to the function-definition script, resolved by the caller
    /// (relative paths are taken against the config file's directory)
    pub functions_script_path: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            functions_script_path: "./scripts/functions.ps1".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the text is not valid JSON for this schema.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SessionError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Find a declared action by display name.
    pub fn action(&self, name: &str) -> Option<&ActionSpec> {
        self.ui.actions.iter().find(|a| a.name == name)
    }

    /// Build the named-parameter list from the declared defaults,
    /// overridden by any caller-supplied values.
    pub fn parameter_values(
        &self,
        overrides: &[(String, ParamValue)],
    ) -> Vec<(String, ParamValue)> {
        self.ui
            .parameters
            .iter()
            .map(|p| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| *name == p.name)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_else(|| p.default.clone());
                (p.name.clone(), value)
            })
            .collect()
    }
}
