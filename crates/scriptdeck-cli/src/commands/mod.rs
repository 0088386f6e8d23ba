//! CLI command implementations and shared session plumbing.

use std::path::{Path, PathBuf};

use anyhow::Context;
use scriptdeck_core::AppConfig;
use scriptdeck_engine::host::PwshHost;
use scriptdeck_engine::Session;

pub mod actions;
pub mod check;
pub mod run;

/// Parsed configuration plus the directory it was loaded from, which
/// anchors relative script paths.
pub struct LoadedConfig {
    pub config: AppConfig,
    pub base_dir: PathBuf,
}

/// Read and parse the configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<LoadedConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading configuration file {}", path.display()))?;
    let config = AppConfig::from_json(&text)?;
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    Ok(LoadedConfig { config, base_dir })
}

impl LoadedConfig {
    /// The function script location; relative paths resolve against the
    /// config file's directory.
    pub fn script_path(&self) -> PathBuf {
        let configured = Path::new(&self.config.host.functions_script_path);
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.base_dir.join(configured)
        }
    }
}

/// Open a host session and load the configured function script into it.
pub async fn open_loaded_session(loaded: &LoadedConfig, shell: &str) -> anyhow::Result<Session> {
    let script_path = loaded.script_path();
    let source = std::fs::read_to_string(&script_path)
        .with_context(|| format!("reading function script {}", script_path.display()))?;

    let host = PwshHost::spawn_program(shell)?;
    let session = Session::open(Box::new(host))?;
    session.load_definitions(source).await?;
    tracing::debug!(script = %script_path.display(), "function script loaded");
    Ok(session)
}
