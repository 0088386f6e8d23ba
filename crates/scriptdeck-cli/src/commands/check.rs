//! Check command
//!
//! Usage: scriptdeck --config <FILE> check
//!
//! Opens the host session and loads the function script, surfacing any
//! load diagnostics without running anything.

use std::path::Path;

pub async fn execute(config_path: &Path, shell: &str) -> anyhow::Result<()> {
    let loaded = super::load_config(config_path)?;
    let session = super::open_loaded_session(&loaded, shell).await?;
    session.close();

    println!(
        "✓ Loaded {} ({} actions declared)",
        loaded.script_path().display(),
        loaded.config.ui.actions.len()
    );
    Ok(())
}
