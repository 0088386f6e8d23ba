//! Actions command
//!
//! Usage: scriptdeck --config <FILE> actions

use std::path::Path;

/// List the declared actions with the functions they invoke.
pub fn execute(config_path: &Path) -> anyhow::Result<()> {
    let loaded = super::load_config(config_path)?;

    if loaded.config.ui.actions.is_empty() {
        println!("(no actions declared)");
        return Ok(());
    }

    for action in &loaded.config.ui.actions {
        println!("{}  ->  {}", action.name, action.function_name);
    }
    Ok(())
}
