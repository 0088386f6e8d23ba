//! Run command
//!
//! Usage: scriptdeck --config <FILE> run <ACTION> [--param name=value ...]

use std::path::Path;

use anyhow::{anyhow, bail};
use clap::Args;
use scriptdeck_core::normalize;
use scriptdeck_core_types::ParamValue;
use scriptdeck_engine::InvocationRequest;

use crate::render;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Display name of the declared action to run
    pub action: String,

    /// Override a declared parameter, as name=value (repeatable)
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

pub async fn execute(config_path: &Path, shell: &str, args: RunArgs) -> anyhow::Result<()> {
    let loaded = super::load_config(config_path)?;

    let Some(action) = loaded.config.action(&args.action) else {
        bail!(
            "unknown action '{}'; declared actions: {}",
            args.action,
            loaded
                .config
                .ui
                .actions
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let overrides = args
        .params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let parameters = loaded.config.parameter_values(&overrides);

    let request =
        InvocationRequest::new(action.function_name.clone())?.with_parameters(parameters);
    let function_name = action.function_name.clone();

    let session = super::open_loaded_session(&loaded, shell).await?;
    let outcome = session.invoke(request).await;
    session.close();

    let raw = outcome?;
    tracing::debug!(%function_name, records = raw.len(), "action completed");

    print!("{}", render::render(&normalize(&raw)));
    Ok(())
}

/// Split a `name=value` override into a named parameter.
fn parse_param(raw: &str) -> anyhow::Result<(String, ParamValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("parameter override '{}' is not of the form name=value", raw))?;
    if name.is_empty() {
        bail!("parameter override '{}' has an empty name", raw);
    }
    Ok((name.to_string(), ParamValue::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_splits_on_first_equals() {
        let (name, value) = parse_param("Filter=a=b").unwrap();
        assert_eq!(name, "Filter");
        assert_eq!(value, ParamValue::from("a=b"));
    }

    #[test]
    fn test_parse_param_rejects_missing_equals() {
        assert!(parse_param("just-a-name").is_err());
    }

    #[test]
    fn test_parse_param_rejects_empty_name() {
        assert!(parse_param("=value").is_err());
    }
}
