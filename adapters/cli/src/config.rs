//! Loading of planner settings from a TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use katamari_planner::PlannerConfig;

/// Reads the planner configuration, falling back to defaults without a file.
pub(crate) fn load(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(text: &str) -> Result<PlannerConfig> {
    Ok(toml::from_str(text)?)
}
