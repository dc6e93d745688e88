//! Configuration file support for Meridian
//!
//! Loads desk-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.meridianrc.json` in the project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_ASSESSED_BY: &str = "desk";
const DEFAULT_BRIEF_VERSION: &str = "1.0";
const DEFAULT_OUTPUT: &str = ".meridian/brief.html";

/// Meridian configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MeridianConfig {
    /// Block publication of content that trips safe-mode rules (default: false)
    #[serde(default)]
    pub safe_mode: Option<bool>,

    /// Default assessor recorded on risk assessments (default: "desk")
    #[serde(default)]
    pub assessed_by: Option<String>,

    /// Version string stamped on generated briefs (default: "1.0")
    #[serde(default)]
    pub brief_version: Option<String>,

    /// Output path for rendered brief HTML (default: `.meridian/brief.html`)
    #[serde(default)]
    pub output: Option<String>,
}

impl MeridianConfig {
    /// Validate field contents before resolution
    pub fn validate(&self) -> Result<()> {
        if let Some(ref assessed_by) = self.assessed_by {
            if assessed_by.trim().is_empty() {
                anyhow::bail!("assessedBy must not be empty");
            }
        }
        if let Some(ref version) = self.brief_version {
            if version.trim().is_empty() {
                anyhow::bail!("briefVersion must not be empty");
            }
        }
        if let Some(ref output) = self.output {
            if output.trim().is_empty() {
                anyhow::bail!("output must not be empty");
            }
        }
        Ok(())
    }

    /// Resolve config into its effective form, filling defaults
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            safe_mode: self.safe_mode.unwrap_or(false),
            assessed_by: self
                .assessed_by
                .clone()
                .unwrap_or_else(|| DEFAULT_ASSESSED_BY.to_string()),
            brief_version: self
                .brief_version
                .clone()
                .unwrap_or_else(|| DEFAULT_BRIEF_VERSION.to_string()),
            output: PathBuf::from(self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)),
            config_path: None,
        })
    }
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub safe_mode: bool,
    pub assessed_by: String,
    pub brief_version: String,
    pub output: PathBuf,
    /// Path of the config file this was loaded from, if any
    pub config_path: Option<PathBuf>,
}

/// Discover a config file in the project root
pub fn discover_config(project_root: &Path) -> Result<Option<(MeridianConfig, PathBuf)>> {
    let rc_path = project_root.join(".meridianrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<MeridianConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: MeridianConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file. Otherwise discovers
/// config from the project root. Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (MeridianConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
