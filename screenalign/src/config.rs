use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PROGRAM: &str = "xrandr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output the layouts are computed relative to. Detected when unset.
    pub internal: Option<String>,
    pub xrandr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            internal: None,
            xrandr: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("screenalign").join("config.json"))
    }

    /// An explicit path must exist. Without one, the default location is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn with_overrides(mut self, internal: Option<String>, xrandr: Option<String>) -> Self {
        if internal.is_some() {
            self.internal = internal;
        }
        if let Some(xrandr) = xrandr {
            self.xrandr = xrandr;
        }
        self
    }
}
