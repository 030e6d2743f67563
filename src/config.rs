use crate::error::{Error, Result};
use crate::graph::DefaultEnvironment;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "lockgraph.yml";

/// Scan settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Environment given to dependencies no root set claims.
    pub default_environment: DefaultEnvironment,
    /// Directory names never descended into when discovering lockfiles.
    pub skip_dirs: Vec<String>,
    /// Treat data-quality warnings as a failed scan.
    pub fail_on_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_environment: DefaultEnvironment::None,
            skip_dirs: vec!["node_modules".into(), ".git".into(), ".yarn".into()],
            fail_on_warnings: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&data).map_err(|e| Error::Config { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Load `explicit` if given, else `lockgraph.yml` in `root` if present,
    /// else defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let dir = if root.is_file() { root.parent().unwrap_or(root) } else { root };
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
