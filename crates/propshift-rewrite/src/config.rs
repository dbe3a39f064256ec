//! Migration configuration.
//!
//! Resolution order (highest priority first):
//! 1. An explicit config file (`--config`)
//! 2. `propshift.toml` in the target directory
//! 3. Compiled defaults (`CButton` → `Button` with color mapping)
//!
//! Any table left out of a config file keeps its default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::colors::ColorMapping;

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = "propshift.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Components to migrate, applied in order.
    pub components: Vec<ComponentRule>,
    pub colors: ColorMapping,
    pub walk: WalkConfig,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            components: vec![ComponentRule {
                from: "CButton".to_string(),
                to: "Button".to_string(),
                map_colors: true,
                props: BTreeMap::new(),
                imports: Some(ImportRule {
                    source: "@coreui/react".to_string(),
                    target: "@chakra-ui/react".to_string(),
                }),
            }],
            colors: ColorMapping::default(),
            walk: WalkConfig::default(),
        }
    }
}

/// One legacy component and what it becomes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentRule {
    pub from: String,
    pub to: String,
    /// Run the `color`/`variant` → `variant`/`colorScheme` mapping.
    #[serde(default)]
    pub map_colors: bool,
    /// Attribute renames, old name → new name.
    #[serde(default)]
    pub props: BTreeMap<String, String>,
    #[serde(default)]
    pub imports: Option<ImportRule>,
}

/// Modules the component is imported from before and after migration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportRule {
    pub source: String,
    pub target: String,
}

/// Which files a directory walk picks up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// File extensions, without the dot.
    pub extensions: Vec<String>,
    /// Directory names never descended into. Hidden directories are always
    /// skipped.
    pub exclude_dirs: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            extensions: ["js", "jsx", "ts", "tsx"].map(String::from).to_vec(),
            exclude_dirs: vec!["node_modules".to_string()],
        }
    }
}

impl WalkConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

impl MigrationConfig {
    /// Parse a TOML config. `path` is only used in error messages.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Resolve the config for a run over `root`.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let project = root.join(CONFIG_FILE_NAME);
        if project.is_file() {
            return Self::load(&project);
        }
        Ok(Self::default())
    }
}
