//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/wildlife-explorer/wildlife-explorer.toml`
//! 3. Local config: `<project_dir>/.wildlife-explorer.toml`
//! 4. Environment variables: `WILDEX_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, LabelConfig, DEFAULT_PAGE_SIZE};
use crate::domain::SiblingOrder;

const APP_NAME: &str = "wildlife-explorer";
const ENV_PREFIX: &str = "WILDEX";

/// Where the catalog comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// CSV source (default: data/animals.csv)
    pub source: PathBuf,
    /// Directory scanned for item images
    pub images_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/animals.csv"),
            images_dir: None,
        }
    }
}

/// Browsing behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Entries per carousel page
    pub page_size: usize,
    /// Order used for entries and sibling moves
    pub sibling_order: SiblingOrder,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sibling_order: SiblingOrder::default(),
        }
    }
}

/// Raw sections for intermediate parsing.
///
/// `None` means "not specified here, inherit from the layer below".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCatalogConfig {
    pub source: Option<PathBuf>,
    pub images_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExplorerConfig {
    pub page_size: Option<usize>,
    pub sibling_order: Option<SiblingOrder>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLabelConfig {
    pub root_title: Option<String>,
    pub resident_status: Option<String>,
    pub status_names: Option<BTreeMap<String, String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: RawCatalogConfig,
    pub explorer: RawExplorerConfig,
    pub labels: RawLabelConfig,
}

/// Unified configuration for wildlife-explorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub explorer: ExplorerConfig,
    pub labels: LabelConfig,
}

/// Get the XDG config directory for wildlife-explorer.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{APP_NAME}.toml")))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(format!(".{APP_NAME}.toml"))
}

/// Environment source for `WILDEX_*` overrides, e.g. `WILDEX_EXPLORER__PAGE_SIZE=8`.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl LabelConfig {
    /// Overlay wins per scalar; status names merge key by key.
    fn merge(&self, overlay: &RawLabelConfig) -> Self {
        let mut status_names = self.status_names.clone();
        if let Some(names) = &overlay.status_names {
            status_names.extend(names.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self {
            root_title: overlay
                .root_title
                .clone()
                .unwrap_or_else(|| self.root_title.clone()),
            resident_status: overlay
                .resident_status
                .clone()
                .unwrap_or_else(|| self.resident_status.clone()),
            status_names,
        }
    }

    /// Like `merge`, but a global status name table replaces the defaults.
    fn apply_global(&self, global: &RawLabelConfig) -> Self {
        let mut merged = self.merge(global);
        if let Some(names) = &global.status_names {
            merged.status_names = names.clone();
        }
        merged
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config and
    ///   for resolving relative paths
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (status name table REPLACES defaults)
    /// 3. Local config (status names merge with global)
    /// 4. Environment variables: `WILDEX_*` prefix
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), project_dir, env_source())
    }

    /// Load with an explicit global file and environment source.
    pub fn load_layers(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // 3. Project-local config
        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();
        if let Some(project) = project_dir {
            current.resolve_relative(project);
        }
        current.validate()?;

        Ok(current)
    }

    /// Merge overlay config onto self (base).
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: CatalogConfig {
                source: overlay
                    .catalog
                    .source
                    .clone()
                    .unwrap_or_else(|| self.catalog.source.clone()),
                images_dir: overlay
                    .catalog
                    .images_dir
                    .clone()
                    .or_else(|| self.catalog.images_dir.clone()),
            },
            explorer: ExplorerConfig {
                page_size: overlay.explorer.page_size.unwrap_or(self.explorer.page_size),
                sibling_order: overlay
                    .explorer
                    .sibling_order
                    .unwrap_or(self.explorer.sibling_order),
            },
            labels: self.labels.merge(&overlay.labels),
        }
    }

    /// Apply global config onto defaults.
    fn apply_global(&self, global: &RawSettings) -> Self {
        let mut merged = self.merge_with(global);
        merged.labels = self.labels.apply_global(&global.labels);
        merged
    }

    /// Apply WILDEX_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "catalog.source")? {
            settings.catalog.source = PathBuf::from(val);
        }
        if let Some(val) = env_value::<String>(&config, "catalog.images_dir")? {
            settings.catalog.images_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value::<String>(&config, "explorer.page_size")? {
            settings.explorer.page_size = val.trim().parse().map_err(|e| ApplicationError::Config {
                message: format!("explorer.page_size '{val}': {e}"),
            })?;
        }
        if let Some(val) = env_value::<String>(&config, "explorer.sibling_order")? {
            settings.explorer.sibling_order = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Some(val) = env_value::<String>(&config, "labels.root_title")? {
            settings.labels.root_title = val;
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.catalog.source = expand(&self.catalog.source);
        self.catalog.images_dir = self.catalog.images_dir.as_deref().map(expand);
    }

    fn resolve_relative(&mut self, project_dir: &Path) {
        if self.catalog.source.is_relative() {
            self.catalog.source = project_dir.join(&self.catalog.source);
        }
        if let Some(dir) = &self.catalog.images_dir {
            if dir.is_relative() {
                self.catalog.images_dir = Some(project_dir.join(dir));
            }
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.explorer.page_size == 0 {
            return Err(ApplicationError::Config {
                message: "explorer.page_size must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# wildlife-explorer configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/wildlife-explorer/wildlife-explorer.toml
#   Local:  <project_dir>/.wildlife-explorer.toml
#   Env:    WILDEX_* environment variables (e.g. WILDEX_EXPLORER__PAGE_SIZE=8)

[catalog]
# CSV source, relative to the project directory
# source = "data/animals.csv"

# Directory with item images named after the item (blue-jay.jpeg)
# images_dir = "assets/images"

[explorer]
# Entries per page
# page_size = 6

# "display" (folders first, natural name order) or "insertion"
# sibling_order = "display"

[labels]
# root_title = "Who Lives Here?"

# [labels.status_names]
# Native = "Year-Round Residents"
# Non-Native = "Just Passing Through"
# Invasive = "I Don't Belong Here"
"#
        .to_string()
    }
}

/// A missing key is `None`; anything else that fails is a config error.
fn env_value<T: serde::de::DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
