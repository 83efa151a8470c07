// Application settings
// Loaded from ~/.config/safra/settings.toml

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file exists but cannot be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the two snapshot files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Product rows (`PRODUTO`, `COLHEITA`, `LOCAL`)
    pub products: PathBuf,
    /// Analysis rows (`RESULTADO` payloads)
    pub analyses: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            products: PathBuf::from("data/products.json"),
            analyses: PathBuf::from("data/analyses.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Links shown per analysis in the alerts view
    pub alerts_link_limit: usize,
    /// Links shown per analysis in the analyses view
    pub analyses_link_limit: usize,
    /// Rows listed by `products recent`
    pub recent_products_limit: usize,
    /// Shown in place of an empty origin
    pub origin_placeholder: String,
    /// Shown for a month with no products
    pub empty_month_label: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            alerts_link_limit: 3,
            analyses_link_limit: 5,
            recent_products_limit: 10,
            origin_placeholder: "Origem não informada".to_string(),
            empty_month_label: "Sem produtos".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
}

impl Settings {
    /// Get the default settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("safra")
            .join("settings.toml")
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// A missing file yields defaults. Relative data paths are resolved
    /// against the directory holding the settings file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::Read {
                    path,
                    message: "file not found".into(),
                });
            }
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let mut settings = Self::from_toml(&contents)?;

        if let Some(base) = path.parent() {
            settings.data.products = resolve(base, &settings.data.products);
            settings.data.analyses = resolve(base, &settings.data.analyses);
        }
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to TOML (printed by `safra config`)
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
