use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Versions;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per transfer (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1.0,
            max_delay_secs: 30,
        }
    }
}

/// Contents of `~/.config/distrib-dl/config.toml`. Every field is optional in
/// the file; missing ones take the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistribConfig {
    /// GnuPG home used for key import and verification (None = gpg's default).
    #[serde(default)]
    pub gpg_homedir: Option<PathBuf>,
    /// Absent section means `RetryPolicy::default()`.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Versioned template fields for every catalog recipe.
    #[serde(default)]
    pub versions: Versions,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("distrib-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load the user's config file, writing a default one on first run.
pub fn load_or_init() -> Result<DistribConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<DistribConfig> {
    if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return toml::from_str(&data).with_context(|| format!("parsing {}", path.display()));
    }

    let cfg = DistribConfig::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(&cfg)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("created default config at {}", path.display());
    Ok(cfg)
}
