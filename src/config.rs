//! Configuration for overlays, playback monitoring and comment providers.
//!
//! Stored as TOML at `<config dir>/ytstamps/config.toml`. Every field has a
//! default, so a partial (or missing) file is fine.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "YTSTAMPS_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub overlay: OverlayConfig,
    pub playback: PlaybackConfig,
    pub provider: ProviderConfig,
}

/// Live overlay timing and layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How long an overlay stays fully visible (ms)
    pub display_ms: u64,
    /// Length of the exit transition before unmount (ms)
    pub fade_ms: u64,
    /// Maximum overlays on screen at once
    pub max_concurrent: usize,
    /// Offset of the first slot from the container top (px)
    pub base_offset_px: u32,
    /// Distance between slots (px)
    pub slot_spacing_px: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            display_ms: 4000,
            fade_ms: 500,
            max_concurrent: 3,
            base_offset_px: 80,
            slot_spacing_px: 72,
        }
    }
}

impl OverlayConfig {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Playback monitoring thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// A comment is due when playback is within this many seconds of it
    pub tolerance_secs: f64,
    /// Position changes smaller than this are treated as noise
    pub jitter_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: 0.5,
            jitter_secs: 0.1,
        }
    }
}

/// Where comments come from when no file is given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Directory of `<video_id>.json` files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_dir: Option<PathBuf>,
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("ytstamps").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Reject values the scheduler and monitor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.overlay.max_concurrent == 0 {
            bail!("overlay.max_concurrent must be at least 1");
        }
        let PlaybackConfig {
            tolerance_secs,
            jitter_secs,
        } = self.playback;
        if !tolerance_secs.is_finite() || tolerance_secs < 0.0 {
            bail!("playback.tolerance_secs must be a non-negative number");
        }
        if !jitter_secs.is_finite() || jitter_secs < 0.0 {
            bail!("playback.jitter_secs must be a non-negative number");
        }
        Ok(())
    }
}

/// Outcome of `migrate_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist before
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every field missing from `content` with its default value.
///
/// Existing values, comments and ordering are preserved.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Failed to parse config as TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?.parse()?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, item) in defaults.iter() {
        let Some(default_table) = item.as_table() else {
            continue;
        };
        if default_table.is_empty() {
            continue;
        }
        if !doc.contains_key(section) {
            doc.insert(section, Item::Table(Table::new()));
            sections_added.push(section.to_string());
        }
        let Some(table) = doc[section].as_table_mut() else {
            continue;
        };
        for (key, value) in default_table.iter() {
            if !table.contains_key(key) {
                table.insert(key, value.clone());
                added_fields.push(format!("{}.{}", section, key));
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
