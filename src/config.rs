use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the meta-insight tools.
///
/// Controls display defaults, the redacted-copy naming marker, and export
/// behavior. Nothing here is required — every operation works with the
/// defaults — and nothing is written to disk unless the caller explicitly
/// saves.
///
/// # Loading
///
/// ```rust,no_run
/// use meta_insight::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.display.show_empty_fields = false;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display behavior for formatted metadata.
    pub display: DisplayConfig,
    /// Redacted-copy output naming.
    pub redaction: RedactionConfig,
    /// Export behavior.
    pub export: ExportConfig,
}

/// Display behavior for formatted metadata output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show fields whose value is the absent sentinel.
    pub show_empty_fields: bool,
}

/// Redacted-copy output naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Marker inserted between the file stem and extension of redacted
    /// copies, e.g. `photo.jpg` -> `photo_no_metadata.jpg`.
    pub output_marker: String,
}

/// Export behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default extension for export destinations given without one.
    pub default_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                show_empty_fields: true,
            },
            redaction: RedactionConfig {
                output_marker: "_no_metadata".to_string(),
            },
            export: ExportConfig {
                default_extension: "txt".to_string(),
            },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::debug!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}
