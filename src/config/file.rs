//! Configuration file management for focusrec.
//!
//! This module handles loading and saving application configuration from TOML
//! files. Configuration is stored in the user's config directory and written
//! out with defaults on first run, so the panel works out of the box.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Recorder backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Backend executable. A bare name is resolved against standard
    /// installation directories and PATH; an absolute path is used as-is.
    #[serde(default = "default_recorder_command")]
    pub command: String,
    /// Extra arguments passed to the backend on startup.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        RecorderConfig {
            command: default_recorder_command(),
            args: Vec::new(),
        }
    }
}

fn default_recorder_command() -> String {
    "focusrec-recorder".to_string()
}

/// Control panel display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// How many leading characters of the session id to show in the panel.
    #[serde(default = "default_session_id_prefix_len")]
    pub session_id_prefix_len: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            session_id_prefix_len: default_session_id_prefix_len(),
        }
    }
}

fn default_session_id_prefix_len() -> usize {
    8
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusrecConfig {
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub panel: PanelConfig,
}

impl FocusrecConfig {
    /// Loads configuration from the user's config directory, creating the
    /// file with defaults if it does not exist yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the config file cannot be read or written
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let config = FocusrecConfig::default();
            config.save()?;
            tracing::info!(
                "Created default configuration at {}",
                config_path.display()
            );
            return Ok(config);
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: FocusrecConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file, creating the directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not find home directory",
        )
    })?;
    let config_dir = home.join(".config").join("focusrec");

    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir.join("focusrec.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let config: FocusrecConfig = toml::from_str("").unwrap();
        assert_eq!(config.recorder.command, "focusrec-recorder");
        assert!(config.recorder.args.is_empty());
        assert_eq!(config.panel.session_id_prefix_len, 8);
    }

    #[test]
    fn test_partial_file_keeps_unlisted_defaults() {
        let config: FocusrecConfig = toml::from_str(
            r#"
            [recorder]
            command = "/opt/focusrec/bin/recorder"
            args = ["--profile", "compliance"]
            "#,
        )
        .unwrap();
        assert_eq!(config.recorder.command, "/opt/focusrec/bin/recorder");
        assert_eq!(config.recorder.args, vec!["--profile", "compliance"]);
        assert_eq!(config.panel.session_id_prefix_len, 8);
    }

    #[test]
    fn test_default_config_serializes() {
        let rendered = toml::to_string_pretty(&FocusrecConfig::default()).unwrap();
        assert!(rendered.contains("focusrec-recorder"));
    }
}
