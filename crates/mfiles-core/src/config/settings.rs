//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::fs::listing::ListingOptions;

/// Top-level application configuration.
///
/// All fields have sensible defaults so mFiles works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Listing options seeded from `[general]`.
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            hide_hidden: self.general.hide_hidden,
            hidden_prefix: self.general.hidden_prefix.clone(),
            sort_by_name: self.general.sort_by_name,
        }
    }
}

/// General file-browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory shown at startup. A command-line path wins over this.
    #[serde(default)]
    pub initial_directory: Option<PathBuf>,
    #[serde(default)]
    pub hide_hidden: bool,
    #[serde(default = "default_hidden_prefix")]
    pub hidden_prefix: String,
    #[serde(default = "default_true")]
    pub sort_by_name: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            initial_directory: None,
            hide_hidden: false,
            hidden_prefix: default_hidden_prefix(),
            sort_by_name: true,
        }
    }
}

/// Window preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// `"WIDTHxHEIGHT"`.
    #[serde(default = "default_window_size")]
    pub window_size: String,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
}

impl UiConfig {
    /// Parses `window_size` into `(width, height)`. `None` if malformed.
    pub fn window_size(&self) -> Option<(u16, u16)> {
        let (w, h) = self.window_size.trim().split_once(['x', 'X'])?;
        let width = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        Some((width, height))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            font_size: default_font_size(),
        }
    }
}

/// External editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Extensions (without the dot, case-insensitive) opened in the editor.
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,
    /// Editor program. Falls back to `$EDITOR`, then `vim`.
    #[serde(default)]
    pub command: Option<String>,
}

impl EditorConfig {
    /// The editor program to launch.
    pub fn resolve_command(&self) -> String {
        self.command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| std::env::var("EDITOR").ok().filter(|c| !c.trim().is_empty()))
            .unwrap_or_else(|| "vim".to_string())
    }

    /// [`resolve_command`](Self::resolve_command) split on whitespace into
    /// program and leading arguments, e.g. `code --wait`.
    pub fn resolve_argv(&self) -> Vec<String> {
        self.resolve_command()
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
            command: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_hidden_prefix() -> String {
    ".".to_string()
}

fn default_window_size() -> String {
    "400x400".to_string()
}

fn default_font_size() -> u16 {
    12
}

fn default_text_extensions() -> Vec<String> {
    ["txt", "csv", "json", "py"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
