//! Configuration file handling.
//!
//! Loaded from `$XDG_CONFIG_HOME/kirigami/inputmethod.toml`. The file is optional and
//! every field has a default, so a missing file behaves like an empty one.

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Well-known bus name of the compositor.
pub const DEFAULT_SERVICE: &str = "org.kde.KWin";
/// Object path the compositor exports the virtual keyboard interface on.
pub const DEFAULT_PATH: &str = "/org/kde/KWin";

/// Settings for the input method core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Virtual keyboard integration settings.
    pub virtual_keyboard: VirtualKeyboardConfig,
}

/// How the watcher reaches the compositor's virtual keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VirtualKeyboardConfig {
    /// Whether to talk to the compositor at all.
    pub mode: IntegrationMode,
    /// Bus the compositor is reachable on.
    pub bus: BusKind,
    /// Explicit bus address such as `unix:path=/run/user/1000/bus`; overrides `bus`.
    pub address: Option<String>,
    /// Well-known name owning the interface.
    pub service: String,
    /// Object path of the interface.
    pub path: String,
}

impl Default for VirtualKeyboardConfig {
    fn default() -> Self {
        VirtualKeyboardConfig {
            mode: IntegrationMode::default(),
            bus: BusKind::default(),
            address: None,
            service: DEFAULT_SERVICE.to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

/// Selects the [`crate::KeyboardIntegration`] built by [`crate::Kirigami`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMode {
    /// Connect to the compositor; fall back to the inert integration if that fails.
    #[default]
    Auto,
    /// Never connect; the watcher acts as a plain in-memory flag set.
    Disabled,
}

/// Which message bus to connect to.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// The user session bus.
    #[default]
    Session,
    /// The system bus.
    System,
}

impl Config {
    /// Default location of the configuration file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kirigami").join("inputmethod.toml"))
    }

    /// Loads the file at [`Config::default_path`], or defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loading input method config from {}", path.display());
                Self::from_toml_str(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No input method config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
