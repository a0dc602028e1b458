//! Configuration file loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::error::{KeyshellError, Result};

impl Config {
    /// Get the explicit ~/.config/keyshell/keyshell.kdl path (XDG-style, cross-platform)
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config/keyshell/keyshell.kdl"))
    }

    /// Get the list of config file search paths in priority order
    fn get_config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. ./keyshell.kdl (current directory - project-local config wins)
        paths.push(PathBuf::from("keyshell.kdl"));

        // 2. ~/.config/keyshell/keyshell.kdl
        if let Some(xdg_path) = Self::xdg_config_path() {
            paths.push(xdg_path);
        }

        // 3. Platform-native config directory, unless identical to the XDG path
        if let Some(config_dir) = dirs::config_dir() {
            let native_path = config_dir.join("keyshell/keyshell.kdl");
            if Self::xdg_config_path().as_ref() != Some(&native_path) {
                paths.push(native_path);
            }
        }

        paths
    }

    /// Find existing config file by searching all standard locations
    pub fn find_existing_config() -> Option<PathBuf> {
        Self::get_config_search_paths()
            .into_iter()
            .find(|path| path.exists())
    }

    /// Parse configuration from KDL text. `name` only labels parse errors.
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        knuffel::parse::<Config>(name, content).map_err(|e| KeyshellError::config(e.to_string()))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KeyshellError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&path.to_string_lossy(), &content)
    }

    /// Load configuration from keyshell.kdl, searching the standard locations.
    /// Falls back to built-in defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::find_existing_config() {
            Some(path) => {
                debug!("loading config from {}", path.display());
                Self::load_from_path(&path)
            }
            None => Ok(Config::default()),
        }
    }
}
