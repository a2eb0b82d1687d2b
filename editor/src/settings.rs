//! Editor settings management
//!
//! Persistent user preferences: theme, debug overlays, grid, gizmo snapping
//! and which windows are open.

use crate::theme::Theme;
use engine::graphics::DebugDrawFlags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Main editor settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub theme: Theme,
    pub debug_draw: DebugDrawFlags,
    pub show_grid: bool,
    pub show_gizmos: bool,
    pub snap_amount: f32,
    /// Window name to open flag; windows not listed keep their default
    pub open_windows: BTreeMap<String, bool>,

    /// Settings version for future migration support
    pub version: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            debug_draw: DebugDrawFlags::empty(),
            show_grid: true,
            show_gizmos: true,
            snap_amount: 1.0,
            open_windows: BTreeMap::new(),
            version: 1,
        }
    }
}

impl EditorSettings {
    /// Get the default path for the settings file
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("editor_settings.json")
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(Self::default_path())
    }

    /// Load settings from the default location. A missing or unreadable file
    /// gives the defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings file: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save settings to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved editor settings to {:?}", path);
        Ok(())
    }

    /// Load settings from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded editor settings from {:?}", path);
        Ok(settings)
    }
}
