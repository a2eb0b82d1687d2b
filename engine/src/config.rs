//! Engine configuration
//!
//! Stored as JSON next to the executable's working directory. The editor's
//! render API menu rewrites `render_api` here; the change takes effect on
//! the next start.

use crate::graphics::RenderApi;
use crate::io::Vfs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration for engine initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title
    pub window_title: String,
    /// Window size in physical pixels
    pub window_size: (u32, u32),
    /// Backend to start with
    pub render_api: RenderApi,
    /// Root directory for assets
    pub asset_root: PathBuf,
    /// Virtual directory name to physical directory, relative to `asset_root`
    /// unless absolute
    pub mounts: Vec<(String, PathBuf)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Editor".to_string(),
            window_size: (1600, 900),
            render_api: RenderApi::default(),
            asset_root: PathBuf::from("assets"),
            mounts: vec![
                ("Assets".to_string(), PathBuf::from(".")),
                ("Meshes".to_string(), PathBuf::from("meshes")),
                ("Scripts".to_string(), PathBuf::from("scripts")),
                ("Sounds".to_string(), PathBuf::from("sounds")),
                ("Textures".to_string(), PathBuf::from("textures")),
            ],
        }
    }
}

impl EngineConfig {
    /// Get the default path for the config file
    pub fn default_path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("engine_config.json")
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = ?path, "No engine config found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved engine config to {:?}", path);
        Ok(())
    }

    /// Change only the render API stored in the file at `path`, keeping every
    /// other setting as written there
    pub fn write_render_api<P: AsRef<Path>>(path: P, api: RenderApi) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let mut config = Self::load_or_default(path)?;
        config.render_api = api;
        config.save_to(path)?;
        debug!(api = %api, "Render API written to config");
        Ok(())
    }

    /// Build the virtual file system described by the mount table
    pub fn build_vfs(&self) -> Vfs {
        let mut vfs = Vfs::new();
        for (name, dir) in &self.mounts {
            let physical = if dir.is_absolute() {
                dir.clone()
            } else {
                self.asset_root.join(dir)
            };
            vfs.mount(name, physical);
        }
        vfs
    }
}
