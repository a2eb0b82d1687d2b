//! Virtual file system
//!
//! Maps virtual directories such as `/Assets` or `/Scripts` onto physical
//! directories. Virtual paths start with `/` followed by the mount name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("could not resolve {0} to a physical path")]
    Unresolved(String),
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Vfs {
    mounts: BTreeMap<String, Vec<PathBuf>>,
}

impl Vfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a physical directory under a virtual name (with or without the leading `/`).
    ///
    /// Several physical directories may share a mount; they are searched in
    /// the order they were mounted.
    pub fn mount(&mut self, virtual_name: &str, physical: impl Into<PathBuf>) {
        let name = virtual_name.trim_matches('/').to_string();
        let physical = physical.into();
        debug!(mount = %name, physical = ?physical, "Mounted virtual directory");
        self.mounts.entry(name).or_default().push(physical);
    }

    /// Mounted names with their physical directories
    pub fn mounts(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.mounts
            .iter()
            .map(|(name, dirs)| (name.as_str(), dirs.as_slice()))
    }

    /// Resolve a path to an existing physical file or directory.
    ///
    /// Paths not starting with `/` are physical and only checked for existence.
    /// A leading `/` selects the mount named by the first component; when no
    /// mount of that name exists the path is tried as a physical path.
    pub fn resolve_physical_path(&self, path: &str) -> Result<PathBuf, VfsError> {
        let Some(virtual_path) = path.strip_prefix('/') else {
            return existing(Path::new(path)).ok_or_else(|| VfsError::Unresolved(path.into()));
        };

        let (mount, remainder) = virtual_path
            .split_once('/')
            .unwrap_or((virtual_path, ""));

        if let Some(dirs) = self.mounts.get(mount) {
            for dir in dirs {
                let candidate = if remainder.is_empty() {
                    dir.clone()
                } else {
                    dir.join(remainder)
                };
                if let Some(found) = existing(&candidate) {
                    trace!(path, physical = ?found, "Resolved virtual path");
                    return Ok(found);
                }
            }
            return Err(VfsError::Unresolved(path.into()));
        }

        existing(Path::new(path)).ok_or_else(|| VfsError::Unresolved(path.into()))
    }

    /// Physical path for a file that may not exist yet (for writing)
    pub fn physical_path_for_write(&self, path: &str) -> Result<PathBuf, VfsError> {
        let Some(virtual_path) = path.strip_prefix('/') else {
            return Ok(PathBuf::from(path));
        };
        let (mount, remainder) = virtual_path
            .split_once('/')
            .unwrap_or((virtual_path, ""));
        match self.mounts.get(mount).and_then(|dirs| dirs.first()) {
            Some(dir) => Ok(dir.join(remainder)),
            None => Ok(PathBuf::from(path)),
        }
    }

    /// Turn a physical path under a mounted directory back into a virtual path
    pub fn to_virtual_path(&self, physical: &Path) -> Option<String> {
        self.mounts.iter().find_map(|(name, dirs)| {
            dirs.iter().find_map(|dir| {
                let relative = physical.strip_prefix(dir).ok()?;
                let relative = relative.to_string_lossy().replace('\\', "/");
                Some(if relative.is_empty() {
                    format!("/{name}")
                } else {
                    format!("/{name}/{relative}")
                })
            })
        })
    }

    pub fn read_text(&self, path: &str) -> Result<String, VfsError> {
        let physical = self.resolve_physical_path(path)?;
        std::fs::read_to_string(&physical).map_err(|source| VfsError::Io {
            path: physical,
            source,
        })
    }

    pub fn write_text(&self, path: &str, contents: &str) -> Result<PathBuf, VfsError> {
        let physical = self.physical_path_for_write(path)?;
        std::fs::write(&physical, contents).map_err(|source| VfsError::Io {
            path: physical.clone(),
            source,
        })?;
        Ok(physical)
    }
}

fn existing(path: &Path) -> Option<PathBuf> {
    path.exists().then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, Vfs) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::write(dir.path().join("scripts/main.lua"), "print('hi')").unwrap();

        let mut vfs = Vfs::new();
        vfs.mount("/Scripts", dir.path().join("scripts"));
        (dir, vfs)
    }

    #[test]
    fn test_resolve_mounted_file() {
        let (dir, vfs) = fixture();
        let physical = vfs.resolve_physical_path("/Scripts/main.lua").unwrap();
        assert_eq!(physical, dir.path().join("scripts/main.lua"));
        assert_eq!(vfs.read_text("/Scripts/main.lua").unwrap(), "print('hi')");
    }

    #[test]
    fn test_missing_file_under_mount_fails() {
        let (_dir, vfs) = fixture();
        let result = vfs.resolve_physical_path("/Scripts/other.lua");
        assert!(matches!(result, Err(VfsError::Unresolved(p)) if p == "/Scripts/other.lua"));
    }

    #[test]
    fn test_physical_paths_pass_through() {
        let (dir, vfs) = fixture();
        let absolute = dir.path().join("scripts/main.lua");
        let absolute = absolute.to_str().unwrap();
        assert_eq!(
            vfs.resolve_physical_path(absolute).unwrap(),
            PathBuf::from(absolute)
        );
        assert!(vfs.resolve_physical_path("relative/missing.txt").is_err());
    }

    #[test]
    fn test_second_mount_directory_is_searched() {
        let (dir, mut vfs) = fixture();
        std::fs::create_dir_all(dir.path().join("more")).unwrap();
        std::fs::write(dir.path().join("more/extra.lua"), "").unwrap();
        vfs.mount("Scripts", dir.path().join("more"));

        assert_eq!(
            vfs.resolve_physical_path("/Scripts/extra.lua").unwrap(),
            dir.path().join("more/extra.lua")
        );
    }

    #[test]
    fn test_write_then_to_virtual() {
        let (dir, vfs) = fixture();
        let physical = vfs.write_text("/Scripts/new.lua", "-- new").unwrap();
        assert_eq!(physical, dir.path().join("scripts/new.lua"));
        assert_eq!(
            vfs.to_virtual_path(&physical).as_deref(),
            Some("/Scripts/new.lua")
        );
        assert!(vfs.to_virtual_path(Path::new("/elsewhere/file")).is_none());
    }
}
