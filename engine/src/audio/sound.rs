//! Sound assets and the named sound library

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("failed to read sound file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),
    #[error("{path} is not a valid {format:?} file")]
    InvalidData { path: PathBuf, format: SoundFormat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    Ogg,
    Wav,
}

impl SoundFormat {
    /// Format for a file extension (case sensitive, lowercase only)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "ogg" => Some(SoundFormat::Ogg),
            "wav" => Some(SoundFormat::Wav),
            _ => None,
        }
    }

    fn matches_header(self, data: &[u8]) -> bool {
        match self {
            SoundFormat::Ogg => data.starts_with(b"OggS"),
            SoundFormat::Wav => {
                data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE"
            }
        }
    }
}

/// Encoded sound data held in memory; decoding belongs to the audio backend
#[derive(Debug)]
pub struct Sound {
    pub name: String,
    pub path: PathBuf,
    pub format: SoundFormat,
    data: Vec<u8>,
}

impl Sound {
    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, SoundError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let format = SoundFormat::from_extension(extension)
            .ok_or_else(|| SoundError::UnsupportedFormat(extension.to_string()))?;

        let data = std::fs::read(path).map_err(|source| SoundError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !format.matches_header(&data) {
            return Err(SoundError::InvalidData {
                path: path.to_path_buf(),
                format,
            });
        }

        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            format,
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Sounds loaded by name
#[derive(Debug, Default)]
pub struct SoundLibrary {
    sounds: HashMap<String, Arc<Sound>>,
}

impl SoundLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a sound from disk and register it under `name`, replacing any
    /// sound previously registered with that name
    pub fn load(&mut self, name: &str, path: &Path) -> Result<Arc<Sound>, SoundError> {
        let sound = Arc::new(Sound::load(name, path)?);
        info!(name, path = ?path, bytes = sound.size_bytes(), "Sound loaded");
        if self.sounds.insert(name.to_string(), sound.clone()).is_some() {
            debug!(name, "Replaced previously loaded sound");
        }
        Ok(sound)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Sound>> {
        self.sounds.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sounds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn write_test_wav(path: &Path) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&36u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(&[0; 32]);
    std::fs::write(path, bytes).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("click.wav");
        write_test_wav(&path);

        let mut library = SoundLibrary::new();
        let sound = library.load("click.wav", &path).unwrap();

        assert_eq!(sound.format, SoundFormat::Wav);
        assert!(library.contains("click.wav"));
        assert_eq!(library.get("click.wav").unwrap().size_bytes(), 44);
        assert_eq!(library.names(), vec!["click.wav"]);
    }

    #[test]
    fn test_rejects_bad_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.ogg");
        std::fs::write(&path, b"not an ogg stream").unwrap();

        let mut library = SoundLibrary::new();
        let result = library.load("noise.ogg", &path);
        assert!(matches!(result, Err(SoundError::InvalidData { .. })));
        assert!(library.is_empty());
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let mut library = SoundLibrary::new();
        let result = library.load("song", Path::new("song.mp3"));
        assert!(matches!(result, Err(SoundError::UnsupportedFormat(ext)) if ext == "mp3"));
    }

    #[test]
    fn test_missing_file() {
        let mut library = SoundLibrary::new();
        let result = library.load("gone", Path::new("/missing/gone.wav"));
        assert!(matches!(result, Err(SoundError::Io { .. })));
    }
}
