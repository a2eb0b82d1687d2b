//! File classification for the File > Open dispatch and the asset browser

/// Extensions opened in the text editor window
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "glsl", "shader", "vert", "frag", "lua", "Lua", "wgsl",
];

/// Extensions handed to the model loader
pub const MODEL_EXTENSIONS: &[&str] = &["obj", "gltf", "glb", "fbx", "FBX"];

/// Extensions loaded into the sound library
pub const AUDIO_EXTENSIONS: &[&str] = &["ogg", "wav"];

/// What the editor does with a file when it is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Model,
    Audio,
    Unknown,
}

impl FileKind {
    /// Classify by extension. Matching is case sensitive.
    pub fn from_path(path: &str) -> Self {
        match engine::utils::paths::extension(path) {
            Some(extension) => Self::from_extension(&extension),
            None => FileKind::Unknown,
        }
    }

    pub fn from_extension(extension: &str) -> Self {
        if TEXT_EXTENSIONS.contains(&extension) {
            FileKind::Text
        } else if MODEL_EXTENSIONS.contains(&extension) {
            FileKind::Model
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            FileKind::Audio
        } else {
            FileKind::Unknown
        }
    }

    /// Short label shown next to files in the asset browser
    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Text => "[T]",
            FileKind::Model => "[M]",
            FileKind::Audio => "[A]",
            FileKind::Unknown => "[ ]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_files() {
        assert_eq!(FileKind::from_path("/Scripts/player.lua"), FileKind::Text);
        assert_eq!(FileKind::from_path("/Scripts/player.Lua"), FileKind::Text);
        assert_eq!(FileKind::from_path("shaders/sky.wgsl"), FileKind::Text);
        assert_eq!(FileKind::from_path("notes.txt"), FileKind::Text);
    }

    #[test]
    fn test_model_and_audio_files() {
        assert_eq!(FileKind::from_path("/Meshes/cube.obj"), FileKind::Model);
        assert_eq!(FileKind::from_path("/Meshes/robot.FBX"), FileKind::Model);
        assert_eq!(FileKind::from_path("/Sounds/step.wav"), FileKind::Audio);
        assert_eq!(FileKind::from_path("/Sounds/theme.ogg"), FileKind::Audio);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(FileKind::from_path("/Meshes/cube.OBJ"), FileKind::Unknown);
        assert_eq!(FileKind::from_path("/Sounds/step.WAV"), FileKind::Unknown);
        assert_eq!(FileKind::from_path("README"), FileKind::Unknown);
    }
}
