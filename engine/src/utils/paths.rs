//! Path helpers that accept both Windows and Unix separators

use std::path::Path;

/// File extension without the dot, preserving case
pub fn extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
}

/// Final path component, accepting either separator
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_keeps_case() {
        assert_eq!(extension("models/Hero.FBX").as_deref(), Some("FBX"));
        assert_eq!(extension("notes").as_deref(), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/Sounds/fx/click.wav"), "click.wav");
        assert_eq!(file_name("C:\\audio\\boom.ogg"), "boom.ogg");
        assert_eq!(file_name("plain.txt"), "plain.txt");
    }
}
