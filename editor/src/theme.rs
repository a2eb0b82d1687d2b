//! Editor colour themes selectable from File > Style

use imgui::{Style, StyleColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Black,
    Grey,
    Light,
    Classic,
    Dracula,
    Cherry,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Dark,
        Theme::Black,
        Theme::Grey,
        Theme::Light,
        Theme::Classic,
        Theme::Dracula,
        Theme::Cherry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Black => "Black",
            Theme::Grey => "Grey",
            Theme::Light => "Light",
            Theme::Classic => "Classic",
            Theme::Dracula => "Dracula",
            Theme::Cherry => "Cherry",
        }
    }

    /// Background, frame, accent and text colours layered over a base palette
    fn palette(self) -> Option<[[f32; 4]; 4]> {
        match self {
            Theme::Dark | Theme::Light | Theme::Classic => None,
            Theme::Black => Some([
                [0.02, 0.02, 0.02, 1.0],
                [0.10, 0.10, 0.10, 1.0],
                [0.30, 0.30, 0.30, 1.0],
                [0.95, 0.95, 0.95, 1.0],
            ]),
            Theme::Grey => Some([
                [0.22, 0.22, 0.22, 1.0],
                [0.30, 0.30, 0.30, 1.0],
                [0.45, 0.45, 0.45, 1.0],
                [0.90, 0.90, 0.90, 1.0],
            ]),
            Theme::Dracula => Some([
                [0.16, 0.16, 0.21, 1.0],
                [0.27, 0.28, 0.35, 1.0],
                [0.74, 0.58, 0.98, 1.0],
                [0.97, 0.97, 0.95, 1.0],
            ]),
            Theme::Cherry => Some([
                [0.13, 0.14, 0.17, 1.0],
                [0.20, 0.22, 0.27, 1.0],
                [0.50, 0.07, 0.25, 1.0],
                [0.86, 0.93, 0.89, 1.0],
            ]),
        }
    }

    pub fn apply(self, style: &mut Style) {
        match self {
            Theme::Light => {
                style.use_light_colors();
            }
            Theme::Classic => {
                style.use_classic_colors();
            }
            _ => {
                style.use_dark_colors();
            }
        }

        if let Some([background, frame, accent, text]) = self.palette() {
            for color in [StyleColor::WindowBg, StyleColor::ChildBg, StyleColor::PopupBg] {
                style[color] = background;
            }
            for color in [
                StyleColor::FrameBg,
                StyleColor::TitleBg,
                StyleColor::MenuBarBg,
                StyleColor::Tab,
            ] {
                style[color] = frame;
            }
            for color in [
                StyleColor::FrameBgActive,
                StyleColor::TitleBgActive,
                StyleColor::Header,
                StyleColor::ButtonActive,
                StyleColor::TabActive,
                StyleColor::CheckMark,
                StyleColor::SliderGrab,
            ] {
                style[color] = accent;
            }
            style[StyleColor::Text] = text;
        }

        style.window_rounding = 2.0;
        style.frame_rounding = 2.0;
        style.tab_rounding = 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_unique() {
        let mut names: Vec<_> = Theme::ALL.iter().map(|theme| theme.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Theme::ALL.len());
    }

    #[test]
    fn test_theme_serializes_by_name() {
        let json = serde_json::to_string(&Theme::Dracula).unwrap();
        assert_eq!(json, "\"Dracula\"");
        let theme: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(theme, Theme::Dracula);
    }
}
