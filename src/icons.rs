//! Declarative icon set for the toggle control.
//!
//! The control shows the action it performs, not the current state: a dark
//! page shows the sun ("switch to light"), a light page shows the moon.
//! Glyphs are plain data so both the browser backend and the Dioxus
//! component build the same elements without going through markup strings.

use crate::config::ThemeConfig;
use crate::theme::Theme;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Attributes of the `<svg>` frame the glyph shapes are drawn in.
pub const SVG_FRAME: &[(&str, &str)] = &[
    ("width", "20"),
    ("height", "20"),
    ("viewBox", "0 0 24 24"),
    ("fill", "none"),
    ("stroke", "currentColor"),
    ("stroke-width", "2"),
    ("stroke-linecap", "round"),
    ("stroke-linejoin", "round"),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { cx: f32, cy: f32, r: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Path { d: &'static str },
}

impl Shape {
    /// SVG element name
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Line { .. } => "line",
            Shape::Path { .. } => "path",
        }
    }

    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match *self {
            Shape::Circle { cx, cy, r } => {
                vec![("cx", cx.to_string()), ("cy", cy.to_string()), ("r", r.to_string())]
            }
            Shape::Line { x1, y1, x2, y2 } => vec![
                ("x1", x1.to_string()),
                ("y1", y1.to_string()),
                ("x2", x2.to_string()),
                ("y2", y2.to_string()),
            ],
            Shape::Path { d } => vec![("d", d.to_string())],
        }
    }
}

const fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
    Shape::Line { x1, y1, x2, y2 }
}

const SUN: &[Shape] = &[
    Shape::Circle { cx: 12.0, cy: 12.0, r: 5.0 },
    line(12.0, 1.0, 12.0, 3.0),
    line(12.0, 21.0, 12.0, 23.0),
    line(4.22, 4.22, 5.64, 5.64),
    line(18.36, 18.36, 19.78, 19.78),
    line(1.0, 12.0, 3.0, 12.0),
    line(21.0, 12.0, 23.0, 12.0),
    line(4.22, 19.78, 5.64, 18.36),
    line(18.36, 5.64, 19.78, 4.22),
];

const MOON: &[Shape] = &[Shape::Path {
    d: "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z",
}];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Sun,
    Moon,
}

impl Glyph {
    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            Glyph::Sun => SUN,
            Glyph::Moon => MOON,
        }
    }
}

/// What the toggle shows for a given page theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconFace {
    pub glyph: Glyph,
    /// Used for both `aria-label` and `title`
    pub label: &'static str,
}

impl IconFace {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => IconFace {
                glyph: Glyph::Sun,
                label: "Switch to light mode",
            },
            Theme::Light => IconFace {
                glyph: Glyph::Moon,
                label: "Switch to dark mode",
            },
        }
    }

    /// Theme the control switches to when activated.
    pub fn target(&self) -> Theme {
        match self.glyph {
            Glyph::Sun => Theme::Light,
            Glyph::Moon => Theme::Dark,
        }
    }
}

/// The button mounted into the navigation, before its first sync.
#[derive(Clone, Debug, PartialEq)]
pub struct ToggleControl {
    pub id: String,
    pub button_classes: Vec<String>,
    pub label: String,
    pub wrapper_classes: Vec<String>,
}

impl ToggleControl {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            id: config.toggle_id.clone(),
            button_classes: config.button_classes().into_iter().map(String::from).collect(),
            label: config.initial_label.clone(),
            wrapper_classes: config.wrapper_classes().into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_shows_the_other_theme() {
        for theme in [Theme::Light, Theme::Dark] {
            let face = IconFace::for_theme(theme);
            assert_eq!(face.target(), theme.toggled());
            assert!(face.label.contains(theme.toggled().as_str()));
        }
    }

    #[test]
    fn dark_page_shows_sun() {
        let face = IconFace::for_theme(Theme::Dark);
        assert_eq!(face.glyph, Glyph::Sun);
        assert_eq!(face.label, "Switch to light mode");
    }

    #[test]
    fn light_page_shows_moon() {
        let face = IconFace::for_theme(Theme::Light);
        assert_eq!(face.glyph, Glyph::Moon);
        assert_eq!(face.label, "Switch to dark mode");
    }

    #[test]
    fn sun_is_a_circle_with_eight_rays() {
        let shapes = Glyph::Sun.shapes();
        assert_eq!(shapes.iter().filter(|s| s.tag() == "circle").count(), 1);
        assert_eq!(shapes.iter().filter(|s| s.tag() == "line").count(), 8);
    }

    #[test]
    fn attributes_format_without_trailing_zeros() {
        let attrs = Shape::Circle { cx: 12.0, cy: 12.0, r: 5.0 }.attributes();
        assert_eq!(attrs[0], ("cx", "12".to_string()));
        assert_eq!(line(4.22, 4.22, 5.64, 5.64).attributes()[2], ("x2", "5.64".to_string()));
    }

    #[test]
    fn control_splits_configured_classes() {
        let control = ToggleControl::from_config(&ThemeConfig::default());
        assert_eq!(control.id, "theme-toggle");
        assert_eq!(control.label, "Toggle theme");
        assert_eq!(control.wrapper_classes, vec!["flex", "items-center"]);
        assert!(control.button_classes.iter().any(|c| c == "rounded-lg"));
    }
}
