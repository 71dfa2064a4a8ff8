//! Theme toggle button and its icon.

use dioxus::prelude::*;

use crate::app::theme::use_theme;
use crate::icons::{IconFace, Shape};
use crate::theme::Theme;

fn shape_node(shape: Shape) -> Element {
    match shape {
        Shape::Circle { cx, cy, r } => rsx! {
            circle { "cx": "{cx}", "cy": "{cy}", "r": "{r}" }
        },
        Shape::Line { x1, y1, x2, y2 } => rsx! {
            line { "x1": "{x1}", "y1": "{y1}", "x2": "{x2}", "y2": "{y2}" }
        },
        Shape::Path { d } => rsx! {
            path { "d": d }
        },
    }
}

/// Glyph for the action available from `theme` (sun on dark, moon on light).
#[component]
pub fn ThemeIcon(theme: Theme) -> Element {
    let face = IconFace::for_theme(theme);
    rsx! {
        svg {
            "width": "20",
            "height": "20",
            "viewBox": "0 0 24 24",
            "fill": "none",
            "stroke": "currentColor",
            "stroke-width": "2",
            "stroke-linecap": "round",
            "stroke-linejoin": "round",
            for shape in face.glyph.shapes() {
                {shape_node(*shape)}
            }
        }
    }
}

/// Button that flips the theme; label and glyph describe the action.
/// `class` defaults to the configured button classes.
#[component]
pub fn ThemeToggle(class: Option<String>) -> Element {
    let theme = use_theme();
    let current = theme.get();
    let face = IconFace::for_theme(current);
    let class = class.unwrap_or_else(|| theme.button_class());

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            "aria-label": face.label,
            title: face.label,
            onclick: move |_| {
                theme.toggle();
            },
            ThemeIcon { theme: current }
        }
    }
}
