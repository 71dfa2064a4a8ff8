//! UI components for Dioxus hosts.

pub mod theme;

pub use theme::{ThemeIcon, ThemeToggle};
