//! Theme values and their CSS class mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;

/// The two visual modes a page can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Strict parse; only the two lower-case names are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Marker class placed on the document root.
    pub fn css_class(&self) -> &'static str {
        self.as_str()
    }

    /// Background/foreground utility pair for the content body.
    pub fn body_classes<'a>(&self, config: &'a ThemeConfig) -> &'a [String] {
        match self {
            Theme::Light => &config.light_body,
            Theme::Dark => &config.dark_body,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A theme as read back from storage or resolved from the environment.
///
/// Stored values are not validated: a value some other script wrote under
/// the preference key is carried through as `Unrecognized` and reported
/// verbatim by [`ThemeName::as_str`]. For styling it behaves like light.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeName {
    Known(Theme),
    Unrecognized(String),
}

impl ThemeName {
    /// Wrap a raw stored value. Empty strings are the caller's concern
    /// (they count as "no preference").
    pub fn from_stored(value: String) -> Self {
        match Theme::parse(&value) {
            Some(theme) => ThemeName::Known(theme),
            None => ThemeName::Unrecognized(value),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ThemeName::Known(theme) => theme.as_str(),
            ThemeName::Unrecognized(raw) => raw,
        }
    }

    /// Theme used for classes and the toggle face. Anything that is not
    /// `dark` renders as light.
    pub fn theme(&self) -> Theme {
        match self {
            ThemeName::Known(theme) => *theme,
            ThemeName::Unrecognized(_) => Theme::Light,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, ThemeName::Known(_))
    }
}

impl From<Theme> for ThemeName {
    fn from(theme: Theme) -> Self {
        ThemeName::Known(theme)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
