//! Configuration management
//!
//! Every field has a default matching the vector theme's markup, so an empty
//! JSON object (or no configuration at all) yields a working controller.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// Id of the optional `<script type="application/json">` block the wasm
/// entry point reads its configuration from.
pub const CONFIG_ELEMENT_ID: &str = "theme-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Local storage key holding the explicit preference
    pub storage_key: String,
    /// Media query whose match means "user agent prefers dark"
    pub dark_query: String,
    /// Element id of the toggle button
    pub toggle_id: String,
    /// Navigation container the control wrapper is appended to
    pub nav_selector: String,
    /// Sub-container that must exist inside the navigation container
    pub menu_selector: String,
    pub wrapper_class: String,
    pub button_class: String,
    /// Accessible label before the first sync
    pub initial_label: String,
    pub light_body: Vec<String>,
    pub dark_body: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "ngeran-theme".to_string(),
            dark_query: "(prefers-color-scheme: dark)".to_string(),
            toggle_id: "theme-toggle".to_string(),
            nav_selector: "nav .mx-auto".to_string(),
            menu_selector: ".hidden.lg\\:flex".to_string(),
            wrapper_class: "flex items-center".to_string(),
            button_class: "p-2 rounded-lg hover:bg-gray-200 dark:hover:bg-gray-700 \
                           transition-colors duration-200 focus:outline-none \
                           focus:ring-2 focus:ring-[#5e81ac]"
                .to_string(),
            initial_label: "Toggle theme".to_string(),
            light_body: vec!["bg-gray-50".to_string(), "text-gray-900".to_string()],
            dark_body: vec!["bg-gray-900".to_string(), "text-gray-100".to_string()],
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ThemeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("storage_key", &self.storage_key),
            ("dark_query", &self.dark_query),
            ("toggle_id", &self.toggle_id),
            ("nav_selector", &self.nav_selector),
            ("menu_selector", &self.menu_selector),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ThemeError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }

        // Body pairs are swapped wholesale on every apply; a class shared
        // between them (or with a root marker) would be removed right after
        // it was added.
        for class in &self.light_body {
            if self.dark_body.contains(class) {
                return Err(ThemeError::InvalidConfig(format!(
                    "body class {} appears in both light_body and dark_body",
                    class
                )));
            }
        }
        for class in self.light_body.iter().chain(&self.dark_body) {
            if class == "light" || class == "dark" {
                return Err(ThemeError::InvalidConfig(format!(
                    "body class {} collides with a root marker class",
                    class
                )));
            }
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(ThemeError::InvalidConfig(format!(
                    "body class {:?} must be a single non-empty token",
                    class
                )));
            }
        }

        Ok(())
    }

    /// Button classes split into tokens for class-list APIs.
    pub fn button_classes(&self) -> Vec<&str> {
        self.button_class.split_whitespace().collect()
    }

    pub fn wrapper_classes(&self) -> Vec<&str> {
        self.wrapper_class.split_whitespace().collect()
    }
}
