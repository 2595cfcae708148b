//! Theme model: declarative mappings from token type tags to styles.
//!
//! Themes are static configuration. They deserialize from the JSON shape
//! `{ name, type, plain: {..}, styles: [{types, style}] }` and are never
//! mutated at runtime; selecting a theme swaps the whole value.

pub mod builtin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::style::Style;

/// One theme rule: the tags it applies to and the style it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRule {
    pub types: Vec<String>,
    pub style: Style,
}

impl ThemeRule {
    /// True when this rule's tag set contains `tag`.
    pub fn matches(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// A complete theme: display name, stable id, the `plain` base style used for
/// line containers, and the ordered rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(rename = "type")]
    pub id: String,
    pub plain: Style,
    pub styles: Vec<ThemeRule>,
}

impl Theme {
    /// Parse a theme from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(format!("invalid theme: {e}")))
    }

    /// Load a theme from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&data)
    }

    /// Look up a compiled-in theme by id (e.g. `"monokai"`).
    pub fn builtin(id: &str) -> Option<Theme> {
        match id {
            "night-owl" => Some(builtin::night_owl()),
            "monokai" => Some(builtin::monokai()),
            "dracula" => Some(builtin::dracula()),
            "github-light" => Some(builtin::github_light()),
            _ => None,
        }
    }

    /// Ids of all compiled-in themes.
    pub fn builtin_ids() -> &'static [&'static str] {
        &["night-owl", "monokai", "dracula", "github-light"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        builtin::night_owl()
    }
}
