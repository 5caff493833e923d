//! Style catalog definitions.
//!
//! Styles are a configured, finite set: a style name maps to the prompt
//! fragment sent to the generation service. Requests for a name outside
//! the catalog must fail before any network call is made.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single visual style: name plus the prompt fragment it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    /// Style name as shown to users and used in requests.
    pub name: String,
    /// Prompt fragment merged into each frame's prompt.
    pub prompt: String,
}

impl StyleSpec {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
        }
    }
}

/// The configured set of supported styles.
///
/// Keyed by style name. A `BTreeMap` keeps listing order stable for
/// menus and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleCatalog {
    styles: BTreeMap<String, StyleSpec>,
}

impl StyleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Add a style to the catalog.
    pub fn insert(&mut self, spec: StyleSpec) {
        self.styles.insert(spec.name.clone(), spec);
    }

    /// Look up a style by name.
    pub fn resolve(&self, name: &str) -> Result<&StyleSpec, UnknownStyle> {
        self.styles
            .get(name)
            .ok_or_else(|| UnknownStyle(name.to_string()))
    }

    /// Whether the catalog contains a style.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// All configured style names, in stable order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Number of configured styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleCatalog {
    /// The stock catalog shipped with the bot.
    fn default() -> Self {
        let mut catalog = Self::new();
        catalog.insert(StyleSpec::new(
            "anime",
            "anime style, cel shading, vibrant colors",
        ));
        catalog.insert(StyleSpec::new(
            "cyberpunk",
            "cyberpunk style, neon lights, futuristic city",
        ));
        catalog.insert(StyleSpec::new(
            "impressionism",
            "impressionist painting, visible brush strokes, soft light",
        ));
        catalog.insert(StyleSpec::new(
            "pixelart",
            "pixel art style, 8-bit, retro game aesthetic",
        ));
        catalog
    }
}

impl FromIterator<StyleSpec> for StyleCatalog {
    fn from_iter<I: IntoIterator<Item = StyleSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}

/// Requested style is not in the configured catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown style: {0}")]
pub struct UnknownStyle(pub String);
