//! Snapshot types for captured HTML element trees.
//!
//! These types describe the input handed to the conversion core by the
//! upstream capture collaborator. The tree is built once per request and
//! is read-only inside this crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rectangle bounds for an element.
///
/// Coordinates are expected to be normalized to a single consistent origin
/// before the snapshot enters this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A single captured HTML element with its attributes, computed styles,
/// and geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    /// Unique identifier for this node.
    pub id: String,
    /// Identifier of the parent node. Back-reference only, never ownership.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// HTML tag name (e.g. "div", "span", "button"), lowercase.
    pub tag_name: String,
    /// HTML attributes (id, class, data-*, etc.).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    /// Class list; insertion order is irrelevant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Text content for leaf elements.
    pub text_content: Option<String>,
    /// Position and size on screen.
    pub bounding_box: BoundingBox,
    /// Raw CSS declarations (property name -> raw value string).
    /// Property names are matched case-insensitively.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub styles: HashMap<String, String>,
    /// Owned child nodes, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    /// Look up a raw style declaration by property name.
    ///
    /// Keys are expected lowercase from the capture layer; a lowercase scan
    /// is used as fallback so mixed-case captures still resolve.
    pub fn style(&self, property: &str) -> Option<&str> {
        if let Some(value) = self.styles.get(property) {
            return Some(value.as_str());
        }
        let wanted = property.to_ascii_lowercase();
        self.styles
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&wanted))
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed text content, if any non-whitespace text is present.
    pub fn text(&self) -> Option<&str> {
        self.text_content
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Whether this element declares a flex container display.
    pub fn is_flex_container(&self) -> bool {
        matches!(
            self.style("display").map(str::trim),
            Some("flex") | Some("inline-flex")
        )
    }

    /// Whether this element declares a grid container display.
    pub fn is_grid_container(&self) -> bool {
        matches!(
            self.style("display").map(str::trim),
            Some("grid") | Some("inline-grid")
        )
    }
}
