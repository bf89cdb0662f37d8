//! Post-conversion style aggregation.
//!
//! Read-only reporting over a finished node list: unique solid colors,
//! deduplicated text styles, and which catalog tokens were matched.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{DesignNode, DetectedTokens, Paint};

/// A reusable text style observed on a converted node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

/// Color and text styles shared across a converted tree.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSystem {
    /// Solid paints keyed by their component values.
    pub colors: BTreeMap<String, Paint>,
    pub text_styles: Vec<TextStyle>,
}

/// Collect unique solid fills and per-name text styles from a node list.
pub fn generate_style_system(nodes: &[DesignNode]) -> StyleSystem {
    let mut colors: BTreeMap<String, Paint> = BTreeMap::new();
    let mut text_styles: Vec<TextStyle> = Vec::new();

    for node in nodes {
        for paint in node.fills.iter().flatten() {
            if let Some(color) = paint.solid_color() {
                let key = format!("{}-{}-{}-{}", color.r, color.g, color.b, color.a);
                colors.entry(key).or_insert_with(|| paint.clone());
            }
        }

        if let Some(text) = &node.typography {
            if !text_styles.iter().any(|style| style.name == node.name) {
                text_styles.push(TextStyle {
                    name: node.name.clone(),
                    font_family: text.font_family.clone(),
                    font_size: text.font_size,
                    font_weight: text.font_weight.clone(),
                });
            }
        }
    }

    StyleSystem {
        colors,
        text_styles,
    }
}

/// Summarize which static catalog tokens matched during conversion.
pub fn detected_tokens(nodes: &[DesignNode]) -> DetectedTokens {
    let mut colors: Vec<String> = Vec::new();
    let mut spacing: Vec<String> = Vec::new();
    let mut typography: Vec<String> = Vec::new();
    let mut shadows: Vec<String> = Vec::new();

    for node in nodes {
        let tokens = &node.meta.tokens;
        colors.extend(tokens.fill.iter().cloned());
        colors.extend(tokens.stroke.iter().cloned());
        colors.extend(tokens.text.iter().cloned());
        spacing.extend(tokens.gap.iter().cloned());
        if let Some(padding) = &tokens.padding {
            spacing.extend([
                padding.top.clone(),
                padding.right.clone(),
                padding.bottom.clone(),
                padding.left.clone(),
            ]);
        }
        typography.extend(tokens.typography.iter().cloned());
        shadows.extend(tokens.shadow.iter().cloned());
    }

    for list in [&mut colors, &mut spacing, &mut typography, &mut shadows] {
        list.sort();
        list.dedup();
    }

    DetectedTokens {
        colors,
        spacing,
        typography,
        shadows,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::convert::build_node;
    use crate::types::{BoundingBox, SnapshotNode};

    use super::*;

    fn snapshot(id: &str, tag: &str, pairs: &[(&str, &str)]) -> SnapshotNode {
        SnapshotNode {
            id: id.to_string(),
            parent_id: None,
            tag_name: tag.to_string(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            text_content: None,
            bounding_box: BoundingBox::default(),
            styles: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: Vec::new(),
        }
    }

    #[test]
    fn repeated_fill_colors_collapse_to_one_entry() {
        let a = build_node(&snapshot("a", "div", &[("background-color", "#112233")]));
        let b = build_node(&snapshot("b", "div", &[("background-color", "#112233")]));
        let c = build_node(&snapshot("c", "div", &[("background-color", "#445566")]));

        let system = generate_style_system(&[a, b, c]);
        assert_eq!(system.colors.len(), 2);
    }

    #[test]
    fn text_styles_dedupe_by_node_name() {
        let mut first = snapshot("a", "span", &[("font-size", "16px")]);
        first.text_content = Some("one".to_string());
        let mut second = snapshot("b", "span", &[("font-size", "24px")]);
        second.text_content = Some("two".to_string());

        let nodes = [build_node(&first), build_node(&second)];
        let system = generate_style_system(&nodes);

        // both fall back to the tag name, so only the first survives
        assert_eq!(system.text_styles.len(), 1);
        assert_eq!(system.text_styles[0].font_size, Some(16.0));
    }

    #[test]
    fn detected_tokens_are_sorted_and_unique() {
        let a = build_node(&snapshot(
            "a",
            "div",
            &[("display", "flex"), ("gap", "16px")],
        ));
        let b = build_node(&snapshot(
            "b",
            "div",
            &[("display", "flex"), ("gap", "16px")],
        ));

        let tokens = detected_tokens(&[a, b]);
        assert_eq!(tokens.spacing, vec!["spacing-4".to_string()]);
        assert!(tokens.colors.is_empty());
    }
}
