//! Component pattern recognition over the snapshot tree.
//!
//! Recognizers look at HTML semantics first (tag names, roles), then class
//! naming, then styling as a last resort, each with a descending confidence.
//! Matches at or above the confidence floor annotate the design nodes and
//! feed the conversion summary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::info;

use crate::style::parse_numeric;
use crate::types::{ComponentPattern, DesignNode, PatternKind, SnapshotNode};

/// Matches below this confidence are discarded.
pub const CONFIDENCE_FLOOR: f32 = 0.7;

/// A recognized component and the recognized components directly nested
/// under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedComponent {
    pub node_id: String,
    pub pattern: ComponentPattern,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RecognizedComponent>,
}

fn pattern(kind: PatternKind, confidence: f32, variant: Option<&str>) -> ComponentPattern {
    ComponentPattern {
        kind,
        confidence,
        variant: variant.map(str::to_string),
        properties: Map::new(),
    }
}

fn class_string(snapshot: &SnapshotNode) -> String {
    snapshot
        .classes
        .iter()
        .map(|c| c.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn style_value(snapshot: &SnapshotNode, property: &str) -> f32 {
    snapshot
        .style(property)
        .and_then(parse_numeric)
        .unwrap_or(0.0)
}

fn recognize_button(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    let attr = |key: &str| snapshot.attributes.get(key).map(String::as_str);

    if snapshot.tag_name == "button"
        || attr("role") == Some("button")
        || attr("type") == Some("button")
    {
        let variant = if classes.contains("primary") || classes.contains("cta") {
            "primary"
        } else if classes.contains("secondary") {
            "secondary"
        } else if classes.contains("ghost") || classes.contains("text") {
            "ghost"
        } else if classes.contains("outline") {
            "outline"
        } else {
            "default"
        };
        let size = if classes.contains("sm") {
            "small"
        } else if classes.contains("large") || classes.contains("lg") {
            "large"
        } else {
            "medium"
        };
        let disabled = snapshot.attributes.contains_key("disabled")
            || attr("aria-disabled") == Some("true");

        let mut matched = pattern(PatternKind::Button, 0.95, Some(variant));
        matched.properties.insert("size".to_string(), size.into());
        matched
            .properties
            .insert("disabled".to_string(), disabled.into());
        return Some(matched);
    }

    if classes.contains("btn") || classes.contains("button") {
        let variant = if classes.contains("primary") {
            "primary"
        } else if classes.contains("secondary") {
            "secondary"
        } else {
            "default"
        };
        return Some(pattern(PatternKind::Button, 0.85, Some(variant)));
    }

    let pointer = snapshot.style("cursor").map(str::trim) == Some("pointer");
    let has_background = snapshot
        .style("background-color")
        .map(str::trim)
        .is_some_and(|v| !v.is_empty() && v != "transparent");
    let rounded = style_value(snapshot, "border-radius") > 0.0;
    if pointer && has_background && rounded && snapshot.text().is_some() {
        return Some(pattern(PatternKind::Button, 0.7, Some("default")));
    }

    None
}

fn recognize_card(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    let child_has = |fragment: &str| {
        snapshot
            .children
            .iter()
            .any(|child| class_string(child).contains(fragment))
    };

    if classes.contains("card") {
        let mut matched = pattern(PatternKind::Card, 0.9, None);
        matched
            .properties
            .insert("hasHeader".to_string(), child_has("header").into());
        matched
            .properties
            .insert("hasFooter".to_string(), child_has("footer").into());
        return Some(matched);
    }

    let has_shadow = snapshot
        .style("box-shadow")
        .map(str::trim)
        .is_some_and(|v| !v.is_empty() && v != "none");
    let has_border = style_value(snapshot, "border-width") > 0.0;
    let rounded = style_value(snapshot, "border-radius") > 0.0;
    let has_background = snapshot
        .style("background-color")
        .map(str::trim)
        .is_some_and(|v| !v.is_empty() && v != "transparent");
    let padded = style_value(snapshot, "padding-top") > 8.0;

    if (has_shadow || has_border)
        && rounded
        && has_background
        && padded
        && snapshot.children.len() >= 2
    {
        let mut matched = pattern(PatternKind::Card, 0.75, None);
        matched
            .properties
            .insert("elevated".to_string(), has_shadow.into());
        return Some(matched);
    }

    None
}

fn recognize_navigation(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    let item_count = Value::from(snapshot.children.len());

    if snapshot.tag_name == "nav"
        || snapshot.attributes.get("role").map(String::as_str) == Some("navigation")
    {
        let mut matched = pattern(PatternKind::Navigation, 0.95, None);
        matched.properties.insert("itemCount".to_string(), item_count);
        return Some(matched);
    }

    if classes.contains("nav") || classes.contains("menu") || classes.contains("sidebar") {
        let variant = if classes.contains("sidebar") {
            "sidebar"
        } else if classes.contains("top") || classes.contains("header") {
            "top"
        } else if classes.contains("bottom") || classes.contains("footer") {
            "bottom"
        } else {
            "default"
        };
        let mut matched = pattern(PatternKind::Navigation, 0.85, Some(variant));
        matched.properties.insert("itemCount".to_string(), item_count);
        return Some(matched);
    }

    None
}

fn recognize_form(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    if snapshot.tag_name == "form" {
        let field_count = snapshot
            .children
            .iter()
            .filter(|child| matches!(child.tag_name.as_str(), "input" | "textarea" | "select"))
            .count();
        let mut matched = pattern(PatternKind::Form, 0.95, None);
        matched
            .properties
            .insert("fieldCount".to_string(), field_count.into());
        return Some(matched);
    }

    if classes.contains("form") {
        return Some(pattern(PatternKind::Form, 0.8, None));
    }

    None
}

fn recognize_icon(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    if snapshot.tag_name == "svg" {
        let size = snapshot
            .attributes
            .get("width")
            .and_then(|w| parse_numeric(w))
            .filter(|w| *w > 0.0)
            .unwrap_or(24.0);
        let mut matched = pattern(PatternKind::Icon, 0.95, None);
        matched.properties.insert("size".to_string(), size.into());
        return Some(matched);
    }

    if classes.contains("ico") || classes.contains("svg") {
        return Some(pattern(PatternKind::Icon, 0.85, None));
    }

    None
}

fn recognize_input(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    if matches!(snapshot.tag_name.as_str(), "input" | "textarea" | "select") {
        let input_type = snapshot
            .attributes
            .get("type")
            .cloned()
            .unwrap_or_else(|| "text".to_string());
        let mut matched = pattern(PatternKind::Input, 0.95, Some(input_type.as_str()));
        if let Some(placeholder) = snapshot.attributes.get("placeholder") {
            matched
                .properties
                .insert("placeholder".to_string(), placeholder.as_str().into());
        }
        matched.properties.insert(
            "required".to_string(),
            snapshot.attributes.contains_key("required").into(),
        );
        return Some(matched);
    }

    if classes.contains("input") || classes.contains("field") || classes.contains("textbox") {
        return Some(pattern(PatternKind::Input, 0.8, None));
    }

    None
}

fn recognize_avatar(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    let indicated = classes.contains("avatar")
        || classes.contains("profile-pic")
        || classes.contains("user-img")
        || snapshot.attributes.contains_key("data-avatar");
    if !indicated {
        return None;
    }

    let radius = style_value(snapshot, "border-radius");
    let width = style_value(snapshot, "width");
    let variant = if radius >= width / 2.0 {
        "circle"
    } else {
        "rounded"
    };

    let mut matched = pattern(PatternKind::Avatar, 0.9, Some(variant));
    matched.properties.insert("size".to_string(), width.into());
    Some(matched)
}

fn recognize_badge(snapshot: &SnapshotNode, classes: &str) -> Option<ComponentPattern> {
    if classes.contains("badge")
        || classes.contains("tag")
        || classes.contains("label")
        || classes.contains("chip")
    {
        let mut matched = pattern(PatternKind::Badge, 0.85, None);
        if let Some(text) = snapshot.text() {
            matched.properties.insert("text".to_string(), text.into());
        }
        return Some(matched);
    }

    let small_padding = style_value(snapshot, "padding-left") <= 12.0
        && style_value(snapshot, "padding-right") <= 12.0;
    let small_height = style_value(snapshot, "height") <= 32.0;
    let rounded = style_value(snapshot, "border-radius") > 0.0;

    if snapshot.text().is_some() && small_padding && small_height && rounded {
        return Some(pattern(PatternKind::Badge, 0.7, None));
    }

    None
}

/// Run every recognizer over one node and return the first confident match.
pub fn recognize_pattern(snapshot: &SnapshotNode) -> ComponentPattern {
    let classes = class_string(snapshot);

    let recognizers: [fn(&SnapshotNode, &str) -> Option<ComponentPattern>; 8] = [
        recognize_button,
        recognize_card,
        recognize_navigation,
        recognize_form,
        recognize_icon,
        recognize_input,
        recognize_avatar,
        recognize_badge,
    ];

    for recognize in recognizers {
        if let Some(matched) = recognize(snapshot, &classes) {
            if matched.confidence >= CONFIDENCE_FLOOR {
                return matched;
            }
        }
    }

    ComponentPattern::unknown()
}

/// Recognize component patterns across the whole snapshot tree.
///
/// A recognized node absorbs the components found in its direct children;
/// components found below unrecognized nodes surface at the top level.
pub fn recognize_components(root: &SnapshotNode) -> Vec<RecognizedComponent> {
    fn walk(
        snapshot: &SnapshotNode,
        top_level: &mut Vec<RecognizedComponent>,
    ) -> Option<RecognizedComponent> {
        let matched = recognize_pattern(snapshot);

        if matched.kind != PatternKind::Unknown && matched.confidence >= CONFIDENCE_FLOOR {
            let mut component = RecognizedComponent {
                node_id: snapshot.id.clone(),
                pattern: matched,
                children: Vec::new(),
            };
            for child in &snapshot.children {
                if let Some(nested) = walk(child, top_level) {
                    component.children.push(nested);
                }
            }
            return Some(component);
        }

        for child in &snapshot.children {
            if let Some(nested) = walk(child, top_level) {
                top_level.push(nested);
            }
        }
        None
    }

    let mut recognized = Vec::new();
    if let Some(root_component) = walk(root, &mut recognized) {
        recognized.push(root_component);
    }

    info!(
        components_recognized = recognized.len(),
        "component pattern recognition completed"
    );
    recognized
}

/// Annotate design nodes with the patterns recognized for them.
pub fn apply_patterns(nodes: &mut [DesignNode], components: &[RecognizedComponent]) {
    fn index<'a>(
        components: &'a [RecognizedComponent],
        map: &mut HashMap<&'a str, &'a ComponentPattern>,
    ) {
        for component in components {
            map.insert(component.node_id.as_str(), &component.pattern);
            index(&component.children, map);
        }
    }

    let mut by_id: HashMap<&str, &ComponentPattern> = HashMap::new();
    index(components, &mut by_id);

    for node in nodes.iter_mut() {
        if let Some(matched) = by_id.get(node.id.as_str()) {
            node.meta.component_pattern = Some((*matched).clone());
        }
    }
}

/// One-line summary for the conversion info log, counting top-level
/// components by kind in first-seen order.
pub fn summarize_components(components: &[RecognizedComponent]) -> String {
    if components.is_empty() {
        return "Recognized 0 components".to_string();
    }

    let mut counts: Vec<(PatternKind, usize)> = Vec::new();
    for component in components {
        match counts.iter_mut().find(|(kind, _)| *kind == component.pattern.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((component.pattern.kind, 1)),
        }
    }

    let listing = counts
        .iter()
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Recognized {} components: {}", components.len(), listing)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::convert::build_node;
    use crate::types::BoundingBox;

    use super::*;

    fn snapshot(id: &str, tag: &str) -> SnapshotNode {
        SnapshotNode {
            id: id.to_string(),
            parent_id: None,
            tag_name: tag.to_string(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            text_content: None,
            bounding_box: BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 120.0,
                height: 40.0,
            },
            styles: HashMap::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn button_tag_is_recognized_with_its_variant() {
        let mut node = snapshot("a", "button");
        node.classes = vec!["cta-large".to_string()];
        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Button);
        assert_eq!(matched.confidence, 0.95);
        assert_eq!(matched.variant.as_deref(), Some("primary"));
        assert_eq!(matched.properties["size"], "large");
        assert_eq!(matched.properties["disabled"], false);
    }

    #[test]
    fn styled_clickable_div_reads_as_a_button() {
        let mut node = snapshot("a", "div");
        node.text_content = Some("Click me".to_string());
        node.styles.insert("cursor".to_string(), "pointer".to_string());
        node.styles
            .insert("background-color".to_string(), "#4f46e5".to_string());
        node.styles
            .insert("border-radius".to_string(), "6px".to_string());
        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Button);
        assert_eq!(matched.confidence, 0.7);
    }

    #[test]
    fn card_class_reports_header_and_footer_presence() {
        let mut header = snapshot("h", "div");
        header.classes = vec!["card-header".to_string()];
        let mut node = snapshot("a", "div");
        node.classes = vec!["card".to_string()];
        node.children = vec![header];

        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Card);
        assert_eq!(matched.properties["hasHeader"], true);
        assert_eq!(matched.properties["hasFooter"], false);
    }

    #[test]
    fn nav_tag_carries_the_item_count() {
        let mut node = snapshot("a", "nav");
        node.children = vec![snapshot("b", "a"), snapshot("c", "a")];
        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Navigation);
        assert_eq!(matched.properties["itemCount"], 2);
    }

    #[test]
    fn svg_icon_size_follows_the_width_attribute() {
        let mut node = snapshot("a", "svg");
        node.attributes
            .insert("width".to_string(), "32".to_string());
        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Icon);
        assert_eq!(matched.properties["size"], 32.0);
    }

    #[test]
    fn input_variant_follows_the_type_attribute() {
        let mut node = snapshot("a", "input");
        node.attributes
            .insert("type".to_string(), "email".to_string());
        node.attributes
            .insert("required".to_string(), String::new());
        let matched = recognize_pattern(&node);
        assert_eq!(matched.kind, PatternKind::Input);
        assert_eq!(matched.variant.as_deref(), Some("email"));
        assert_eq!(matched.properties["required"], true);
    }

    #[test]
    fn plain_div_stays_unknown() {
        let matched = recognize_pattern(&snapshot("a", "div"));
        assert_eq!(matched.kind, PatternKind::Unknown);
        assert_eq!(matched.confidence, 0.0);
    }

    #[test]
    fn recognized_child_nests_under_its_recognized_parent() {
        let mut button = snapshot("cta", "button");
        button.text_content = Some("Buy".to_string());
        let mut card = snapshot("card", "div");
        card.classes = vec!["card".to_string()];
        card.children = vec![button];

        let components = recognize_components(&card);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].node_id, "card");
        assert_eq!(components[0].children.len(), 1);
        assert_eq!(components[0].children[0].node_id, "cta");
    }

    #[test]
    fn components_below_plain_frames_surface_at_the_top_level() {
        let mut button = snapshot("cta", "button");
        button.text_content = Some("Buy".to_string());
        let mut wrapper = snapshot("wrapper", "div");
        wrapper.children = vec![button];

        let components = recognize_components(&wrapper);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].node_id, "cta");
        assert!(components[0].children.is_empty());
    }

    #[test]
    fn applied_patterns_land_in_the_node_meta() {
        let button = snapshot("cta", "button");
        let mut nodes = vec![build_node(&button), build_node(&snapshot("other", "div"))];
        let components = recognize_components(&button);

        apply_patterns(&mut nodes, &components);

        let matched = nodes[0]
            .meta
            .component_pattern
            .as_ref()
            .expect("pattern applied");
        assert_eq!(matched.kind, PatternKind::Button);
        assert!(nodes[1].meta.component_pattern.is_none());
    }

    #[test]
    fn summary_counts_components_by_kind() {
        let mut form = snapshot("form", "form");
        form.children = vec![snapshot("field", "input")];
        let mut root = snapshot("root", "div");
        root.children = vec![form, snapshot("menu", "nav")];

        let components = recognize_components(&root);
        let summary = summarize_components(&components);
        assert_eq!(summary, "Recognized 2 components: 1 form, 1 navigation");

        assert_eq!(summarize_components(&[]), "Recognized 0 components");
    }
}
