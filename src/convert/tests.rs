use std::collections::HashMap;

use crate::types::{BoundingBox, Effect, NodeType, SnapshotNode};

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
fn tag_selects_the_node_type() {
    assert_eq!(build_node(&snapshot("a", "div")).node_type, NodeType::Frame);
    assert_eq!(build_node(&snapshot("b", "img")).node_type, NodeType::Image);
    assert_eq!(build_node(&snapshot("c", "svg")).node_type, NodeType::Vector);

    let mut text = snapshot("d", "span");
    text.text_content = Some("hello".to_string());
    assert_eq!(build_node(&text).node_type, NodeType::Text);
}

#[test]
fn whitespace_only_text_is_not_a_text_node() {
    let mut node = snapshot("a", "span");
    node.text_content = Some("   ".to_string());
    assert_eq!(build_node(&node).node_type, NodeType::Frame);
}

#[test]
fn id_attribute_names_the_node() {
    let mut node = snapshot("a", "div");
    node.attributes
        .insert("id".to_string(), "hero-banner".to_string());
    assert_eq!(build_node(&node).name, "hero-banner");
    assert_eq!(build_node(&snapshot("b", "section")).name, "section");
}

#[test]
fn narrow_button_is_widened_to_the_minimum_ratio() {
    let mut node = snapshot("a", "button");
    node.bounding_box.width = 30.0;
    node.bounding_box.height = 40.0;
    let design = build_node(&node);
    // secondary ratio 1.2 of the 40px height
    assert_eq!(design.bounding_box.width, 48.0);
}

#[test]
fn primary_button_uses_the_wider_ratio() {
    let mut node = snapshot("a", "div");
    node.classes = vec!["btn-primary".to_string()];
    node.bounding_box.width = 30.0;
    node.bounding_box.height = 40.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 56.0);
}

#[test]
fn wide_button_keeps_its_width() {
    let mut node = snapshot("a", "button");
    node.bounding_box.width = 200.0;
    node.bounding_box.height = 40.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 200.0);
}

#[test]
fn small_svg_normalizes_to_icon_size() {
    let mut node = snapshot("a", "svg");
    node.bounding_box.width = 17.0;
    node.bounding_box.height = 19.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 20.0);
    assert_eq!(design.bounding_box.height, 20.0);
}

#[test]
fn round_icon_class_normalizes_to_the_larger_size() {
    let mut node = snapshot("a", "div");
    node.classes = vec!["icon-round".to_string()];
    node.bounding_box.width = 30.0;
    node.bounding_box.height = 30.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 24.0);
}

#[test]
fn logo_class_is_exempt_from_icon_normalization() {
    let mut node = snapshot("a", "svg");
    node.classes = vec!["site-logo".to_string()];
    node.bounding_box.width = 90.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 90.0);
}

#[test]
fn large_svg_is_not_an_icon() {
    let mut node = snapshot("a", "svg");
    node.bounding_box.width = 400.0;
    node.bounding_box.height = 300.0;
    let design = build_node(&node);
    assert_eq!(design.bounding_box.width, 400.0);
}

#[test]
fn sizing_heuristics_record_the_adjusted_basis() {
    let mut node = snapshot("a", "svg");
    node.bounding_box.width = 40.0;
    node.bounding_box.height = 40.0;
    let design = build_node(&node);

    let basis = design.meta.normalized_box.expect("basis recorded");
    assert_eq!(basis.width, 20.0);
    assert_eq!(basis.height, 20.0);

    let plain = build_node(&snapshot("b", "div"));
    assert!(plain.meta.normalized_box.is_none());
}

#[test]
fn avatar_gets_accent_ring_and_elevation() {
    let mut node = snapshot("a", "div");
    node.classes = vec!["avatar".to_string()];
    let design = build_node(&node);

    let strokes = design.strokes.expect("accent ring expected");
    assert_eq!(strokes.len(), 1);

    let effects = design.effects.expect("elevation expected");
    assert!(effects.iter().any(|e| matches!(e, Effect::DropShadow { .. })));
    assert!(effects.iter().any(|e| matches!(e, Effect::InnerShadow { .. })));
    assert_eq!(design.meta.tokens.shadow.as_deref(), Some("elevation-sm"));
}

#[test]
fn avatar_with_declared_border_keeps_it() {
    let mut node = snapshot("a", "div");
    node.classes = vec!["avatar".to_string()];
    node.styles
        .insert("border-width".to_string(), "2px".to_string());
    node.styles
        .insert("border-style".to_string(), "solid".to_string());
    node.styles
        .insert("border-color".to_string(), "#22c55e".to_string());
    let design = build_node(&node);

    let strokes = design.strokes.expect("declared border expected");
    assert_eq!(
        strokes[0].solid_color().map(|c| c.to_hex()).as_deref(),
        Some("#22c55e")
    );
}
