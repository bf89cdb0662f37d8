//! Snapshot-to-design node construction.

use crate::style::{map_styles, StyleMapping};
use crate::types::{
    Color, DesignNode, Effect, NodeMeta, NodeType, Paint, SnapshotNode, Vec2,
};

const AVATAR_ACCENT: &str = "#4f46e5";

/// Build the design node for one snapshot node.
///
/// Every snapshot node produces exactly one design node with the same id;
/// callers rely on that pairing when validating and correcting.
pub fn build_node(snapshot: &SnapshotNode) -> DesignNode {
    let StyleMapping {
        fills,
        mut strokes,
        stroke_weight,
        stroke_align,
        corner_radius,
        mut effects,
        layout,
        layout_align,
        layout_grow,
        positioning,
        typography,
        mut tokens,
    } = map_styles(snapshot);

    let node_type = node_type_for(snapshot);
    let mut bounding_box = snapshot.bounding_box;
    let mut notes: Vec<String> = Vec::new();

    let class_string = snapshot
        .classes
        .iter()
        .map(|c| c.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    // Button affordance: keep a minimum width relative to the height so
    // collapsed captures still read as tappable controls.
    let is_button = snapshot.tag_name == "button"
        || snapshot.attributes.get("role").map(String::as_str) == Some("button")
        || class_string.contains("btn")
        || class_string.contains("button");
    if is_button {
        let is_primary = class_string.contains("primary") || class_string.contains("cta");
        let base_height = if bounding_box.height > 0.0 {
            bounding_box.height
        } else {
            typography.as_ref().and_then(|t| t.line_height).unwrap_or(0.0)
        };
        let ratio = if is_primary { 1.4 } else { 1.2 };
        if base_height > 0.0 {
            let minimum_width = (base_height * ratio).round();
            if minimum_width > bounding_box.width {
                bounding_box.width = minimum_width;
            }
        }
        notes.push(format!(
            "button role {} (min-width ratio {:.1})",
            if is_primary { "primary" } else { "secondary" },
            ratio
        ));
    }

    // Icons normalize to the two canonical sizes; logos are exempt.
    let indicates_logo = class_string.contains("logo");
    let indicates_icon = class_string.contains("icon");
    let small_graphic = if bounding_box.width > 0.0 && bounding_box.height > 0.0 {
        bounding_box.width.max(bounding_box.height) <= 96.0
    } else {
        true
    };
    let is_icon =
        !indicates_logo && small_graphic && (snapshot.tag_name == "svg" || indicates_icon);
    if is_icon {
        let round = class_string.contains("round") || class_string.contains("circle");
        let target = if round { 24.0 } else { 20.0 };
        bounding_box.width = target;
        bounding_box.height = target;
        notes.push(format!("icon normalized to {target}px"));
    }

    // Avatars get an accent ring and a standing elevation when the capture
    // carried neither.
    let is_avatar =
        class_string.contains("avatar") || snapshot.attributes.contains_key("data-avatar");
    if is_avatar {
        if strokes.as_ref().map_or(true, Vec::is_empty) {
            if let Some(accent) = crate::style::parse_color(AVATAR_ACCENT) {
                strokes = Some(vec![Paint::solid(accent)]);
            }
        }
        let shadow_color = |a: f32| Color {
            r: 15.0 / 255.0,
            g: 23.0 / 255.0,
            b: 42.0 / 255.0,
            a,
        };
        let avatar_effects = [
            Effect::DropShadow {
                offset: Vec2 { x: 0.0, y: 4.0 },
                radius: 12.0,
                spread: -2.0,
                color: shadow_color(0.22),
            },
            Effect::InnerShadow {
                offset: Vec2 { x: 0.0, y: 2.0 },
                radius: 6.0,
                spread: 0.0,
                color: shadow_color(0.16),
            },
        ];
        effects
            .get_or_insert_with(Vec::new)
            .extend(avatar_effects);
        if tokens.shadow.is_none() {
            tokens.shadow = Some("elevation-sm".to_string());
        }
        notes.push("avatar ring and elevation applied".to_string());
    }

    let name = snapshot
        .attributes
        .get("id")
        .filter(|id| !id.is_empty())
        .cloned()
        .unwrap_or_else(|| snapshot.tag_name.clone());

    // record the adjusted basis so the quality loop does not treat a
    // deliberate normalization as drift from the capture
    let normalized_box = (bounding_box != snapshot.bounding_box).then_some(bounding_box);

    DesignNode {
        id: snapshot.id.clone(),
        parent_id: snapshot.parent_id.clone(),
        node_type,
        name,
        bounding_box,
        fills,
        strokes,
        stroke_weight,
        stroke_align,
        corner_radius,
        effects,
        layout,
        layout_align,
        layout_grow,
        positioning,
        typography,
        meta: NodeMeta {
            tag_name: snapshot.tag_name.clone(),
            classes: snapshot.classes.clone(),
            attributes: snapshot.attributes.clone(),
            tokens,
            normalized_box,
            component_pattern: None,
            notes,
        },
    }
}

fn node_type_for(snapshot: &SnapshotNode) -> NodeType {
    match snapshot.tag_name.as_str() {
        "img" => NodeType::Image,
        "svg" => NodeType::Vector,
        _ if snapshot.text().is_some() => NodeType::Text,
        _ => NodeType::Frame,
    }
}
