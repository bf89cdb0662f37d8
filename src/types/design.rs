//! Design scene-graph node types.
//!
//! One [`DesignNode`] is produced per captured [`SnapshotNode`](super::SnapshotNode);
//! the identifier sets are always identical. Parent linkage is kept as an id
//! back-reference, never a physical pointer, so the flat node list stays
//! acyclic and cheap to clone.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::snapshot::BoundingBox;

/// An RGBA color with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Lowercase `#rrggbb` rendering of the color, alpha dropped.
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| ((c * 255.0).round() as i64).clamp(0, 255) as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// A 2D point, used for shadow offsets and gradient handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A single gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0 - 1.0.
    pub position: f32,
    pub color: Color,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Paint {
    #[serde(rename_all = "camelCase")]
    Solid { color: Color },
    /// Linear gradient with fixed handle positions; an accurate transform
    /// from the CSS angle token is not computed yet.
    #[serde(rename_all = "camelCase")]
    LinearGradient {
        gradient_stops: Vec<GradientStop>,
        gradient_handle_positions: [Vec2; 3],
    },
    #[serde(rename_all = "camelCase")]
    Image { image_ref: String },
}

impl Paint {
    pub fn solid(color: Color) -> Paint {
        Paint::Solid { color }
    }

    /// The solid color of this paint, if it is a solid.
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Paint::Solid { color } => Some(*color),
            _ => None,
        }
    }
}

/// A visual effect on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    #[serde(rename_all = "camelCase")]
    DropShadow {
        offset: Vec2,
        radius: f32,
        spread: f32,
        color: Color,
    },
    #[serde(rename_all = "camelCase")]
    InnerShadow {
        offset: Vec2,
        radius: f32,
        spread: f32,
        color: Color,
    },
    #[serde(rename_all = "camelCase")]
    LayerBlur { radius: f32 },
}

impl Effect {
    /// Whether this effect is a drop or inner shadow.
    pub fn is_shadow(&self) -> bool {
        matches!(self, Effect::DropShadow { .. } | Effect::InnerShadow { .. })
    }
}

/// Corner rounding, either uniform or per corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f32),
    #[serde(rename_all = "camelCase")]
    PerCorner {
        top_left: f32,
        top_right: f32,
        bottom_right: f32,
        bottom_left: f32,
    },
}

/// The design node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Frame,
    Text,
    Vector,
    Image,
}

/// Auto-layout direction inferred from source flex/grid usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Alignment along a layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
    Stretch,
}

/// Sizing behavior along a layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSizing {
    Auto,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutWrap {
    NoWrap,
    Wrap,
}

/// Scroll overflow, evaluated per axis from the source styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowDirection {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// How a node participates in its parent's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    Auto,
    Absolute,
}

/// Stroke alignment relative to the node boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeAlign {
    Inside,
    Outside,
    Center,
}

/// Per-side padding in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn uniform(value: f32) -> Padding {
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn any_side(&self) -> bool {
        self.top > 0.0 || self.right > 0.0 || self.bottom > 0.0 || self.left > 0.0
    }
}

/// Raw CSS grid template information carried along for grid containers.
///
/// Grid layouts map to a vertical auto-layout approximation; the template
/// strings are preserved so downstream consumers can do better.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_rows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_areas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<f32>,
}

/// Auto-layout block inferred from flex/grid styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub mode: LayoutMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_align_items: Option<AxisAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_align_items: Option<AxisAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_axis_sizing_mode: Option<AxisSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_axis_sizing_mode: Option<AxisSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_wrap: Option<LayoutWrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips_content: Option<bool>,
    pub overflow_direction: OverflowDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    Upper,
    Lower,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDecoration {
    Underline,
    Strikethrough,
}

/// Typography block for text nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyBlock {
    pub characters: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<TextCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
}

/// Per-side spacing token names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddingTokens {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

/// Which static design tokens matched this node's generated values.
/// Read-only reporting; never feeds back into the conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingTokens>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_rem: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_rem: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height_rem: Option<f32>,
}

impl TokenRefs {
    pub fn is_empty(&self) -> bool {
        self.fill.is_none()
            && self.stroke.is_none()
            && self.text.is_none()
            && self.shadow.is_none()
            && self.gap.is_none()
            && self.padding.is_none()
            && self.typography.is_none()
    }
}

/// The UI component family a node was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Button,
    Card,
    Navigation,
    Form,
    Icon,
    Input,
    Avatar,
    Badge,
    Dialog,
    Dropdown,
    Unknown,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Button => "button",
            PatternKind::Card => "card",
            PatternKind::Navigation => "navigation",
            PatternKind::Form => "form",
            PatternKind::Icon => "icon",
            PatternKind::Input => "input",
            PatternKind::Avatar => "avatar",
            PatternKind::Badge => "badge",
            PatternKind::Dialog => "dialog",
            PatternKind::Dropdown => "dropdown",
            PatternKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized component pattern with its match confidence.
///
/// Properties are loosely typed on purpose; each recognizer records
/// whatever it learned (variant sizes, item counts, disabled flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl ComponentPattern {
    pub fn unknown() -> ComponentPattern {
        ComponentPattern {
            kind: PatternKind::Unknown,
            confidence: 0.0,
            variant: None,
            properties: serde_json::Map::new(),
        }
    }
}

/// Free-form metadata carried on every design node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMeta {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "TokenRefs::is_empty")]
    pub tokens: TokenRefs,
    /// Box the builder normalized the node to when a sizing heuristic
    /// fired. Validation and correction measure dimensions against this
    /// basis instead of the captured box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_box: Option<BoundingBox>,
    /// Component pattern recognized for this node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_pattern: Option<ComponentPattern>,
    /// Accumulated notes: conversion heuristics that fired, plus any
    /// post-hoc AI insight annotations merged by external collaborators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// One node in the target scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    /// Always equal to the originating snapshot node id.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    pub bounding_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<StrokeAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_align: Option<AxisAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_grow: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positioning: Option<Positioning>,
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyBlock>,
    pub meta: NodeMeta,
}

impl DesignNode {
    /// Layout mode of this node, treating a missing block as no auto-layout.
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.as_ref().map(|l| l.mode).unwrap_or_default()
    }
}
