//! Declaration-to-design style mapping.
//!
//! Each submodule converts one family of CSS declarations; [`map_styles`]
//! runs all of them over a snapshot node and assembles the result into a
//! single [`StyleMapping`] ready to be attached to a design node.

mod color;
mod effects;
mod gradient;
mod layout;
mod typography;
mod values;

#[cfg(test)]
mod tests;

use crate::tokens::to_rem;
use crate::types::{
    AxisAlign, CornerRadius, Effect, LayoutBlock, Paint, Positioning, SnapshotNode, StrokeAlign,
    TokenRefs, TypographyBlock,
};

pub use color::{fill_paints, parse_color, solid_paint, stroke_paints};
pub use effects::parse_effects;
pub use gradient::parse_linear_gradient;
pub use layout::parse_layout;
pub use typography::parse_typography;
pub(crate) use values::parse_numeric;

/// Everything the style mapper extracted for one snapshot node.
#[derive(Debug, Clone, Default)]
pub struct StyleMapping {
    pub fills: Option<Vec<Paint>>,
    pub strokes: Option<Vec<Paint>>,
    pub stroke_weight: Option<f32>,
    pub stroke_align: Option<StrokeAlign>,
    pub corner_radius: Option<CornerRadius>,
    pub effects: Option<Vec<Effect>>,
    pub layout: Option<LayoutBlock>,
    pub layout_align: Option<AxisAlign>,
    pub layout_grow: Option<f32>,
    pub positioning: Option<Positioning>,
    pub typography: Option<TypographyBlock>,
    pub tokens: TokenRefs,
}

/// Map a snapshot node's computed styles into design-side style blocks.
pub fn map_styles(node: &SnapshotNode) -> StyleMapping {
    let styles = &node.styles;

    let fill = fill_paints(styles);
    let stroke = stroke_paints(styles);
    let effect = parse_effects(styles);
    let layout = parse_layout(styles);

    let typography = node.text().map(|text| parse_typography(text, styles));

    let corner_radius = styles
        .get("border-radius")
        .and_then(|v| parse_corner_radius(v));

    let layout_align = styles
        .get("align-self")
        .and_then(|v| layout::map_counter_align(Some(v.as_str())))
        .or_else(|| centered_by_margin(node).then_some(AxisAlign::Center));

    let layout_grow = styles
        .get("flex-grow")
        .or_else(|| styles.get("flex"))
        .and_then(|v| parse_numeric(v))
        .filter(|grow| *grow > 0.0);

    let positioning = styles
        .get("position")
        .map(|v| v.trim())
        .filter(|v| *v == "absolute" || *v == "fixed")
        .map(|_| Positioning::Absolute);

    let font_size = typography
        .as_ref()
        .and_then(|t| t.block.font_size)
        .filter(|size| *size > 0.0);
    let line_height = typography.as_ref().and_then(|t| t.block.line_height);

    let tokens = TokenRefs {
        fill: fill.token,
        stroke: stroke.token,
        text: styles
            .get("color")
            .and_then(|v| crate::tokens::find_color_token(&v.to_ascii_lowercase()))
            .map(str::to_string),
        shadow: effect.token,
        gap: layout.gap_token,
        padding: layout.padding_tokens,
        typography: typography.as_ref().and_then(|t| t.token.clone()),
        gap_rem: layout
            .block
            .as_ref()
            .and_then(|b| b.item_spacing)
            .and_then(to_rem),
        font_size_rem: font_size.and_then(to_rem),
        line_height_rem: line_height.and_then(to_rem),
    };

    StyleMapping {
        fills: fill.paints,
        strokes: stroke.paints,
        stroke_weight: stroke.weight,
        stroke_align: stroke.align,
        corner_radius,
        effects: effect.effects,
        layout: layout.block,
        layout_align,
        layout_grow,
        positioning,
        typography: typography.map(|t| t.block),
        tokens,
    }
}

/// `border-radius` with one value maps to a uniform radius; more values
/// expand per corner in the usual TL/TR/BR/BL order. Slash-separated
/// elliptical radii collapse to their first (horizontal) half.
fn parse_corner_radius(value: &str) -> Option<CornerRadius> {
    let horizontal = value.split('/').next()?;
    let radii: Vec<f32> = horizontal
        .split_whitespace()
        .filter_map(parse_numeric)
        .collect();
    match radii.as_slice() {
        [] => None,
        [uniform] => (*uniform > 0.0).then_some(CornerRadius::Uniform(*uniform)),
        [v, h] => Some(CornerRadius::PerCorner {
            top_left: *v,
            top_right: *h,
            bottom_right: *v,
            bottom_left: *h,
        }),
        [tl, tr_bl, br] => Some(CornerRadius::PerCorner {
            top_left: *tl,
            top_right: *tr_bl,
            bottom_right: *br,
            bottom_left: *tr_bl,
        }),
        [tl, tr, br, bl, ..] => Some(CornerRadius::PerCorner {
            top_left: *tl,
            top_right: *tr,
            bottom_right: *br,
            bottom_left: *bl,
        }),
    }
}

/// Horizontal centering expressed through margins or a -50% translate
/// rather than the parent's alignment properties.
fn centered_by_margin(node: &SnapshotNode) -> bool {
    let margin_auto = |key: &str| {
        node.style(key)
            .is_some_and(|v| v.split_whitespace().any(|part| part == "auto"))
    };
    if margin_auto("margin") {
        return true;
    }
    if margin_auto("margin-left") && margin_auto("margin-right") {
        return true;
    }
    node.style("transform")
        .is_some_and(|v| v.replace(' ', "").contains("translateX(-50%"))
}
