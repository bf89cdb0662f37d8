use std::collections::HashMap;

use crate::types::{
    AxisAlign, BoundingBox, CornerRadius, Effect, LayoutMode, Paint, Positioning, SnapshotNode,
    TextCase,
};

use super::*;

fn styles(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn node_with_styles(pairs: &[(&str, &str)]) -> SnapshotNode {
    SnapshotNode {
        id: "n1".to_string(),
        parent_id: None,
        tag_name: "div".to_string(),
        attributes: HashMap::new(),
        classes: Vec::new(),
        text_content: None,
        bounding_box: BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 40.0,
        },
        styles: styles(pairs),
        children: Vec::new(),
    }
}

#[test]
fn short_hex_expands_to_full_hex() {
    let short = parse_color("#fff").expect("short hex should parse");
    let long = parse_color("#ffffff").expect("long hex should parse");
    assert_eq!(short, long);
    assert_eq!(short.to_hex(), "#ffffff");
}

#[test]
fn hex_with_alpha_nibbles() {
    let color = parse_color("#11223344").expect("8-digit hex should parse");
    assert!((color.r - 0x11 as f32 / 255.0).abs() < 1e-6);
    assert!((color.a - 0x44 as f32 / 255.0).abs() < 1e-6);
}

#[test]
fn rgb_percentages_scale_to_unit_range() {
    let color = parse_color("rgb(100%, 50%, 0%)").expect("percent rgb should parse");
    assert!((color.r - 1.0).abs() < 1e-6);
    assert!((color.g - 0.5).abs() < 1e-6);
    assert!((color.b - 0.0).abs() < 1e-6);
    assert!((color.a - 1.0).abs() < 1e-6);
}

#[test]
fn rgba_alpha_is_read_verbatim() {
    let color = parse_color("rgba(255, 0, 0, 0.5)").expect("rgba should parse");
    assert!((color.a - 0.5).abs() < 1e-6);
}

#[test]
fn named_colors_are_not_guessed() {
    assert!(parse_color("rebeccapurple").is_none());
}

#[test]
fn gradient_with_inner_rgba_keeps_both_stops() {
    let paint = parse_linear_gradient(
        "linear-gradient(90deg, rgba(255, 0, 0, 0.5) 0%, rgb(0, 0, 255) 100%)",
    )
    .expect("gradient should parse");
    let Paint::LinearGradient { gradient_stops, .. } = paint else {
        panic!("expected a linear gradient paint");
    };
    assert_eq!(gradient_stops.len(), 2);
    assert!((gradient_stops[0].position - 0.0).abs() < 1e-6);
    assert!((gradient_stops[1].position - 1.0).abs() < 1e-6);
}

#[test]
fn gradient_stops_without_positions_default_to_ends() {
    let paint = parse_linear_gradient("linear-gradient(to right, #ff0000, #0000ff)")
        .expect("gradient should parse");
    let Paint::LinearGradient { gradient_stops, .. } = paint else {
        panic!("expected a linear gradient paint");
    };
    assert!((gradient_stops[0].position - 0.0).abs() < 1e-6);
    assert!((gradient_stops[1].position - 1.0).abs() < 1e-6);
}

#[test]
fn background_color_produces_solid_fill() {
    let conversion = fill_paints(&styles(&[("background-color", "#112233")]));
    let fills = conversion.paints.expect("fill expected");
    assert_eq!(fills.len(), 1);
    let color = fills[0].solid_color().expect("solid paint expected");
    assert_eq!(color.to_hex(), "#112233");
}

#[test]
fn transparent_background_produces_no_fill() {
    let conversion = fill_paints(&styles(&[("background-color", "transparent")]));
    assert!(conversion.paints.is_none());
}

#[test]
fn border_shorthand_tokens_cover_missing_sides() {
    let conversion = stroke_paints(&styles(&[
        ("border-width", "2px"),
        ("border-style", "solid"),
        ("border-color", "#ff0000"),
    ]));
    assert_eq!(conversion.weight, Some(2.0));
    let strokes = conversion.paints.expect("stroke expected");
    assert_eq!(
        strokes[0].solid_color().map(|c| c.to_hex()).as_deref(),
        Some("#ff0000")
    );
}

#[test]
fn zero_width_border_is_invisible() {
    let conversion = stroke_paints(&styles(&[
        ("border-width", "0"),
        ("border-style", "solid"),
        ("border-color", "#000000"),
    ]));
    assert!(conversion.paints.is_none());
    assert!(conversion.weight.is_none());
}

#[test]
fn shadow_with_rgba_color_is_a_single_effect() {
    let conversion = parse_effects(&styles(&[(
        "box-shadow",
        "0 4px 6px rgba(0, 0, 0, 0.1)",
    )]));
    let effects = conversion.effects.expect("effects expected");
    assert_eq!(effects.len(), 1);
    let Effect::DropShadow {
        offset,
        radius,
        color,
        ..
    } = &effects[0]
    else {
        panic!("expected a drop shadow");
    };
    assert!((offset.y - 4.0).abs() < 1e-6);
    assert!((radius - 6.0).abs() < 1e-6);
    assert!((color.a - 0.1).abs() < 1e-6);
}

#[test]
fn inset_shadow_becomes_inner_shadow() {
    let conversion = parse_effects(&styles(&[("box-shadow", "inset 0 1px 2px #000000")]));
    let effects = conversion.effects.expect("effects expected");
    assert!(matches!(effects[0], Effect::InnerShadow { .. }));
}

#[test]
fn comma_separated_shadow_layers_stay_separate() {
    let conversion = parse_effects(&styles(&[(
        "box-shadow",
        "0 1px 2px rgba(0,0,0,0.3), 0 2px 6px 2px rgba(0,0,0,0.15)",
    )]));
    let effects = conversion.effects.expect("effects expected");
    assert_eq!(effects.len(), 2);
}

#[test]
fn blur_filter_becomes_layer_blur() {
    let conversion = parse_effects(&styles(&[("filter", "blur(4px)")]));
    let effects = conversion.effects.expect("effects expected");
    assert!(matches!(effects[0], Effect::LayerBlur { radius } if (radius - 4.0).abs() < 1e-6));
}

#[test]
fn flex_column_maps_to_vertical_layout_with_snapped_gap() {
    let conversion = parse_layout(&styles(&[
        ("display", "flex"),
        ("flex-direction", "column"),
        ("gap", "15px"),
    ]));
    let block = conversion.block.expect("layout block expected");
    assert_eq!(block.mode, LayoutMode::Vertical);
    assert_eq!(block.item_spacing, Some(16.0));
    assert_eq!(conversion.gap_token.as_deref(), Some("spacing-4"));
}

#[test]
fn inline_flex_maps_to_auto_layout_like_flex() {
    let conversion = parse_layout(&styles(&[
        ("display", "inline-flex"),
        ("gap", "8px"),
    ]));
    let block = conversion.block.expect("layout block expected");
    assert_eq!(block.mode, LayoutMode::Horizontal);
    assert_eq!(block.item_spacing, Some(8.0));
}

#[test]
fn padding_shorthand_two_values_expand_vertically_and_horizontally() {
    let conversion = parse_layout(&styles(&[("padding", "10px 20px")]));
    let block = conversion.block.expect("layout block expected");
    let padding = block.padding.expect("padding expected");
    // 10 ties between 8 and 12 and resolves down; 20 ties down to 16
    assert!((padding.top - 8.0).abs() < 1e-6);
    assert!((padding.left - 16.0).abs() < 1e-6);
    assert!((padding.top - padding.bottom).abs() < 1e-6);
    assert!((padding.left - padding.right).abs() < 1e-6);
}

#[test]
fn padding_shorthand_wins_over_per_side_properties() {
    let conversion = parse_layout(&styles(&[
        ("padding", "8px"),
        ("padding-top", "32px"),
        ("padding-right", "32px"),
        ("padding-bottom", "32px"),
        ("padding-left", "32px"),
    ]));
    let block = conversion.block.expect("layout block expected");
    let padding = block.padding.expect("padding expected");
    assert!((padding.top - 8.0).abs() < 1e-6);
}

#[test]
fn grid_keeps_its_template_in_grid_info() {
    let conversion = parse_layout(&styles(&[
        ("display", "grid"),
        ("grid-template-columns", "1fr 1fr 1fr"),
        ("gap", "24px"),
    ]));
    let block = conversion.block.expect("layout block expected");
    assert_eq!(block.mode, LayoutMode::Vertical);
    let grid = block.grid.expect("grid info expected");
    assert_eq!(grid.template_columns.as_deref(), Some("1fr 1fr 1fr"));
    assert_eq!(block.item_spacing, Some(24.0));
}

#[test]
fn plain_block_element_gets_no_layout_block() {
    let conversion = parse_layout(&styles(&[("display", "block")]));
    assert!(conversion.block.is_none());
}

#[test]
fn percent_line_height_scales_with_font_size() {
    let conversion = parse_typography(
        "hello",
        &styles(&[("font-size", "20px"), ("line-height", "150%")]),
    );
    assert_eq!(conversion.block.line_height, Some(30.0));
}

#[test]
fn small_unitless_line_height_is_a_multiplier() {
    let conversion = parse_typography(
        "hello",
        &styles(&[("font-size", "16px"), ("line-height", "1.5")]),
    );
    assert_eq!(conversion.block.line_height, Some(24.0));
}

#[test]
fn large_line_height_is_absolute_pixels() {
    let conversion = parse_typography(
        "hello",
        &styles(&[("font-size", "16px"), ("line-height", "24")]),
    );
    assert_eq!(conversion.block.line_height, Some(24.0));
}

#[test]
fn em_letter_spacing_scales_with_font_size() {
    let conversion = parse_typography(
        "hello",
        &styles(&[("font-size", "20px"), ("letter-spacing", "0.1em")]),
    );
    let spacing = conversion.block.letter_spacing.expect("spacing expected");
    assert!((spacing - 2.0).abs() < 1e-4);
}

#[test]
fn first_font_family_loses_its_quotes() {
    let conversion = parse_typography(
        "hello",
        &styles(&[("font-family", "'Inter', \"Helvetica Neue\", sans-serif")]),
    );
    assert_eq!(conversion.block.font_family.as_deref(), Some("Inter"));
}

#[test]
fn uppercase_transform_maps_to_text_case() {
    let conversion = parse_typography("hello", &styles(&[("text-transform", "uppercase")]));
    assert_eq!(conversion.block.text_case, Some(TextCase::Upper));
}

#[test]
fn body_text_matches_the_catalog_token() {
    let conversion = parse_typography(
        "hello",
        &styles(&[
            ("font-family", "Inter"),
            ("font-size", "16px"),
            ("font-weight", "400"),
            ("line-height", "24px"),
        ]),
    );
    assert_eq!(conversion.token.as_deref(), Some("body-md"));
}

#[test]
fn mapping_collects_tokens_and_rem_values() {
    let node = node_with_styles(&[
        ("display", "flex"),
        ("gap", "16px"),
        ("background-color", "#4f46e5"),
    ]);
    let mapping = map_styles(&node);
    assert_eq!(mapping.tokens.gap.as_deref(), Some("spacing-4"));
    assert_eq!(mapping.tokens.gap_rem, Some(1.0));
    assert_eq!(mapping.tokens.fill.as_deref(), Some("accent-primary"));
}

#[test]
fn absolute_and_fixed_positions_both_map_to_absolute() {
    for position in ["absolute", "fixed"] {
        let node = node_with_styles(&[("position", position)]);
        let mapping = map_styles(&node);
        assert_eq!(mapping.positioning, Some(Positioning::Absolute));
    }
}

#[test]
fn static_position_maps_to_none() {
    let node = node_with_styles(&[("position", "static")]);
    let mapping = map_styles(&node);
    assert!(mapping.positioning.is_none());
}

#[test]
fn margin_auto_centering_sets_layout_align() {
    let node = node_with_styles(&[("margin", "0 auto")]);
    let mapping = map_styles(&node);
    assert_eq!(mapping.layout_align, Some(AxisAlign::Center));
}

#[test]
fn corner_radius_single_value_is_uniform() {
    let node = node_with_styles(&[("border-radius", "8px")]);
    let mapping = map_styles(&node);
    assert_eq!(mapping.corner_radius, Some(CornerRadius::Uniform(8.0)));
}

#[test]
fn corner_radius_four_values_map_per_corner() {
    let node = node_with_styles(&[("border-radius", "1px 2px 3px 4px")]);
    let mapping = map_styles(&node);
    assert_eq!(
        mapping.corner_radius,
        Some(CornerRadius::PerCorner {
            top_left: 1.0,
            top_right: 2.0,
            bottom_right: 3.0,
            bottom_left: 4.0,
        })
    );
}
