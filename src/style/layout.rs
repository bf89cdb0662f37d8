//! Flex/grid auto-layout, padding, and overflow parsing.

use std::collections::HashMap;

use crate::tokens::snap_spacing;
use crate::types::{
    AxisAlign, AxisSizing, GridInfo, LayoutBlock, LayoutMode, LayoutWrap, OverflowDirection,
    Padding, PaddingTokens,
};

use super::values::{expand_box_shorthand, parse_length, split_whitespace_top_level};

/// Layout block plus the spacing tokens matched while snapping.
#[derive(Debug, Clone, Default)]
pub struct LayoutConversion {
    pub block: Option<LayoutBlock>,
    pub gap_token: Option<String>,
    pub padding_tokens: Option<PaddingTokens>,
}

/// Convert display/gap/padding/overflow declarations into a layout block.
///
/// Returns no block when nothing layout-relevant was declared, so plain
/// elements stay free of an empty auto-layout record.
pub fn parse_layout(styles: &HashMap<String, String>) -> LayoutConversion {
    let display = styles.get("display").map(|v| v.trim());

    let mut mode = LayoutMode::None;
    let mut gap: Option<f32> = None;
    let mut gap_token: Option<String> = None;
    let mut primary_align: Option<AxisAlign> = None;
    let mut counter_align: Option<AxisAlign> = None;
    let mut primary_sizing: Option<AxisSizing> = None;
    let mut counter_sizing: Option<AxisSizing> = None;
    let mut wrap: Option<LayoutWrap> = None;
    let mut grid: Option<GridInfo> = None;

    let raw_gap = || {
        styles
            .get("gap")
            .or_else(|| styles.get("row-gap"))
            .or_else(|| styles.get("column-gap"))
            .and_then(|v| parse_length(v))
    };

    if matches!(display, Some("flex") | Some("inline-flex")) {
        let direction = styles
            .get("flex-direction")
            .map(|v| v.trim())
            .unwrap_or("row");
        mode = if direction == "column" {
            LayoutMode::Vertical
        } else {
            LayoutMode::Horizontal
        };

        if let Some(raw) = raw_gap() {
            let snapped = snap_spacing(raw);
            gap = snapped.map(|(px, _)| px).or(Some(raw));
            gap_token = snapped.map(|(_, token)| token.to_string());
        }

        primary_align = map_primary_align(styles.get("justify-content").map(String::as_str));
        counter_align = map_counter_align(styles.get("align-items").map(String::as_str));
        wrap = styles.get("flex-wrap").and_then(|v| {
            let trimmed = v.trim();
            (!trimmed.is_empty() && trimmed != "nowrap").then_some(LayoutWrap::Wrap)
        });

        let explicit = |key: &str| {
            styles
                .get(key)
                .map(|v| v.trim())
                .is_some_and(|v| !v.is_empty() && v != "auto")
        };
        let (primary_key, counter_key) = match mode {
            LayoutMode::Horizontal => ("width", "height"),
            _ => ("height", "width"),
        };
        primary_sizing = Some(if explicit(primary_key) {
            AxisSizing::Fixed
        } else {
            AxisSizing::Auto
        });
        counter_sizing = Some(if explicit(counter_key) {
            AxisSizing::Fixed
        } else {
            AxisSizing::Auto
        });
    } else if display == Some("grid") || display == Some("inline-grid") {
        // grids approximate to a vertical stack; the template is preserved
        mode = LayoutMode::Vertical;

        let column_gap = styles
            .get("column-gap")
            .or_else(|| styles.get("gap"))
            .and_then(|v| parse_length(v));
        let row_gap = styles
            .get("row-gap")
            .or_else(|| styles.get("gap"))
            .and_then(|v| parse_length(v));

        grid = Some(GridInfo {
            template_columns: styles.get("grid-template-columns").map(|v| v.trim().to_string()),
            template_rows: styles.get("grid-template-rows").map(|v| v.trim().to_string()),
            template_areas: styles.get("grid-template-areas").map(|v| v.trim().to_string()),
            auto_flow: styles.get("grid-auto-flow").map(|v| v.trim().to_string()),
            column_gap,
            row_gap,
        });

        if column_gap.is_some() || row_gap.is_some() {
            let max_gap = column_gap.unwrap_or(0.0).max(row_gap.unwrap_or(0.0));
            let snapped = snap_spacing(max_gap);
            gap = snapped.map(|(px, _)| px).or(Some(max_gap));
            gap_token = snapped.map(|(_, token)| token.to_string());
        }

        primary_align = map_primary_align(styles.get("justify-content").map(String::as_str));
        counter_align = map_counter_align(styles.get("align-items").map(String::as_str));
    }

    let (padding, padding_tokens) = parse_padding(styles);

    let (clips_content, overflow_direction) = parse_overflow(styles);

    if mode == LayoutMode::None
        && padding.is_none()
        && clips_content.is_none()
        && overflow_direction == OverflowDirection::None
    {
        return LayoutConversion::default();
    }

    LayoutConversion {
        block: Some(LayoutBlock {
            mode,
            item_spacing: gap,
            padding,
            primary_axis_align_items: primary_align,
            counter_axis_align_items: counter_align,
            primary_axis_sizing_mode: primary_sizing,
            counter_axis_sizing_mode: counter_sizing,
            layout_wrap: wrap,
            clips_content,
            overflow_direction,
            grid,
        }),
        gap_token,
        padding_tokens,
    }
}

/// Resolve padding with the documented asymmetric precedence: the
/// shorthand wins whenever it parses; the four per-side properties are
/// consulted only as a complete fallback.
fn parse_padding(styles: &HashMap<String, String>) -> (Option<Padding>, Option<PaddingTokens>) {
    let from_shorthand = styles.get("padding").and_then(|value| {
        let segments: Vec<f32> = split_whitespace_top_level(value)
            .iter()
            .map(|s| parse_length(s))
            .collect::<Option<Vec<f32>>>()?;
        let (top, right, bottom, left) = expand_box_shorthand(&segments)?;
        Some(Padding {
            top,
            right,
            bottom,
            left,
        })
    });

    let padding = from_shorthand.or_else(|| {
        let side = |key: &str| styles.get(key).and_then(|v| parse_length(v));
        Some(Padding {
            top: side("padding-top")?,
            right: side("padding-right")?,
            bottom: side("padding-bottom")?,
            left: side("padding-left")?,
        })
    });

    let Some(raw) = padding else {
        return (None, None);
    };

    // snap each side to the spacing scale and report the matched tokens
    let snap = |px: f32| snap_spacing(px).unwrap_or((px, "spacing-0"));
    let (top, top_token) = snap(raw.top);
    let (right, right_token) = snap(raw.right);
    let (bottom, bottom_token) = snap(raw.bottom);
    let (left, left_token) = snap(raw.left);

    (
        Some(Padding {
            top,
            right,
            bottom,
            left,
        }),
        Some(PaddingTokens {
            top: top_token.to_string(),
            right: right_token.to_string(),
            bottom: bottom_token.to_string(),
            left: left_token.to_string(),
        }),
    )
}

/// Overflow is evaluated independently per axis: hidden/clip set the
/// content-clip flag, scroll/auto set the directional overflow flag.
fn parse_overflow(styles: &HashMap<String, String>) -> (Option<bool>, OverflowDirection) {
    let first_word = |key: &str| {
        styles
            .get(key)
            .and_then(|v| v.split_whitespace().next())
            .map(str::to_string)
    };
    let overflow = first_word("overflow");
    let overflow_x = first_word("overflow-x").or_else(|| overflow.clone());
    let overflow_y = first_word("overflow-y").or_else(|| overflow.clone());

    let hidden = |v: &Option<String>| matches!(v.as_deref(), Some("hidden") | Some("clip"));
    let scrollable = |v: &Option<String>| matches!(v.as_deref(), Some("scroll") | Some("auto"));

    let clips = (hidden(&overflow) || hidden(&overflow_x) || hidden(&overflow_y)).then_some(true);

    let direction = match (scrollable(&overflow_x), scrollable(&overflow_y)) {
        (true, true) => OverflowDirection::Both,
        (true, false) => OverflowDirection::Horizontal,
        (false, true) => OverflowDirection::Vertical,
        (false, false) => OverflowDirection::None,
    };

    (clips, direction)
}

pub(crate) fn map_primary_align(value: Option<&str>) -> Option<AxisAlign> {
    match value.map(str::trim)? {
        "flex-start" | "start" => Some(AxisAlign::Min),
        "center" => Some(AxisAlign::Center),
        "flex-end" | "end" => Some(AxisAlign::Max),
        "space-between" | "space-around" | "space-evenly" => Some(AxisAlign::SpaceBetween),
        _ => None,
    }
}

pub(crate) fn map_counter_align(value: Option<&str>) -> Option<AxisAlign> {
    match value.map(str::trim)? {
        "flex-start" | "start" => Some(AxisAlign::Min),
        "center" => Some(AxisAlign::Center),
        "flex-end" | "end" => Some(AxisAlign::Max),
        "stretch" => Some(AxisAlign::Stretch),
        "baseline" => Some(AxisAlign::Baseline),
        _ => None,
    }
}
