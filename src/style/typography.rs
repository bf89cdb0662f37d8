//! Font and text style parsing.

use std::collections::HashMap;

use crate::tokens::{find_typography_token, normalize_font_weight, BASE_FONT_SIZE};
use crate::types::{TextAlign, TextCase, TextDecoration, TypographyBlock};

use super::color::solid_paint;
use super::values::parse_numeric;

/// Typography block plus the matched catalog token name.
#[derive(Debug, Clone)]
pub struct TypographyConversion {
    pub block: TypographyBlock,
    pub token: Option<String>,
}

/// Convert text styles for a node with text content.
pub fn parse_typography(
    text_content: &str,
    styles: &HashMap<String, String>,
) -> TypographyConversion {
    let font_family = styles.get("font-family").and_then(|v| first_family(v));
    let font_size = styles.get("font-size").and_then(|v| parse_numeric(v));
    let font_weight = styles.get("font-weight").map(|v| v.trim().to_string());
    let font_style = styles.get("font-style").map(|v| v.trim().to_ascii_lowercase());
    let line_height = styles
        .get("line-height")
        .and_then(|v| parse_line_height(v, font_size));
    let letter_spacing = styles
        .get("letter-spacing")
        .and_then(|v| parse_letter_spacing(v, font_size));

    let text_align = match styles.get("text-align").map(|v| v.trim()) {
        Some("center") => TextAlign::Center,
        Some("right") => TextAlign::Right,
        Some("justify") => TextAlign::Justified,
        _ => TextAlign::Left,
    };

    let text_case = match styles
        .get("text-transform")
        .map(|v| v.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("uppercase") => Some(TextCase::Upper),
        Some("lowercase") => Some(TextCase::Lower),
        Some("capitalize") => Some(TextCase::Title),
        _ => None,
    };

    let text_decoration = styles
        .get("text-decoration")
        .map(|v| v.to_ascii_lowercase())
        .and_then(|v| {
            if v.contains("underline") {
                Some(TextDecoration::Underline)
            } else if v.contains("line-through") {
                Some(TextDecoration::Strikethrough)
            } else {
                None
            }
        });

    let fills = styles
        .get("color")
        .and_then(|v| solid_paint(v))
        .map(|paint| vec![paint]);

    let token = find_typography_token(
        font_family.as_deref(),
        font_size,
        font_weight.as_deref().and_then(normalize_font_weight),
        line_height,
        letter_spacing,
    )
    .map(|t| t.name.to_string());

    TypographyConversion {
        block: TypographyBlock {
            characters: text_content.to_string(),
            font_family,
            font_size,
            font_weight,
            font_style,
            line_height,
            letter_spacing,
            text_align,
            text_case,
            text_decoration,
            fills,
        },
        token,
    }
}

/// First family of a font stack, quotes stripped.
fn first_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim().replace(['\'', '"'], "");
    (!first.is_empty()).then_some(first)
}

/// Line-height heuristic.
///
/// A percentage is relative to the font size. A bare number below 10 is a
/// unitless multiplier of the font size; 10 and above is an absolute pixel
/// length. The threshold is a compatibility heuristic, not a CSS rule, and
/// must stay exactly here.
pub(crate) fn parse_line_height(value: &str, font_size: Option<f32>) -> Option<f32> {
    let trimmed = value.trim();
    if trimmed.ends_with('%') {
        let percent = parse_numeric(trimmed)? / 100.0;
        return font_size.map(|size| size * percent);
    }
    let number = parse_numeric(trimmed)?;
    if number < 10.0 {
        Some(number * font_size.unwrap_or(BASE_FONT_SIZE))
    } else {
        Some(number)
    }
}

/// Letter-spacing in `em` scales with the font size; anything else is
/// read as pixels.
pub(crate) fn parse_letter_spacing(value: &str, font_size: Option<f32>) -> Option<f32> {
    let trimmed = value.trim();
    if trimmed.ends_with("em") && !trimmed.ends_with("rem") {
        let em = parse_numeric(trimmed)?;
        return font_size.map(|size| size * em);
    }
    parse_numeric(trimmed)
}
