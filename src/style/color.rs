//! CSS color parsing and fill/stroke paint construction.

use std::collections::HashMap;

use crate::tokens::find_color_token;
use crate::types::{Color, Paint, StrokeAlign};

use super::gradient::parse_linear_gradient;
use super::values::{parse_numeric, split_whitespace_top_level, value_for_side};

/// Parse a CSS color value into a [`Color`].
///
/// Accepts 3/4/6/8-digit hex (with alpha) and `rgb()`/`rgba()` with 0-255
/// or percentage components. Anything else yields `None`; the caller
/// composes around the gap.
pub fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
        return parse_rgb(trimmed);
    }
    None
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |c: char| c.to_digit(16).map(|d| d as f32);
    let byte = |hi: char, lo: char| Some((nibble(hi)? * 16.0 + nibble(lo)?) / 255.0);
    let chars: Vec<char> = hex.chars().collect();
    match chars.len() {
        // short forms expand each digit: #abc -> #aabbcc
        3 | 4 => {
            let r = byte(chars[0], chars[0])?;
            let g = byte(chars[1], chars[1])?;
            let b = byte(chars[2], chars[2])?;
            let a = if chars.len() == 4 {
                byte(chars[3], chars[3])?
            } else {
                1.0
            };
            Some(Color { r, g, b, a })
        }
        6 | 8 => {
            let r = byte(chars[0], chars[1])?;
            let g = byte(chars[2], chars[3])?;
            let b = byte(chars[4], chars[5])?;
            let a = if chars.len() == 8 {
                byte(chars[6], chars[7])?
            } else {
                1.0
            };
            Some(Color { r, g, b, a })
        }
        _ => None,
    }
}

fn parse_rgb(value: &str) -> Option<Color> {
    let open = value.find('(')?;
    let close = value.rfind(')')?;
    if close <= open {
        return None;
    }
    let parts: Vec<&str> = value[open + 1..close].split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }

    let channel = |part: &str| -> f32 {
        if part.contains('%') {
            parse_numeric(part).unwrap_or(0.0) / 100.0
        } else {
            parse_numeric(part).unwrap_or(0.0) / 255.0
        }
    };

    let alpha = match parts.get(3) {
        Some(part) if part.contains('%') => parse_numeric(part).unwrap_or(1.0) / 100.0,
        Some(part) => parse_numeric(part).unwrap_or(1.0),
        None => 1.0,
    };

    Some(Color {
        r: channel(parts[0]),
        g: channel(parts[1]),
        b: channel(parts[2]),
        a: alpha,
    })
}

/// Parse a color value into a solid paint.
pub fn solid_paint(value: &str) -> Option<Paint> {
    parse_color(value).map(Paint::solid)
}

/// Fill paints derived from `background-color` and `background`.
#[derive(Debug, Clone, Default)]
pub struct FillConversion {
    pub paints: Option<Vec<Paint>>,
    pub token: Option<String>,
}

pub fn fill_paints(styles: &HashMap<String, String>) -> FillConversion {
    let mut fills: Vec<Paint> = Vec::new();
    let mut token: Option<String> = None;

    if let Some(background_color) = styles.get("background-color") {
        if background_color.trim() != "transparent" {
            if let Some(paint) = solid_paint(background_color) {
                token = find_color_token(&background_color.to_ascii_lowercase())
                    .map(str::to_string)
                    .or(token);
                fills.push(paint);
            }
        }
    }

    if let Some(background) = styles.get("background") {
        if background.contains("linear-gradient") {
            if let Some(gradient) = parse_linear_gradient(background) {
                fills.push(gradient);
            }
        }
    }

    if fills.is_empty() {
        return FillConversion::default();
    }

    if token.is_none() {
        token = fills
            .first()
            .and_then(Paint::solid_color)
            .and_then(|c| find_color_token(&c.to_hex()))
            .map(str::to_string);
    }

    FillConversion {
        paints: Some(fills),
        token,
    }
}

/// Stroke paints derived from the border properties.
#[derive(Debug, Clone, Default)]
pub struct StrokeConversion {
    pub paints: Option<Vec<Paint>>,
    pub token: Option<String>,
    pub weight: Option<f32>,
    pub align: Option<StrokeAlign>,
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Derive a single stroke from per-side and shorthand border declarations.
///
/// Each side resolves width/color/style through per-side properties first,
/// then the multi-value shorthand expansion. Only sides that are visible
/// (positive width, non-none style, non-transparent color) count; the
/// stroke weight is the maximum visible width and the paint comes from the
/// first visible side.
pub fn stroke_paints(styles: &HashMap<String, String>) -> StrokeConversion {
    let split = |key: &str| {
        styles
            .get(key)
            .map(|v| split_whitespace_top_level(v))
            .unwrap_or_default()
    };
    let width_tokens = split("border-width");
    let color_tokens = split("border-color");
    let style_tokens = split("border-style");

    struct Side {
        width: f32,
        color_value: Option<String>,
        paint: Option<Paint>,
        style: String,
        alpha: f32,
    }

    let sides: Vec<Side> = SIDES
        .iter()
        .enumerate()
        .map(|(index, side)| {
            let width = styles
                .get(&format!("border-{}-width", side))
                .and_then(|v| parse_numeric(v))
                .or_else(|| value_for_side(&width_tokens, index).and_then(parse_numeric))
                .unwrap_or(0.0);
            let color_value = styles
                .get(&format!("border-{}-color", side))
                .map(String::as_str)
                .or_else(|| value_for_side(&color_tokens, index))
                .map(str::to_string);
            let style = styles
                .get(&format!("border-{}-style", side))
                .map(String::as_str)
                .or_else(|| value_for_side(&style_tokens, index))
                .unwrap_or("")
                .to_ascii_lowercase();
            let paint = color_value.as_deref().and_then(solid_paint);
            let alpha = paint
                .as_ref()
                .and_then(Paint::solid_color)
                .map(|c| c.a)
                .unwrap_or(1.0);
            Side {
                width,
                color_value,
                paint,
                style,
                alpha,
            }
        })
        .collect();

    let visible: Vec<&Side> = sides
        .iter()
        .filter(|s| s.width > 0.0 && !s.style.is_empty() && s.style != "none" && s.alpha > 0.0)
        .collect();
    let Some(chosen) = visible.first() else {
        return StrokeConversion::default();
    };

    let max_width = visible.iter().map(|s| s.width).fold(0.0f32, f32::max);
    if max_width <= 0.0 {
        return StrokeConversion::default();
    }

    let paint = chosen.paint.clone().or_else(|| {
        styles
            .get("border-color")
            .or_else(|| styles.get("border"))
            .and_then(|v| solid_paint(v))
    });
    let Some(paint) = paint else {
        return StrokeConversion::default();
    };
    if paint.solid_color().is_some_and(|c| c.a <= 0.0) {
        return StrokeConversion::default();
    }

    let token = chosen
        .color_value
        .as_deref()
        .or_else(|| styles.get("border-color").map(String::as_str))
        .and_then(|v| find_color_token(&v.to_ascii_lowercase()))
        .or_else(|| {
            paint
                .solid_color()
                .and_then(|c| find_color_token(&c.to_hex()))
        })
        .map(str::to_string);

    StrokeConversion {
        paints: Some(vec![paint]),
        token,
        weight: Some(max_width),
        align: Some(StrokeAlign::Center),
    }
}
