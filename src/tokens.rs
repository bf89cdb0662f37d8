//! Static design-token catalogs and nearest-match helpers.
//!
//! These tables are never mutated; concurrent conversions share them freely.
//! Matching is reporting-only: a matched token name lands in node metadata
//! but never changes the generated values, except for spacing, which snaps
//! gaps and padding onto the scale.

use crate::types::Effect;

pub const BASE_FONT_SIZE: f32 = 16.0;

/// Spacing scale in pixels, ascending.
pub const SPACING_SCALE: [(&str, f32); 13] = [
    ("spacing-0", 0.0),
    ("spacing-1", 4.0),
    ("spacing-2", 8.0),
    ("spacing-3", 12.0),
    ("spacing-4", 16.0),
    ("spacing-5", 24.0),
    ("spacing-6", 32.0),
    ("spacing-7", 40.0),
    ("spacing-8", 48.0),
    ("spacing-9", 64.0),
    ("spacing-10", 80.0),
    ("spacing-11", 96.0),
    ("spacing-12", 120.0),
];

/// Snap a pixel value to the nearest spacing-scale entry.
/// Ties resolve to the smaller value.
pub fn snap_spacing(value: f32) -> Option<(f32, &'static str)> {
    if !value.is_finite() {
        return None;
    }
    let mut best: Option<(f32, &'static str)> = None;
    for (token, px) in SPACING_SCALE {
        let distance = (px - value).abs();
        match best {
            Some((best_px, _)) if (best_px - value).abs() <= distance => {}
            _ => best = Some((px, token)),
        }
    }
    best
}

/// Convert pixels to rem at the base font size, rounded to 3 decimals.
pub fn to_rem(px: f32) -> Option<f32> {
    if !px.is_finite() {
        return None;
    }
    Some((px / BASE_FONT_SIZE * 1000.0).round() / 1000.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypographyToken {
    pub name: &'static str,
    pub font_family: &'static str,
    pub font_size: f32,
    pub font_weight: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
}

pub const TYPOGRAPHY_TOKENS: [TypographyToken; 8] = [
    TypographyToken { name: "heading-xl", font_family: "Inter", font_size: 40.0, font_weight: 700.0, line_height: 48.0, letter_spacing: -0.5 },
    TypographyToken { name: "heading-lg", font_family: "Inter", font_size: 32.0, font_weight: 700.0, line_height: 40.0, letter_spacing: -0.25 },
    TypographyToken { name: "heading-md", font_family: "Inter", font_size: 24.0, font_weight: 600.0, line_height: 32.0, letter_spacing: 0.0 },
    TypographyToken { name: "heading-sm", font_family: "Inter", font_size: 20.0, font_weight: 600.0, line_height: 28.0, letter_spacing: 0.0 },
    TypographyToken { name: "body-lg", font_family: "Inter", font_size: 18.0, font_weight: 500.0, line_height: 28.0, letter_spacing: 0.0 },
    TypographyToken { name: "body-md", font_family: "Inter", font_size: 16.0, font_weight: 400.0, line_height: 24.0, letter_spacing: 0.0 },
    TypographyToken { name: "body-sm", font_family: "Inter", font_size: 14.0, font_weight: 400.0, line_height: 20.0, letter_spacing: 0.0 },
    TypographyToken { name: "label-sm", font_family: "Inter", font_size: 12.0, font_weight: 500.0, line_height: 16.0, letter_spacing: 0.4 },
];

/// Normalize a CSS font-weight string ("bold", "700", ...) to a number.
pub fn normalize_font_weight(weight: &str) -> Option<f32> {
    let trimmed = weight.trim();
    if let Ok(num) = trimmed.parse::<f32>() {
        return Some(num);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "bold" => Some(700.0),
        "normal" | "regular" => Some(400.0),
        _ => None,
    }
}

/// Select the closest typography token by weighted distance
/// (size x3, weight x1, line-height x0.5, letter-spacing x1).
/// When the font family is known, only entries of that family compete.
/// Without a font size there is no basis for a match.
pub fn find_typography_token(
    font_family: Option<&str>,
    font_size: Option<f32>,
    font_weight: Option<f32>,
    line_height: Option<f32>,
    letter_spacing: Option<f32>,
) -> Option<&'static TypographyToken> {
    let size = font_size?;

    let distance = |token: &TypographyToken| {
        let size_delta = (token.font_size - size).abs();
        let weight_delta = font_weight
            .map(|w| (token.font_weight - w).abs())
            .unwrap_or(0.0);
        let line_delta = line_height
            .map(|lh| (token.line_height - lh).abs())
            .unwrap_or(0.0);
        let letter_delta = letter_spacing
            .map(|ls| (token.letter_spacing - ls).abs())
            .unwrap_or(0.0);
        size_delta * 3.0 + weight_delta + line_delta * 0.5 + letter_delta
    };

    let mut best: Option<&'static TypographyToken> = None;
    for token in &TYPOGRAPHY_TOKENS {
        if let Some(family) = font_family {
            if !token.font_family.eq_ignore_ascii_case(family) {
                continue;
            }
        }
        match best {
            Some(current) if distance(current) <= distance(token) => {}
            _ => best = Some(token),
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowKind {
    Drop,
    Inner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowLayer {
    pub kind: ShadowKind,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: &'static str,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowToken {
    pub name: &'static str,
    pub layers: &'static [ShadowLayer],
}

pub const SHADOW_TOKENS: [ShadowToken; 6] = [
    ShadowToken {
        name: "elevation-xs",
        layers: &[ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 1.0, blur: 2.0, spread: 0.0, color: "#000000", opacity: 0.05 }],
    },
    ShadowToken {
        name: "elevation-sm",
        layers: &[
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 2.0, blur: 8.0, spread: 0.0, color: "#0b0d12", opacity: 0.12 },
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 1.0, blur: 3.0, spread: 0.0, color: "#0b0d12", opacity: 0.08 },
        ],
    },
    ShadowToken {
        name: "elevation-md",
        layers: &[
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 8.0, blur: 24.0, spread: -4.0, color: "#0b0d12", opacity: 0.18 },
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 4.0, blur: 12.0, spread: -2.0, color: "#0b0d12", opacity: 0.12 },
        ],
    },
    ShadowToken {
        name: "elevation-lg",
        layers: &[
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 16.0, blur: 48.0, spread: -8.0, color: "#0b0d12", opacity: 0.2 },
            ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 8.0, blur: 24.0, spread: -4.0, color: "#0b0d12", opacity: 0.14 },
        ],
    },
    ShadowToken {
        name: "search-bar",
        layers: &[ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 1.0, blur: 6.0, spread: 0.0, color: "#202124", opacity: 0.15 }],
    },
    ShadowToken {
        name: "button-hover",
        layers: &[ShadowLayer { kind: ShadowKind::Drop, offset_x: 0.0, offset_y: 1.0, blur: 1.0, spread: 0.0, color: "#000000", opacity: 0.1 }],
    },
];

const SHADOW_MATCH_THRESHOLD: f32 = 25.0;
const SHADOW_COLOR_PENALTY: f32 = 20.0;

/// Match a parsed effect list against the shadow-token catalog.
///
/// Only candidates with the same shadow layer count compete. Per-layer
/// deviation is the offset deltas plus a quarter of the blur and spread
/// deltas, plus a fixed penalty when the hex colors differ. The lowest
/// total under the threshold wins.
pub fn match_shadow_token(effects: &[Effect]) -> Option<&'static str> {
    let shadows: Vec<&Effect> = effects.iter().filter(|e| e.is_shadow()).collect();
    if shadows.is_empty() {
        return None;
    }

    let mut best: Option<(f32, &'static str)> = None;
    for token in &SHADOW_TOKENS {
        if token.layers.len() != shadows.len() {
            continue;
        }
        let mut deviation = 0.0f32;
        for (effect, layer) in shadows.iter().zip(token.layers) {
            let (offset, radius, spread, color) = match effect {
                Effect::DropShadow { offset, radius, spread, color }
                | Effect::InnerShadow { offset, radius, spread, color } => {
                    (*offset, *radius, *spread, *color)
                }
                Effect::LayerBlur { .. } => continue,
            };
            deviation += (offset.x - layer.offset_x).abs() + (offset.y - layer.offset_y).abs();
            deviation += (radius - layer.blur).abs() * 0.25;
            deviation += (spread - layer.spread).abs() * 0.25;
            if !color.to_hex().eq_ignore_ascii_case(layer.color) {
                deviation += SHADOW_COLOR_PENALTY;
            }
        }
        match best {
            Some((best_score, _)) if best_score <= deviation => {}
            _ => best = Some((deviation, token.name)),
        }
    }

    best.filter(|(score, _)| *score < SHADOW_MATCH_THRESHOLD)
        .map(|(_, name)| name)
}

/// Static color palette, lowercase hex values.
pub const COLOR_TOKENS: [(&str, &str); 10] = [
    ("background-surface", "#0f172a"),
    ("background-elevated", "#111827"),
    ("accent-primary", "#4f46e5"),
    ("accent-secondary", "#0ea5e9"),
    ("text-primary", "#e2e8f0"),
    ("text-secondary", "#94a3b8"),
    ("border-muted", "#1e293b"),
    ("success", "#22c55e"),
    ("warning", "#facc15"),
    ("danger", "#f87171"),
];

/// Exact (case-insensitive) hex lookup into the color palette.
pub fn find_color_token(hex: &str) -> Option<&'static str> {
    COLOR_TOKENS
        .iter()
        .find(|(_, value)| value.eq_ignore_ascii_case(hex.trim()))
        .map(|(name, _)| *name)
}
