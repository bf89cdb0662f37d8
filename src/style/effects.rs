//! `box-shadow` and `filter` effect parsing, plus shadow-token matching.

use std::collections::HashMap;

use crate::tokens::match_shadow_token;
use crate::types::{Color, Effect, Vec2};

use super::color::parse_color;
use super::values::{function_body, parse_numeric, split_top_level, split_whitespace_top_level};

/// Parsed effect list with the optionally matched catalog token.
#[derive(Debug, Clone, Default)]
pub struct EffectConversion {
    pub effects: Option<Vec<Effect>>,
    pub token: Option<String>,
}

/// Convert `box-shadow` and `filter: blur(..)` declarations into effects.
///
/// Shadow token sequence: `[inset]? <color>? <offsetX> <offsetY> [<blur>
/// [<spread>]]`. Missing blur/spread default to 0; a missing color is
/// solid black at full coverage.
pub fn parse_effects(styles: &HashMap<String, String>) -> EffectConversion {
    let mut effects: Vec<Effect> = Vec::new();

    if let Some(box_shadow) = styles.get("box-shadow") {
        if box_shadow.trim() != "none" {
            for shadow in split_top_level(box_shadow, ',') {
                if let Some(effect) = parse_single_shadow(&shadow) {
                    effects.push(effect);
                }
            }
        }
    }

    if let Some(filter) = styles.get("filter") {
        if filter.contains("blur") {
            if let Some(body) = function_body(filter, "blur") {
                if let Some(radius) = parse_numeric(body) {
                    effects.push(Effect::LayerBlur { radius });
                }
            }
        }
    }

    if effects.is_empty() {
        return EffectConversion::default();
    }

    let token = match_shadow_token(&effects).map(str::to_string);
    EffectConversion {
        effects: Some(effects),
        token,
    }
}

fn parse_single_shadow(shadow: &str) -> Option<Effect> {
    let tokens = split_whitespace_top_level(shadow);
    if tokens.len() < 3 {
        return None;
    }

    let mut inset = false;
    let mut color: Option<Color> = None;
    let mut lengths: Vec<f32> = Vec::new();

    for token in &tokens {
        if token == "inset" {
            inset = true;
        } else if token.starts_with('#') || token.to_ascii_lowercase().starts_with("rgb") {
            color = parse_color(token).or(color);
        } else if let Some(length) = parse_numeric(token) {
            lengths.push(length);
        }
    }

    if lengths.len() < 2 {
        return None;
    }

    let offset = Vec2 {
        x: lengths[0],
        y: lengths[1],
    };
    let radius = lengths.get(2).copied().unwrap_or(0.0);
    let spread = lengths.get(3).copied().unwrap_or(0.0);
    let color = color.unwrap_or(Color::BLACK);

    Some(if inset {
        Effect::InnerShadow {
            offset,
            radius,
            spread,
            color,
        }
    } else {
        Effect::DropShadow {
            offset,
            radius,
            spread,
            color,
        }
    })
}
