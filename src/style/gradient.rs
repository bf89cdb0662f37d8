//! `linear-gradient` parsing.

use crate::types::{GradientStop, Paint, Vec2};

use super::color::parse_color;
use super::values::{function_body, parse_numeric, split_top_level, split_whitespace_top_level};

/// Handle positions synthesized for every linear gradient. The direction
/// token is consumed but not yet turned into an accurate transform.
const GRADIENT_HANDLES: [Vec2; 3] = [
    Vec2 { x: 0.0, y: 0.0 },
    Vec2 { x: 1.0, y: 0.0 },
    Vec2 { x: 0.0, y: 1.0 },
];

/// Parse a `linear-gradient(...)` occurrence inside a raw background value.
///
/// The stop list is split on top-level commas only, so commas inside an
/// inner `rgba(...)` never split a stop. The first segment is treated as
/// the angle/direction token and skipped. Each remaining segment is
/// `<color> <position%>?`; a stop without a position defaults to 0 when it
/// is the first stop and 1 otherwise.
pub fn parse_linear_gradient(value: &str) -> Option<Paint> {
    let body = function_body(value, "linear-gradient")?;
    let segments = split_top_level(body, ',');
    if segments.len() < 2 {
        return None;
    }

    let mut stops: Vec<GradientStop> = Vec::new();
    for segment in &segments[1..] {
        let tokens = split_whitespace_top_level(segment);
        let Some(color) = tokens.iter().find_map(|t| parse_color(t)) else {
            continue;
        };
        let position = tokens
            .iter()
            .find(|t| t.ends_with('%'))
            .and_then(|t| parse_numeric(t))
            .map(|pct| pct / 100.0)
            .unwrap_or(if stops.is_empty() { 0.0 } else { 1.0 });
        stops.push(GradientStop { position, color });
    }

    if stops.is_empty() {
        return None;
    }

    Some(Paint::LinearGradient {
        gradient_stops: stops,
        gradient_handle_positions: GRADIENT_HANDLES,
    })
}
