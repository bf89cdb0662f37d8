//! Low-level CSS value tokenization helpers shared by the style sub-parsers.

/// Extract the first numeric token from a raw CSS value ("12px" -> 12.0).
pub fn parse_numeric(value: &str) -> Option<f32> {
    let bytes = value.as_bytes();
    let mut start = None;
    for (i, &b) in bytes.iter().enumerate() {
        let is_number_char = b.is_ascii_digit() || b == b'.';
        let is_sign = b == b'-' && bytes.get(i + 1).is_some_and(|n| n.is_ascii_digit() || *n == b'.');
        if start.is_none() {
            if is_number_char || is_sign {
                start = Some(i);
            }
        } else if !is_number_char {
            return value[start?..i].parse().ok();
        }
    }
    start.and_then(|s| value[s..].parse().ok())
}

/// Parse a pixel length, treating a missing or malformed value as absent.
pub fn parse_length(value: &str) -> Option<f32> {
    parse_numeric(value.trim())
}

/// Split a value on a separator, ignoring separators nested inside
/// parentheses. Used for `box-shadow` lists and gradient stop lists where
/// an inner `rgba(...)` must not split the outer list.
pub fn split_top_level(value: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in value.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c == separator && depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts.retain(|p| !p.is_empty());
    parts
}

/// Split a value on whitespace, ignoring whitespace nested inside
/// parentheses, so `rgba(0, 0, 0, 0.5)` stays one token.
pub fn split_whitespace_top_level(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in value.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Extract the balanced argument list of `name(...)` from a raw value,
/// e.g. `body("linear-gradient(90deg, rgba(0,0,0,0.5) 0%)")` -> the inner text.
pub fn function_body<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    let lower = value.to_ascii_lowercase();
    let needle = format!("{}(", name.to_ascii_lowercase());
    let start = lower.find(&needle)? + needle.len();
    let mut depth = 1usize;
    for (offset, ch) in value[start..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&value[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Expand a 1/2/3/4-value CSS box-model shorthand into (top, right, bottom, left).
pub fn expand_box_shorthand(values: &[f32]) -> Option<(f32, f32, f32, f32)> {
    match values {
        [all] => Some((*all, *all, *all, *all)),
        [vertical, horizontal] => Some((*vertical, *horizontal, *vertical, *horizontal)),
        [top, horizontal, bottom] => Some((*top, *horizontal, *bottom, *horizontal)),
        [top, right, bottom, left] => Some((*top, *right, *bottom, *left)),
        _ => None,
    }
}

/// Pick the value for one side out of a multi-value shorthand token list
/// (top=0, right=1, bottom=2, left=3), following box-model expansion rules.
pub fn value_for_side<'a>(values: &'a [String], side: usize) -> Option<&'a str> {
    let picked = match values.len() {
        0 => return None,
        1 => &values[0],
        2 => &values[side % 2],
        3 => match side {
            0 => &values[0],
            2 => &values[2],
            _ => &values[1],
        },
        _ => values.get(side).unwrap_or(&values[0]),
    };
    Some(picked.as_str())
}
