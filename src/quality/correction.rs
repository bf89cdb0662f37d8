//! Issue-driven node correction.
//!
//! Corrections are keyed off validator message prefixes and applied in a
//! fixed category order (layout, color, typography, spacing), one pass per
//! run. Every mutation appends an audit record with the old and new value.

use serde_json::Value;
use tracing::debug;

use crate::style::{parse_color, parse_numeric};
use crate::types::{
    CorrectionChange, CorrectionReport, DesignNode, LayoutBlock, LayoutMode, Padding, Paint,
    Positioning, QualityIssue, SnapshotNode,
};

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn record(
    changes: &mut Vec<CorrectionChange>,
    property: &str,
    old_value: Value,
    new_value: Value,
    reason: String,
) {
    changes.push(CorrectionChange {
        property: property.to_string(),
        old_value,
        new_value,
        reason,
    });
}

fn correct_layout(
    snapshot: &SnapshotNode,
    design: &mut DesignNode,
    issues: &[&QualityIssue],
    changes: &mut Vec<CorrectionChange>,
) {
    // same basis as the validator, so normalized dimensions are not undone
    let expected = design
        .meta
        .normalized_box
        .unwrap_or(snapshot.bounding_box);

    for issue in issues {
        if issue.message.contains("Width mismatch") {
            let old = design.bounding_box.width;
            design.bounding_box.width = expected.width;
            record(
                changes,
                "boundingBox.width",
                to_value(&old),
                to_value(&design.bounding_box.width),
                "Width adjusted to match original".to_string(),
            );
        }

        if issue.message.contains("Height mismatch") {
            let old = design.bounding_box.height;
            design.bounding_box.height = expected.height;
            record(
                changes,
                "boundingBox.height",
                to_value(&old),
                to_value(&design.bounding_box.height),
                "Height adjusted to match original".to_string(),
            );
        }

        if issue.message.contains("Layout container not properly converted") {
            let old = design.layout_mode();
            let (mode, reason) = if snapshot.is_flex_container() {
                let direction = snapshot
                    .style("flex-direction")
                    .map(str::trim)
                    .unwrap_or("row");
                let mode = if direction == "column" {
                    LayoutMode::Vertical
                } else {
                    LayoutMode::Horizontal
                };
                (mode, "Applied auto-layout for flex container")
            } else if snapshot.is_grid_container() {
                (LayoutMode::Vertical, "Applied auto-layout for grid container")
            } else {
                continue;
            };
            design.layout.get_or_insert_with(LayoutBlock::default).mode = mode;
            record(
                changes,
                "layoutMode",
                to_value(&old),
                to_value(&mode),
                reason.to_string(),
            );
        }

        if issue.message.contains("Absolute positioning not preserved") {
            let old = design.positioning;
            design.positioning = Some(Positioning::Absolute);
            record(
                changes,
                "layoutPositioning",
                to_value(&old),
                to_value(&design.positioning),
                "Applied absolute positioning".to_string(),
            );
        }
    }
}

fn correct_color(
    snapshot: &SnapshotNode,
    design: &mut DesignNode,
    issues: &[&QualityIssue],
    changes: &mut Vec<CorrectionChange>,
) {
    for issue in issues {
        if issue.message.contains("Background color not applied") {
            let background = snapshot
                .style("background-color")
                .filter(|v| v.trim() != "transparent");
            if let Some(paint) = background.and_then(parse_color).map(Paint::solid) {
                let old = to_value(&design.fills);
                design.fills = Some(vec![paint]);
                record(
                    changes,
                    "fills",
                    old,
                    to_value(&design.fills),
                    format!(
                        "Applied background color: {}",
                        background.unwrap_or_default()
                    ),
                );
            }
        }

        if issue.message.contains("Border color not applied") {
            let border = snapshot
                .style("border-color")
                .filter(|v| v.trim() != "transparent");
            if let Some(paint) = border.and_then(parse_color).map(Paint::solid) {
                let old = to_value(&design.strokes);
                design.strokes = Some(vec![paint]);
                record(
                    changes,
                    "strokes",
                    old,
                    to_value(&design.strokes),
                    format!("Applied border color: {}", border.unwrap_or_default()),
                );

                let border_width = snapshot
                    .style("border-width")
                    .and_then(parse_numeric)
                    .unwrap_or(1.0);
                if border_width > 0.0 {
                    let old = to_value(&design.stroke_weight);
                    design.stroke_weight = Some(border_width);
                    record(
                        changes,
                        "strokeWeight",
                        old,
                        to_value(&design.stroke_weight),
                        "Applied border width".to_string(),
                    );
                }
            }
        }

        if issue.message.contains("Text color not applied") {
            let paint = snapshot
                .text()
                .and(snapshot.style("color"))
                .and_then(parse_color)
                .map(Paint::solid);
            if let (Some(paint), Some(text)) = (paint, design.typography.as_mut()) {
                let old = to_value(&text.fills);
                text.fills = Some(vec![paint]);
                let new = to_value(&text.fills);
                record(
                    changes,
                    "text.fills",
                    old,
                    new,
                    format!(
                        "Applied text color: {}",
                        snapshot.style("color").unwrap_or_default()
                    ),
                );
            }
        }
    }
}

fn correct_typography(
    snapshot: &SnapshotNode,
    design: &mut DesignNode,
    issues: &[&QualityIssue],
    changes: &mut Vec<CorrectionChange>,
) {
    if snapshot.text().is_none() || design.typography.is_none() {
        return;
    }

    for issue in issues {
        if issue.message.contains("Font family not applied") {
            let family = snapshot.style("font-family").and_then(|stack| {
                let first = stack.split(',').next()?.trim().replace(['\'', '"'], "");
                (!first.is_empty()).then_some(first)
            });
            if let (Some(family), Some(text)) = (family, design.typography.as_mut()) {
                let old = to_value(&text.font_family);
                text.font_family = Some(family.clone());
                let new = to_value(&text.font_family);
                record(
                    changes,
                    "text.fontFamily",
                    old,
                    new,
                    format!("Applied font family: {family}"),
                );
            }
        }

        if issue.message.contains("Font size mismatch") {
            let size = snapshot
                .style("font-size")
                .and_then(parse_numeric)
                .unwrap_or(0.0);
            if size > 0.0 {
                if let Some(text) = design.typography.as_mut() {
                    let old = to_value(&text.font_size);
                    text.font_size = Some(size);
                    let new = to_value(&text.font_size);
                    record(
                        changes,
                        "text.fontSize",
                        old,
                        new,
                        format!("Adjusted font size to {size}px"),
                    );
                }
            }
        }

        if issue.message.contains("Line height mismatch") {
            let line_height = snapshot
                .style("line-height")
                .and_then(parse_numeric)
                .unwrap_or(0.0);
            if line_height > 0.0 {
                if let Some(text) = design.typography.as_mut() {
                    let old = to_value(&text.line_height);
                    text.line_height = Some(line_height);
                    let new = to_value(&text.line_height);
                    record(
                        changes,
                        "text.lineHeight",
                        old,
                        new,
                        format!("Adjusted line height to {line_height}px"),
                    );
                }
            }
        }
    }
}

fn correct_spacing(
    snapshot: &SnapshotNode,
    design: &mut DesignNode,
    issues: &[&QualityIssue],
    changes: &mut Vec<CorrectionChange>,
) {
    let side = |property: &str| {
        snapshot
            .style(property)
            .and_then(parse_numeric)
            .unwrap_or(0.0)
    };

    for issue in issues {
        let padding_missing = issue.message.contains("Padding not applied");
        let padding_off = issue.message.contains("Padding mismatch");
        if padding_missing || padding_off {
            let layout = design.layout.get_or_insert_with(LayoutBlock::default);
            let old = to_value(&layout.padding);
            layout.padding = Some(Padding {
                top: side("padding-top"),
                right: side("padding-right"),
                bottom: side("padding-bottom"),
                left: side("padding-left"),
            });
            let reason = if padding_missing {
                "Applied padding"
            } else {
                "Adjusted padding to match original"
            };
            record(
                changes,
                "padding",
                old,
                to_value(&layout.padding),
                reason.to_string(),
            );
        }

        if issue.message.contains("Gap mismatch") {
            let gap = side("gap");
            if gap > 0.0 {
                let layout = design.layout.get_or_insert_with(LayoutBlock::default);
                let old = to_value(&layout.item_spacing);
                layout.item_spacing = Some(gap);
                record(
                    changes,
                    "itemSpacing",
                    old,
                    to_value(&layout.item_spacing),
                    format!("Adjusted gap to {gap}px"),
                );
            }
        }
    }
}

/// Correct one design node in place against its snapshot and issue list.
///
/// Only issues addressed to this node apply. Returns the audit records for
/// every change made; an empty list means the node passed through as-is.
pub fn auto_correct_node(
    snapshot: &SnapshotNode,
    design: &mut DesignNode,
    issues: &[QualityIssue],
) -> Vec<CorrectionChange> {
    let relevant: Vec<&QualityIssue> = issues.iter().filter(|i| i.node_id == design.id).collect();
    if relevant.is_empty() {
        return Vec::new();
    }

    let by_category = |category: crate::types::IssueCategory| {
        relevant
            .iter()
            .copied()
            .filter(|i| i.category == category)
            .collect::<Vec<_>>()
    };

    let mut changes = Vec::new();
    correct_layout(
        snapshot,
        design,
        &by_category(crate::types::IssueCategory::Layout),
        &mut changes,
    );
    correct_color(
        snapshot,
        design,
        &by_category(crate::types::IssueCategory::Color),
        &mut changes,
    );
    correct_typography(
        snapshot,
        design,
        &by_category(crate::types::IssueCategory::Typography),
        &mut changes,
    );
    correct_spacing(
        snapshot,
        design,
        &by_category(crate::types::IssueCategory::Spacing),
        &mut changes,
    );

    if !changes.is_empty() {
        debug!(node_id = %design.id, corrections = changes.len(), "auto-corrected node");
    }

    changes
}

/// Correct every design node in the list and collect the audit map.
pub fn auto_correct_tree(
    root: &SnapshotNode,
    design_nodes: &mut [DesignNode],
    issues: &[QualityIssue],
) -> CorrectionReport {
    let mut snapshots: std::collections::HashMap<&str, &SnapshotNode> =
        std::collections::HashMap::new();
    let mut stack: Vec<&SnapshotNode> = vec![root];
    while let Some(snapshot) = stack.pop() {
        snapshots.insert(snapshot.id.as_str(), snapshot);
        stack.extend(snapshot.children.iter());
    }

    let mut report = CorrectionReport::new();
    for design in design_nodes.iter_mut() {
        let Some(snapshot) = snapshots.get(design.id.as_str()) else {
            continue;
        };
        let changes = auto_correct_node(snapshot, design, issues);
        if !changes.is_empty() {
            report.insert(design.id.clone(), changes);
        }
    }

    report
}
