//! Per-category conversion scoring.
//!
//! Each scorer starts at 100 and applies fixed deductions; the overall
//! score is a weighted blend (layout 0.35, color 0.25, typography 0.20,
//! spacing 0.20). All scores stay inside [0, 100].

use std::collections::HashMap;

use tracing::info;

use crate::style::parse_numeric;
use crate::types::{
    DesignNode, IssueCategory, IssueSeverity, LayoutMode, Positioning, QualityGrade, QualityIssue,
    QualityMetrics, SnapshotNode,
};

struct CategoryResult {
    score: f32,
    issues: Vec<QualityIssue>,
}

fn style_number(snapshot: &SnapshotNode, property: &str) -> f32 {
    snapshot
        .style(property)
        .and_then(parse_numeric)
        .unwrap_or(0.0)
}

fn validate_layout(snapshot: &SnapshotNode, design: &DesignNode) -> CategoryResult {
    let mut issues = Vec::new();
    let mut score: f32 = 100.0;

    // builder normalizations (button widening, icon sizing) move the
    // expected box away from the capture; measure against the recorded basis
    let expected = design
        .meta
        .normalized_box
        .unwrap_or(snapshot.bounding_box);

    let width_diff = (expected.width - design.bounding_box.width).abs();
    let height_diff = (expected.height - design.bounding_box.height).abs();

    if width_diff > 5.0 {
        score -= 10.0;
        issues.push(QualityIssue {
            node_id: design.id.clone(),
            category: IssueCategory::Layout,
            severity: IssueSeverity::Warning,
            message: format!("Width mismatch: {width_diff:.2}px difference"),
            suggested_fix: Some(format!("Adjust width to {}px", expected.width)),
        });
    }

    if height_diff > 5.0 {
        score -= 10.0;
        issues.push(QualityIssue {
            node_id: design.id.clone(),
            category: IssueCategory::Layout,
            severity: IssueSeverity::Warning,
            message: format!("Height mismatch: {height_diff:.2}px difference"),
            suggested_fix: Some(format!("Adjust height to {}px", expected.height)),
        });
    }

    let is_flex = snapshot.is_flex_container();
    let is_grid = snapshot.is_grid_container();
    let has_layout_mode = design.layout_mode() != LayoutMode::None;

    if (is_flex || is_grid) && !has_layout_mode {
        score -= 15.0;
        issues.push(QualityIssue {
            node_id: design.id.clone(),
            category: IssueCategory::Layout,
            severity: IssueSeverity::Warning,
            message: format!(
                "Layout container not properly converted ({})",
                if is_flex { "flex" } else { "grid" }
            ),
            suggested_fix: Some("Apply auto-layout to this frame".to_string()),
        });
    }

    if snapshot.style("position").map(str::trim) == Some("absolute")
        && design.positioning != Some(Positioning::Absolute)
    {
        score -= 5.0;
        issues.push(QualityIssue {
            node_id: design.id.clone(),
            category: IssueCategory::Layout,
            severity: IssueSeverity::Info,
            message: "Absolute positioning not preserved".to_string(),
            suggested_fix: None,
        });
    }

    CategoryResult {
        score: score.max(0.0),
        issues,
    }
}

fn validate_color(snapshot: &SnapshotNode, design: &DesignNode) -> CategoryResult {
    let mut issues = Vec::new();
    let mut score: f32 = 100.0;

    let background = snapshot
        .style("background-color")
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "transparent");
    let has_fills = design.fills.as_ref().is_some_and(|f| !f.is_empty());

    if let Some(background) = background {
        if !has_fills {
            score -= 20.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Color,
                severity: IssueSeverity::Warning,
                message: "Background color not applied".to_string(),
                suggested_fix: Some(format!("Apply fill: {background}")),
            });
        }
    }

    let border = snapshot
        .style("border-color")
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "transparent");
    let has_strokes = design.strokes.as_ref().is_some_and(|s| !s.is_empty());

    if let Some(border) = border {
        if !has_strokes {
            score -= 15.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Color,
                severity: IssueSeverity::Warning,
                message: "Border color not applied".to_string(),
                suggested_fix: Some(format!("Apply stroke: {border}")),
            });
        }
    }

    if snapshot.text().is_some() && snapshot.style("color").is_some() {
        let has_text_fills = design
            .typography
            .as_ref()
            .and_then(|t| t.fills.as_ref())
            .is_some_and(|f| !f.is_empty());
        if !has_text_fills {
            score -= 10.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Color,
                severity: IssueSeverity::Info,
                message: "Text color not applied".to_string(),
                suggested_fix: None,
            });
        }
    }

    CategoryResult {
        score: score.max(0.0),
        issues,
    }
}

fn validate_typography(snapshot: &SnapshotNode, design: &DesignNode) -> CategoryResult {
    let mut issues = Vec::new();
    let mut score: f32 = 100.0;

    if snapshot.text().is_none() {
        return CategoryResult { score, issues };
    }

    let converted_family = design
        .typography
        .as_ref()
        .and_then(|t| t.font_family.as_deref());
    if let Some(family) = snapshot.style("font-family") {
        if converted_family.is_none() {
            score -= 15.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Typography,
                severity: IssueSeverity::Warning,
                message: "Font family not applied".to_string(),
                suggested_fix: Some(format!("Apply font: {family}")),
            });
        }
    }

    let original_size = style_number(snapshot, "font-size");
    let converted_size = design
        .typography
        .as_ref()
        .and_then(|t| t.font_size)
        .unwrap_or(0.0);
    if original_size > 0.0 {
        let size_diff = (original_size - converted_size).abs();
        if size_diff > 2.0 {
            score -= 10.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Typography,
                severity: IssueSeverity::Warning,
                message: format!("Font size mismatch: {size_diff:.2}px difference"),
                suggested_fix: Some(format!("Adjust font size to {original_size}px")),
            });
        }
    }

    // raw numeric read, deliberately blind to the multiplier heuristic
    let original_line_height = style_number(snapshot, "line-height");
    let converted_line_height = design
        .typography
        .as_ref()
        .and_then(|t| t.line_height)
        .unwrap_or(0.0);
    if original_line_height > 0.0 {
        let diff = (original_line_height - converted_line_height).abs();
        if diff > 4.0 {
            score -= 5.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Typography,
                severity: IssueSeverity::Info,
                message: format!("Line height mismatch: {diff:.2}px difference"),
                suggested_fix: None,
            });
        }
    }

    CategoryResult {
        score: score.max(0.0),
        issues,
    }
}

fn validate_spacing(snapshot: &SnapshotNode, design: &DesignNode) -> CategoryResult {
    let mut issues = Vec::new();
    let mut score: f32 = 100.0;

    let top = style_number(snapshot, "padding-top");
    let right = style_number(snapshot, "padding-right");
    let bottom = style_number(snapshot, "padding-bottom");
    let left = style_number(snapshot, "padding-left");

    let has_padding = top > 0.0 || right > 0.0 || bottom > 0.0 || left > 0.0;
    let converted_padding = design.layout.as_ref().and_then(|l| l.padding.as_ref());

    match (has_padding, converted_padding) {
        (true, None) => {
            score -= 15.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Spacing,
                severity: IssueSeverity::Warning,
                message: "Padding not applied".to_string(),
                suggested_fix: Some(format!("Apply padding: {top}/{right}/{bottom}/{left}")),
            });
        }
        (true, Some(padding)) => {
            let max_diff = [
                (top - padding.top).abs(),
                (right - padding.right).abs(),
                (bottom - padding.bottom).abs(),
                (left - padding.left).abs(),
            ]
            .into_iter()
            .fold(0.0f32, f32::max);
            if max_diff > 4.0 {
                score -= 10.0;
                issues.push(QualityIssue {
                    node_id: design.id.clone(),
                    category: IssueCategory::Spacing,
                    severity: IssueSeverity::Info,
                    message: format!("Padding mismatch: up to {max_diff:.2}px difference"),
                    suggested_fix: None,
                });
            }
        }
        (false, _) => {}
    }

    let original_gap = style_number(snapshot, "gap");
    let converted_gap = design
        .layout
        .as_ref()
        .and_then(|l| l.item_spacing)
        .unwrap_or(0.0);
    if original_gap > 0.0 {
        let gap_diff = (original_gap - converted_gap).abs();
        if gap_diff > 4.0 {
            score -= 10.0;
            issues.push(QualityIssue {
                node_id: design.id.clone(),
                category: IssueCategory::Spacing,
                severity: IssueSeverity::Warning,
                message: format!("Gap mismatch: {gap_diff:.2}px difference"),
                suggested_fix: Some(format!("Adjust item spacing to {original_gap}px")),
            });
        }
    }

    CategoryResult {
        score: score.max(0.0),
        issues,
    }
}

/// Score a single snapshot/design pair across all four categories.
pub fn validate_node(snapshot: &SnapshotNode, design: &DesignNode) -> QualityMetrics {
    let layout = validate_layout(snapshot, design);
    let color = validate_color(snapshot, design);
    let typography = validate_typography(snapshot, design);
    let spacing = validate_spacing(snapshot, design);

    let overall =
        layout.score * 0.35 + color.score * 0.25 + typography.score * 0.20 + spacing.score * 0.20;

    let mut issues = layout.issues;
    issues.extend(color.issues);
    issues.extend(typography.issues);
    issues.extend(spacing.issues);

    QualityMetrics {
        layout_accuracy: layout.score,
        color_accuracy: color.score,
        typography_accuracy: typography.score,
        spacing_accuracy: spacing.score,
        overall_score: overall.round().clamp(0.0, 100.0),
        issues,
    }
}

/// Per-node metrics plus the averaged tree summary.
#[derive(Debug, Clone)]
pub struct TreeValidation {
    pub per_node: Vec<QualityMetrics>,
    pub summary: QualityMetrics,
}

/// Validate the whole tree, pairing snapshot and design nodes by id.
pub fn validate_tree(root: &SnapshotNode, design_nodes: &[DesignNode]) -> TreeValidation {
    let index: HashMap<&str, &DesignNode> =
        design_nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let mut per_node: Vec<QualityMetrics> = Vec::new();
    let mut stack: Vec<&SnapshotNode> = vec![root];
    while let Some(snapshot) = stack.pop() {
        if let Some(design) = index.get(snapshot.id.as_str()) {
            per_node.push(validate_node(snapshot, design));
        }
        // preserve document order on the LIFO stack
        for child in snapshot.children.iter().rev() {
            stack.push(child);
        }
    }

    let summary = summarize(&per_node);

    info!(
        nodes_validated = per_node.len(),
        overall_score = summary.overall_score,
        issues_found = summary.issues.len(),
        "validation completed"
    );

    TreeValidation { per_node, summary }
}

fn summarize(per_node: &[QualityMetrics]) -> QualityMetrics {
    if per_node.is_empty() {
        return QualityMetrics {
            layout_accuracy: 0.0,
            color_accuracy: 0.0,
            typography_accuracy: 0.0,
            spacing_accuracy: 0.0,
            overall_score: 0.0,
            issues: Vec::new(),
        };
    }

    let count = per_node.len() as f32;
    let average = |pick: fn(&QualityMetrics) -> f32| {
        (per_node.iter().map(pick).sum::<f32>() / count).round()
    };

    QualityMetrics {
        layout_accuracy: average(|m| m.layout_accuracy),
        color_accuracy: average(|m| m.color_accuracy),
        typography_accuracy: average(|m| m.typography_accuracy),
        spacing_accuracy: average(|m| m.spacing_accuracy),
        overall_score: average(|m| m.overall_score).clamp(0.0, 100.0),
        issues: per_node.iter().flat_map(|m| m.issues.clone()).collect(),
    }
}

/// Letter grade for an overall score.
pub fn quality_grade(score: f32) -> QualityGrade {
    if score >= 90.0 {
        QualityGrade::A
    } else if score >= 80.0 {
        QualityGrade::B
    } else if score >= 70.0 {
        QualityGrade::C
    } else if score >= 60.0 {
        QualityGrade::D
    } else {
        QualityGrade::F
    }
}

/// Render the human-readable validation report.
pub fn quality_report(summary: &QualityMetrics) -> String {
    let grade = quality_grade(summary.overall_score);

    let count_of = |severity: IssueSeverity| {
        summary
            .issues
            .iter()
            .filter(|i| i.severity == severity)
            .count()
    };

    let mut report = format!(
        "Quality Validation Report\n\
         =========================\n\
         Overall Score: {}/100 (Grade: {})\n\
         \n\
         Detailed Scores:\n\
         - Layout Accuracy: {}/100\n\
         - Color Accuracy: {}/100\n\
         - Typography Accuracy: {}/100\n\
         - Spacing Accuracy: {}/100\n\
         \n\
         Issues Found: {}\n\
         - Errors: {}\n\
         - Warnings: {}\n\
         - Info: {}",
        summary.overall_score,
        grade,
        summary.layout_accuracy,
        summary.color_accuracy,
        summary.typography_accuracy,
        summary.spacing_accuracy,
        summary.issues.len(),
        count_of(IssueSeverity::Error),
        count_of(IssueSeverity::Warning),
        count_of(IssueSeverity::Info),
    );

    if !summary.issues.is_empty() {
        report.push_str("\n\nTop Issues:");
        for (position, issue) in summary.issues.iter().take(10).enumerate() {
            report.push_str(&format!(
                "\n{}. [{}] {}",
                position + 1,
                issue.severity.label().to_ascii_uppercase(),
                issue.message
            ));
            if let Some(fix) = &issue.suggested_fix {
                report.push_str(&format!("\n   Fix: {fix}"));
            }
        }
    }

    report
}
