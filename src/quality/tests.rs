use std::collections::HashMap;

use crate::convert::build_node;
use crate::types::{
    BoundingBox, IssueCategory, IssueSeverity, QualityGrade, SnapshotNode,
};

use super::*;

fn snapshot(id: &str, pairs: &[(&str, &str)]) -> SnapshotNode {
    SnapshotNode {
        id: id.to_string(),
        parent_id: None,
        tag_name: "div".to_string(),
        attributes: HashMap::new(),
        classes: Vec::new(),
        text_content: None,
        bounding_box: BoundingBox {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        },
        styles: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: Vec::new(),
    }
}

#[test]
fn faithful_node_scores_a_clean_hundred() {
    let snap = snapshot("n1", &[("background-color", "#0f172a")]);
    let design = build_node(&snap);
    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.overall_score, 100.0);
    assert!(metrics.issues.is_empty());
    assert_eq!(quality_grade(metrics.overall_score), QualityGrade::A);
}

#[test]
fn width_drift_beyond_tolerance_is_a_layout_warning() {
    let snap = snapshot("n1", &[]);
    let mut design = build_node(&snap);
    design.bounding_box.width = 150.0;
    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.layout_accuracy, 90.0);
    let issue = &metrics.issues[0];
    assert_eq!(issue.category, IssueCategory::Layout);
    assert_eq!(issue.severity, IssueSeverity::Warning);
    assert_eq!(issue.message, "Width mismatch: 50.00px difference");
    assert_eq!(issue.suggested_fix.as_deref(), Some("Adjust width to 200px"));
}

#[test]
fn small_drift_stays_inside_the_tolerance() {
    let snap = snapshot("n1", &[]);
    let mut design = build_node(&snap);
    design.bounding_box.width = 204.0;
    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.layout_accuracy, 100.0);
}

#[test]
fn converted_flex_container_raises_no_layout_issue() {
    let snap = snapshot("n1", &[("display", "flex"), ("gap", "16px")]);
    let design = build_node(&snap);
    let metrics = validate_node(&snap, &design);
    assert!(metrics
        .issues
        .iter()
        .all(|i| i.category != IssueCategory::Layout));
}

#[test]
fn inline_flex_container_raises_no_layout_issue() {
    let snap = snapshot("n1", &[("display", "inline-flex")]);
    let design = build_node(&snap);
    let metrics = validate_node(&snap, &design);
    assert!(metrics
        .issues
        .iter()
        .all(|i| i.category != IssueCategory::Layout));
    assert_eq!(metrics.layout_accuracy, 100.0);
}

#[test]
fn normalized_icon_dimensions_are_not_counted_as_drift() {
    let mut snap = snapshot("n1", &[]);
    snap.tag_name = "svg".to_string();
    snap.bounding_box.width = 40.0;
    snap.bounding_box.height = 40.0;

    let mut design = build_node(&snap);
    assert_eq!(design.bounding_box.width, 20.0);

    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.layout_accuracy, 100.0);
    assert!(metrics.issues.is_empty());

    let changes = auto_correct_node(&snap, &mut design, &metrics.issues);
    assert!(changes.is_empty());
    assert_eq!(design.bounding_box.width, 20.0);
}

#[test]
fn width_correction_targets_the_normalized_basis() {
    let mut snap = snapshot("n1", &[]);
    snap.tag_name = "svg".to_string();
    snap.bounding_box.width = 40.0;
    snap.bounding_box.height = 40.0;

    let mut design = build_node(&snap);
    design.bounding_box.width = 60.0;

    let metrics = validate_node(&snap, &design);
    assert!(metrics
        .issues
        .iter()
        .any(|i| i.message == "Width mismatch: 40.00px difference"));

    auto_correct_node(&snap, &mut design, &metrics.issues);
    assert_eq!(design.bounding_box.width, 20.0);
}

#[test]
fn flex_container_without_auto_layout_loses_fifteen() {
    let snap = snapshot("n1", &[("display", "flex")]);
    let mut design = build_node(&snap);
    design.layout = None;
    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.layout_accuracy, 85.0);
    assert_eq!(
        metrics.issues[0].message,
        "Layout container not properly converted (flex)"
    );
}

#[test]
fn missing_background_costs_twenty_color_points() {
    let snap = snapshot("n1", &[("background-color", "#123456")]);
    let mut design = build_node(&snap);
    design.fills = None;
    let metrics = validate_node(&snap, &design);
    assert_eq!(metrics.color_accuracy, 80.0);
    assert_eq!(
        metrics.issues[0].suggested_fix.as_deref(),
        Some("Apply fill: #123456")
    );
}

#[test]
fn scores_never_drop_below_zero() {
    let mut snap = snapshot(
        "n1",
        &[
            ("background-color", "#123456"),
            ("border-color", "#654321"),
            ("color", "#ffffff"),
        ],
    );
    snap.text_content = Some("hello".to_string());
    let mut design = build_node(&snap);
    design.fills = None;
    design.strokes = None;
    design.typography = None;
    let metrics = validate_node(&snap, &design);
    assert!(metrics.color_accuracy >= 0.0);
    assert!(metrics.overall_score >= 0.0);
    assert!(metrics.overall_score <= 100.0);
}

#[test]
fn tree_summary_averages_and_collects_issues() {
    let mut root = snapshot("root", &[]);
    let child = snapshot("child", &[("background-color", "#123456")]);
    root.children = vec![child.clone()];

    let mut nodes = vec![build_node(&root), build_node(&child)];
    nodes[1].fills = None;

    let validation = validate_tree(&root, &nodes);
    assert_eq!(validation.per_node.len(), 2);
    assert_eq!(validation.summary.issues.len(), 1);
    assert_eq!(validation.summary.color_accuracy, 90.0);
}

#[test]
fn grade_thresholds_are_inclusive() {
    assert_eq!(quality_grade(90.0), QualityGrade::A);
    assert_eq!(quality_grade(89.9), QualityGrade::B);
    assert_eq!(quality_grade(80.0), QualityGrade::B);
    assert_eq!(quality_grade(70.0), QualityGrade::C);
    assert_eq!(quality_grade(60.0), QualityGrade::D);
    assert_eq!(quality_grade(59.9), QualityGrade::F);
}

#[test]
fn report_lists_scores_and_top_issues() {
    let snap = snapshot("n1", &[("background-color", "#123456")]);
    let mut design = build_node(&snap);
    design.fills = None;
    let metrics = validate_node(&snap, &design);

    let report = quality_report(&metrics);
    assert!(report.contains("Overall Score: 95/100 (Grade: A)"));
    assert!(report.contains("- Color Accuracy: 80/100"));
    assert!(report.contains("1. [WARNING] Background color not applied"));
    assert!(report.contains("Fix: Apply fill: #123456"));
}

#[test]
fn corrector_restores_background_fill_from_source_styles() {
    let snap = snapshot("n1", &[("background-color", "#112233")]);
    let mut design = build_node(&snap);
    design.fills = None;

    let metrics = validate_node(&snap, &design);
    let changes = auto_correct_node(&snap, &mut design, &metrics.issues);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].property, "fills");
    let fills = design.fills.as_ref().expect("fill restored");
    let color = fills[0].solid_color().expect("solid fill");
    assert!((color.r - 0x11 as f32 / 255.0).abs() < 1e-6);
    assert!((color.g - 0x22 as f32 / 255.0).abs() < 1e-6);
}

#[test]
fn correction_does_not_introduce_new_issues() {
    let snap = snapshot(
        "n1",
        &[
            ("background-color", "#112233"),
            ("display", "flex"),
            ("gap", "16px"),
        ],
    );
    let mut design = build_node(&snap);
    design.fills = None;
    design.bounding_box.width = 100.0;

    let before = validate_node(&snap, &design);
    auto_correct_node(&snap, &mut design, &before.issues);
    let after = validate_node(&snap, &design);

    assert!(after.issues.len() <= before.issues.len());
    assert!(after.overall_score >= before.overall_score);
}

#[test]
fn issues_for_other_nodes_leave_the_node_untouched() {
    let snap = snapshot("n1", &[("background-color", "#112233")]);
    let mut design = build_node(&snap);
    design.fills = None;

    let mut metrics = validate_node(&snap, &design);
    for issue in &mut metrics.issues {
        issue.node_id = "someone-else".to_string();
    }

    let changes = auto_correct_node(&snap, &mut design, &metrics.issues);
    assert!(changes.is_empty());
    assert!(design.fills.is_none());
}

#[test]
fn tree_correction_returns_a_per_node_audit_map() {
    let mut root = snapshot("root", &[]);
    let child = snapshot("child", &[("background-color", "#abcdef")]);
    root.children = vec![child.clone()];

    let mut nodes = vec![build_node(&root), build_node(&child)];
    nodes[1].fills = None;

    let validation = validate_tree(&root, &nodes);
    let report = auto_correct_tree(&root, &mut nodes, &validation.summary.issues);

    assert_eq!(report.len(), 1);
    let changes = report.get("child").expect("child corrected");
    assert_eq!(changes[0].property, "fills");
    assert!(nodes[1].fills.is_some());
}
