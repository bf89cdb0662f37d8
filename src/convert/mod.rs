//! The conversion pipeline: snapshot tree in, design-node list plus
//! metadata out.

mod builder;

#[cfg(test)]
mod tests;

use tracing::info;

use crate::error::{ConvertError, Result};
use crate::quality::{auto_correct_tree, quality_grade, quality_report, validate_tree};
use crate::recognize::{apply_patterns, recognize_components, summarize_components};
use crate::style_system::detected_tokens;
use crate::tree::topological_order;
use crate::types::{
    AssetManifest, ConversionMeta, ConversionResult, CorrectionReport, ImageAsset, IssueSeverity,
    QualityReport, SnapshotNode,
};

pub use builder::build_node;

/// Conversion pipeline settings.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Run the corrector when the validated score falls below the threshold.
    pub auto_correct: bool,
    /// Overall score under which correction kicks in.
    pub correction_threshold: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            auto_correct: true,
            correction_threshold: 90.0,
        }
    }
}

/// Convert a captured snapshot tree into a flat design-node list.
///
/// Builds one design node per snapshot node, orders them parent-first,
/// annotates recognized component patterns, validates the result, and
/// corrects it when the score falls short. The quality loop never fails
/// the request; the only error is an unusable input tree.
pub fn convert_snapshot_tree(
    root: &SnapshotNode,
    options: &ConvertOptions,
) -> Result<ConversionResult> {
    if root.id.trim().is_empty() {
        return Err(ConvertError::invalid_input("snapshot root has an empty id"));
    }

    // preorder over the snapshot, document order preserved
    let mut nodes = Vec::new();
    let mut stack: Vec<&SnapshotNode> = vec![root];
    while let Some(snapshot) = stack.pop() {
        nodes.push(build_node(snapshot));
        for child in snapshot.children.iter().rev() {
            stack.push(child);
        }
    }

    let mut nodes = topological_order(&nodes);

    let components = recognize_components(root);
    apply_patterns(&mut nodes, &components);

    let mut validation = validate_tree(root, &nodes);
    let mut grade = quality_grade(validation.summary.overall_score);
    let mut report = quality_report(&validation.summary);

    info!(
        overall_score = validation.summary.overall_score,
        grade = %grade,
        issues = validation.summary.issues.len(),
        "conversion validated"
    );

    let mut corrections = CorrectionReport::new();
    if options.auto_correct
        && validation.summary.overall_score < options.correction_threshold
        && !validation.summary.issues.is_empty()
    {
        corrections = auto_correct_tree(root, &mut nodes, &validation.summary.issues);

        validation = validate_tree(root, &nodes);
        grade = quality_grade(validation.summary.overall_score);
        report = quality_report(&validation.summary);

        info!(
            corrections_made = corrections.values().map(Vec::len).sum::<usize>(),
            nodes_affected = corrections.len(),
            new_score = validation.summary.overall_score,
            new_grade = %grade,
            "auto-correction applied"
        );
    }

    let summary = validation.summary;

    let messages_with = |severity: IssueSeverity| {
        summary
            .issues
            .iter()
            .filter(|i| i.severity == severity)
            .map(|i| i.message.clone())
            .collect::<Vec<_>>()
    };

    let mut info_lines = vec![
        format!("Converted {} nodes", nodes.len()),
        summarize_components(&components),
        format!(
            "Quality Score: {}/100 (Grade: {})",
            summary.overall_score, grade
        ),
    ];
    if !corrections.is_empty() {
        info_lines.push(format!(
            "Auto-corrections applied: {} changes to {} nodes",
            corrections.values().map(Vec::len).sum::<usize>(),
            corrections.len()
        ));
    }
    info_lines.extend(messages_with(IssueSeverity::Info));

    let tokens = detected_tokens(&nodes);

    let meta = ConversionMeta {
        errors: messages_with(IssueSeverity::Error),
        warnings: messages_with(IssueSeverity::Warning),
        info: info_lines,
        assets: collect_assets(root),
        tokens: (!tokens.is_empty()).then_some(tokens),
        quality: Some(QualityReport {
            grade,
            report,
            corrections,
            summary,
        }),
    };

    Ok(ConversionResult { nodes, meta })
}

/// Image references and font families the downstream pipeline needs.
/// Fetching, hashing of content, and packing stay outside this crate; the
/// id doubles as the asset hash placeholder until the pipeline fills it.
fn collect_assets(root: &SnapshotNode) -> AssetManifest {
    let mut manifest = AssetManifest::default();

    let mut stack: Vec<&SnapshotNode> = vec![root];
    while let Some(snapshot) = stack.pop() {
        if snapshot.tag_name == "img" {
            if let Some(src) = snapshot.attributes.get("src").filter(|s| !s.is_empty()) {
                manifest.images.push(ImageAsset {
                    id: snapshot.id.clone(),
                    src: src.clone(),
                    hash: snapshot.id.clone(),
                });
            }
        }
        if let Some(family) = snapshot.style("font-family") {
            if let Some(first) = family.split(',').next() {
                let cleaned = first.trim().replace(['\'', '"'], "");
                if !cleaned.is_empty() && !manifest.fonts.contains(&cleaned) {
                    manifest.fonts.push(cleaned);
                }
            }
        }
        stack.extend(snapshot.children.iter());
    }

    manifest.images.sort_by(|a, b| a.id.cmp(&b.id));
    manifest.fonts.sort();
    manifest
}
