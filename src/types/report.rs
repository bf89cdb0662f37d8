//! Conversion output, quality, and correction report types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::design::DesignNode;

/// Severity of a detected quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

impl IssueSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Info => "info",
        }
    }
}

/// Category a quality issue is scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Layout,
    Color,
    Typography,
    Spacing,
    Other,
}

/// A single fidelity gap detected between a snapshot node and its design node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssue {
    pub node_id: String,
    pub category: IssueCategory,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

/// Per-node or aggregate quality scores. All scores are clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub layout_accuracy: f32,
    pub color_accuracy: f32,
    pub typography_accuracy: f32,
    pub spacing_accuracy: f32,
    pub overall_score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<QualityIssue>,
}

/// Letter grade derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grade = match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
            QualityGrade::D => "D",
            QualityGrade::F => "F",
        };
        write!(f, "{}", grade)
    }
}

/// One applied correction, recorded for the audit trail.
/// Records are append-only within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionChange {
    /// Dotted property path on the design node, e.g. "boundingBox.width".
    pub property: String,
    pub old_value: Value,
    pub new_value: Value,
    pub reason: String,
}

/// Ordered per-node audit map of correction changes.
pub type CorrectionReport = BTreeMap<String, Vec<CorrectionChange>>;

/// An image asset referenced by the converted tree. Download and packing
/// happen in the external asset pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    pub src: String,
    pub hash: String,
}

/// Assets the downstream consumer needs to materialize the scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageAsset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<String>,
}

/// Names of static catalog tokens that matched somewhere in the node list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTokens {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spacing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub typography: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shadows: Vec<String>,
}

impl DetectedTokens {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.spacing.is_empty()
            && self.typography.is_empty()
            && self.shadows.is_empty()
    }
}

/// Quality section of the conversion metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub summary: QualityMetrics,
    pub grade: QualityGrade,
    /// Rendered plain-text report.
    pub report: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub corrections: CorrectionReport,
}

/// Metadata record returned alongside the converted node list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMeta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
    pub assets: AssetManifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<DetectedTokens>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

/// Final output of a conversion request: the flat design-node list plus
/// the metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub nodes: Vec<DesignNode>,
    pub meta: ConversionMeta,
}
