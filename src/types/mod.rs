//! Core data types and structures.
//!
//! - [`snapshot`] - captured HTML element tree (input, read-only)
//! - [`design`] - design scene-graph nodes (output)
//! - [`report`] - conversion metadata, quality scores, correction audit

mod design;
mod report;
mod snapshot;

pub use design::{
    AxisAlign, AxisSizing, Color, ComponentPattern, CornerRadius, DesignNode, Effect,
    GradientStop, GridInfo, LayoutBlock, LayoutMode, LayoutWrap, NodeMeta, NodeType,
    OverflowDirection, Padding, PaddingTokens, Paint, PatternKind, Positioning, StrokeAlign,
    TextAlign, TextCase, TextDecoration, TokenRefs, TypographyBlock, Vec2,
};
pub use report::{
    AssetManifest, ConversionMeta, ConversionResult, CorrectionChange, CorrectionReport,
    DetectedTokens, ImageAsset, IssueCategory, IssueSeverity, QualityGrade, QualityIssue,
    QualityMetrics, QualityReport,
};
pub use snapshot::{BoundingBox, SnapshotNode};
