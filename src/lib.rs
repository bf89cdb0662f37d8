//! Code-to-Design (C2D) Conversion Core
//!
//! A library that turns a captured HTML/CSS element tree into a design-tool
//! scene graph (frames, text, vectors, images), then scores and repairs the
//! result through a validate/correct quality loop. Capture, HTTP surfaces,
//! AI annotation, and asset downloading live in external collaborators.
//!
//! # Module Overview
//!
//! - [`style`] - CSS declaration parsing into design-side style blocks
//! - [`convert`] - Node building and the conversion pipeline
//! - [`recognize`] - Component pattern recognition over the snapshot tree
//! - [`tree`] - Topological ordering and nesting of design nodes
//! - [`quality`] - Fidelity validation and automatic correction
//! - [`tokens`] - Static design-token catalogs and matchers
//! - [`style_system`] - Post-conversion style and token aggregation
//! - [`types`] - Snapshot input, design output, and report types
//!
//! # Example
//!
//! ```no_run
//! use c2d_lib::{convert_snapshot_tree, ConvertOptions, SnapshotNode};
//!
//! # fn example(root: SnapshotNode) -> c2d_lib::Result<()> {
//! let result = convert_snapshot_tree(&root, &ConvertOptions::default())?;
//! for node in &result.nodes {
//!     println!("{} -> {:?}", node.id, node.node_type);
//! }
//! if let Some(quality) = &result.meta.quality {
//!     println!("{}", quality.report);
//! }
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod quality;
pub mod recognize;
pub mod style;
pub mod style_system;
pub mod tokens;
pub mod tree;
pub mod types;

pub use convert::{build_node, convert_snapshot_tree, ConvertOptions};
pub use error::{ConvertError, ErrorCategory, ErrorPayload, Result};
pub use quality::{
    auto_correct_node, auto_correct_tree, quality_grade, quality_report, validate_node,
    validate_tree, TreeValidation,
};
pub use recognize::{
    apply_patterns, recognize_components, recognize_pattern, RecognizedComponent,
};
pub use style::{map_styles, parse_color, StyleMapping};
pub use style_system::{detected_tokens, generate_style_system, StyleSystem, TextStyle};
pub use tree::{build_nested_tree, topological_order, DesignNodeTree};
pub use types::{
    BoundingBox, Color, ComponentPattern, ConversionMeta, ConversionResult, CorrectionChange,
    CorrectionReport, DesignNode, DetectedTokens, Effect, IssueCategory, IssueSeverity, LayoutMode,
    NodeType, Paint, PatternKind, Positioning, QualityGrade, QualityIssue, QualityMetrics,
    QualityReport, SnapshotNode,
};
