//! Conversion quality scoring and automatic correction.

mod correction;
mod validator;

#[cfg(test)]
mod tests;

pub use correction::{auto_correct_node, auto_correct_tree};
pub use validator::{quality_grade, quality_report, validate_node, validate_tree, TreeValidation};
