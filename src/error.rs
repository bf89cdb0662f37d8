use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the conversion core.
///
/// Style parsing never fails; malformed CSS values simply yield no result.
/// The only error conditions are caller-contract violations and internal
/// processing faults, kept distinct so a boundary layer can choose an
/// appropriate status response.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal conversion error: {0}")]
    Internal(String),
}

impl ConvertError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConvertError::InvalidInput(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConvertError::Internal(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            ConvertError::InvalidInput(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Verify the snapshot tree is non-empty and every node carries an id.",
            ),
            ConvertError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check the snapshot JSON against the documented schema.",
            ),
            ConvertError::Internal(msg) => ErrorPayload::new(
                ErrorCategory::Internal,
                msg.to_string(),
                "File an issue with the offending snapshot if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Input,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_payload_categorized_as_input() {
        let err = ConvertError::invalid_input("Snapshot tree is empty");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert!(payload.message.contains("empty"));
    }

    #[test]
    fn internal_payload_categorized_as_internal() {
        let err = ConvertError::internal("index out of sync");
        assert_eq!(err.to_payload().category, ErrorCategory::Internal);
    }
}
