//! Unified error type for the domain layer.

use thiserror::Error;

use crate::value_objects::RefParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A ref names content that is not present in the catalog
    #[error("Unknown {kind} ref: {id}")]
    UnknownRef { kind: &'static str, id: String },

    /// Parse error (ref strings, curriculum expressions)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown-ref error for a catalog lookup miss.
    pub fn unknown_ref(kind: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownRef {
            kind,
            id: id.into(),
        }
    }

    /// Create a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Check if this is an unknown-ref error.
    pub fn is_unknown_ref(&self) -> bool {
        matches!(self, Self::UnknownRef { .. })
    }
}

impl From<RefParseError> for DomainError {
    fn from(err: RefParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ref_error() {
        let err = DomainError::unknown_ref("skill", "calligraphy");
        assert!(err.is_unknown_ref());
        assert_eq!(err.to_string(), "Unknown skill ref: calligraphy");
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("personal name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: personal name cannot be empty"
        );
    }

    #[test]
    fn test_from_ref_parse_error() {
        let parse_err = RefParseError::Empty;
        let domain_err: DomainError = parse_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Empty"));
    }
}
