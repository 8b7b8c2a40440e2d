//! Error types for the tree store
//!
//! Two families, matching how callers react to them:
//! - [`DecodeError`]: persisted or shared tree data is malformed
//! - [`ValidationError`]: user input for a mutation is rejected before anything changes

/// Malformed tree encoding
///
/// Structural variants carry the JSON path of the offending value,
/// e.g. `$.children[2].level`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A scalar (string, number or literal) is not valid JSON
    #[error("malformed json: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Input breaks JSON structure at a byte offset
    #[error("malformed json at byte {offset}: expected {expected}")]
    Unexpected {
        offset: usize,
        expected: &'static str,
    },

    /// A tree position holds something other than an object
    #[error("{path}: expected an object")]
    NotAnObject { path: String },

    /// Object has no `name`
    #[error("{path}: missing `name`")]
    MissingName { path: String },

    /// `name` is present but not a string
    #[error("{path}: `name` must be a string")]
    InvalidName { path: String },

    /// `level` is present but not a non-negative integer
    #[error("{path}: `level` must be a non-negative integer, found {found}")]
    InvalidLevel { path: String, found: String },

    /// `children` is present but not an array
    #[error("{path}: `children` must be an array")]
    InvalidChildren { path: String },

    /// `ai_percentage` is present but not a number in `0..=100`
    #[error("{path}: `ai_percentage` must be a number in 0..=100, found {found}")]
    InvalidAiPercentage { path: String, found: String },
}

impl DecodeError {
    /// JSON path of the offending value, if the error is structural
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Syntax(_) | Self::Unexpected { .. } => None,
            Self::NotAnObject { path }
            | Self::MissingName { path }
            | Self::InvalidName { path }
            | Self::InvalidLevel { path, .. }
            | Self::InvalidChildren { path }
            | Self::InvalidAiPercentage { path, .. } => Some(path),
        }
    }

    /// Stable error code for logs and CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax(_) | Self::Unexpected { .. } => "SYNTAX",
            Self::NotAnObject { .. } => "NOT_AN_OBJECT",
            Self::MissingName { .. } => "MISSING_NAME",
            Self::InvalidName { .. } => "INVALID_NAME",
            Self::InvalidLevel { .. } => "INVALID_LEVEL",
            Self::InvalidChildren { .. } => "INVALID_CHILDREN",
            Self::InvalidAiPercentage { .. } => "INVALID_AI_PERCENTAGE",
        }
    }
}

/// Rejected user input; the tree is left untouched
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Name is empty
    #[error("node name is empty")]
    EmptyName,

    /// Level input is not a positive integer
    #[error("level must be a positive integer, got '{0}'")]
    InvalidLevel(String),

    /// Coverage outside `0..=100` (or not finite)
    #[error("ai percentage must be within 0..=100, got {0}")]
    PercentageOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_errors_expose_path() {
        let err = DecodeError::InvalidLevel {
            path: "$.children[0].level".into(),
            found: "\"high\"".into(),
        };
        assert_eq!(err.path(), Some("$.children[0].level"));
        assert_eq!(err.code(), "INVALID_LEVEL");
        assert!(err.to_string().contains("non-negative integer"));
    }

    #[test]
    fn syntax_error_has_no_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DecodeError::from(json_err);
        assert_eq!(err.path(), None);
        assert_eq!(err.code(), "SYNTAX");
    }
}
