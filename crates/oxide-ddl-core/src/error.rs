//! Error types for schema diffing.

/// Errors raised while computing a schema diff.
///
/// Schema differences are never errors; only input that violates the
/// model's invariants is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A table or view definition is not well formed.
    #[error("malformed schema in `{table}`: {reason}")]
    MalformedSchema {
        /// The offending table or view.
        table: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl DiffError {
    /// Creates a [`DiffError::MalformedSchema`].
    #[must_use]
    pub fn malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = DiffError::malformed("users", "duplicate field `id`");
        assert_eq!(
            err.to_string(),
            "malformed schema in `users`: duplicate field `id`"
        );
    }
}
