/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row with this id exists in the table.
    #[error("No {table} record with id {id}")]
    NotFound { table: &'static str, id: String },

    /// The caller's access policy does not allow the write.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The record is not acceptable for this table.
    #[error("Invalid record: {0}")]
    Invalid(String),

    /// Network or database failure.
    #[error("Storage error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Create a not-found error for a table.
    pub fn not_found(table: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            table,
            id: id.to_string(),
        }
    }

    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error means the row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Error type for survey loading and submission.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The survey does not exist, the token is wrong, or it is not active.
    ///
    /// Load-time failures all collapse to this one terminal state.
    #[error("Survey not found")]
    NotFound,

    /// The survey exists but cannot be used this way (e.g. has no pages).
    #[error("Survey unavailable: {0}")]
    Unavailable(String),

    /// A repository call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Transport or serialization failure outside the store.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl SurveyError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error is the terminal not-found state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_render_verbatim_through_survey_error() {
        let err = SurveyError::from(StoreError::backend(anyhow::anyhow!("connection reset")));
        assert_eq!(err.to_string(), "Storage error: connection reset");
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_helpers() {
        let err = StoreError::not_found("surveys", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No surveys record with id 42");
        assert!(SurveyError::NotFound.is_not_found());
    }
}
