use thiserror::Error;

use crate::services::workflow::WorkflowError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns a unique violation into a `ConstraintViolation` carrying `message`,
    /// leaving every other error untouched.
    pub fn on_unique_violation(self, message: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_a_unique_violation() {
        assert!(!StorageError::NotFound.is_unique_violation());
        assert!(!StorageError::NotFound.is_foreign_key_violation());
    }

    #[test]
    fn test_on_unique_violation_keeps_other_errors() {
        let err = StorageError::NotFound.on_unique_violation("Username already exists");
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn test_workflow_error_display_is_transparent() {
        let err = StorageError::from(WorkflowError::MissingRejectReason);
        assert_eq!(err.to_string(), WorkflowError::MissingRejectReason.to_string());
    }
}
