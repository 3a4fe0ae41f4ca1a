use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Custom error type for budget-related operations
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("A budget already exists for this category and period")]
    Duplicate,
}

impl From<DieselError> for BudgetError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => BudgetError::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                BudgetError::Duplicate
            }
            _ => BudgetError::DatabaseError(err.to_string()),
        }
    }
}
