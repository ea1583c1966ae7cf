//! Unified error handling for repository callers.
//!
//! Provides a single error type whose variants classify what went wrong:
//! the store could not be reached, a constraint was broken, the caller passed
//! bad input, or a required record was missing. Provider errors that fit none
//! of these are carried through unchanged.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Store availability
    #[error("Connection error: {0}")]
    Connection(String),

    // Integrity
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    // Caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Unclassified provider errors
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::NotFound(_) => "NOT_FOUND",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, AppError::Connection(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, AppError::ConstraintViolation(_))
    }
}

// =============================================================================
// Provider Error Classification (SeaORM)
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail))
            | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                return AppError::ConstraintViolation(detail);
            }
            _ => {}
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                tracing::error!("Database unreachable: {}", err);
                AppError::Connection(err.to_string())
            }
            DbErr::RecordNotFound(detail) => AppError::NotFound(detail),
            DbErr::RecordNotUpdated => AppError::NotFound("record was not updated".to_string()),
            other => AppError::Database(other),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::InvalidArgument(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(what.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_becomes_invalid_argument() {
        let err: AppError = DomainError::validation("page size must be at least 1").into();
        assert!(matches!(err, AppError::InvalidArgument(ref msg) if msg == "page size must be at least 1"));
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn missing_option_becomes_not_found() {
        let err = None::<i64>.ok_or_not_found("team 3").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: team 3");
    }

    #[cfg(feature = "database")]
    mod database {
        use super::*;
        use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};

        #[test]
        fn connection_failures_are_classified() {
            let err: AppError = DbErr::Conn(RuntimeErr::Internal("connection refused".into())).into();
            assert!(err.is_connection());
            assert!(err.to_string().contains("connection refused"));

            let err: AppError = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout).into();
            assert!(err.is_connection());
        }

        #[test]
        fn missing_records_are_not_found() {
            let err: AppError = DbErr::RecordNotFound("teams".into()).into();
            assert!(err.is_not_found());

            let err: AppError = DbErr::RecordNotUpdated.into();
            assert!(err.is_not_found());
        }

        #[test]
        fn other_errors_pass_through() {
            let err: AppError = DbErr::Custom("boom".into()).into();
            assert!(matches!(err, AppError::Database(DbErr::Custom(ref msg)) if msg == "boom"));
            assert_eq!(err.code(), "DATABASE_ERROR");
        }
    }
}
