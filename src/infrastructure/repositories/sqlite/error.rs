// src/infrastructure/repositories/sqlite/error.rs

use crate::domain::error::DomainError;
use diesel::r2d2;
use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Blocking task failed: {0}")]
    TaskError(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<r2d2::Error> for SqliteRepositoryError {
    fn from(err: r2d2::Error) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SqliteRepositoryError {
    fn from(err: tokio::task::JoinError) -> Self {
        SqliteRepositoryError::TaskError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::DatabaseError(DieselError::DatabaseError(_, info)) => {
                DomainError::Repository(format!("Database error: {}", info.message()))
            }
            SqliteRepositoryError::DatabaseError(diesel_err) => {
                DomainError::Repository(format!("Database error: {}", diesel_err))
            }
            SqliteRepositoryError::ConnectionPoolError(e) => {
                DomainError::Repository(format!("Connection pool error: {}", e))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            SqliteRepositoryError::MigrationError(e) => {
                DomainError::Repository(format!("Migration error: {}", e))
            }
            SqliteRepositoryError::TaskError(e) => {
                DomainError::Repository(format!("Blocking task failed: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pool_error_when_into_domain_then_repository_error() {
        let err: DomainError =
            SqliteRepositoryError::ConnectionPoolError("timed out".to_string()).into();
        assert!(matches!(err, DomainError::Repository(msg) if msg.contains("timed out")));
    }

    #[test]
    fn given_io_error_when_into_domain_then_io_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DomainError = SqliteRepositoryError::IoError(io).into();
        assert!(matches!(err, DomainError::Io(_)));
    }
}
