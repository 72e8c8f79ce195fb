use rusqlite::ErrorCode;
use thiserror::Error;

pub type AuditResult<T> = std::result::Result<T, AuditError>;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("crawl {crawl_id} is {status}, summary is only available for finished crawls")]
    Incomplete { crawl_id: i64, status: String },

    #[error("data integrity fault: {0}")]
    DataIntegrity(String),

    /// The store was busy or locked past the configured timeout.
    #[error("storage temporarily unavailable: {0}")]
    TransientStorage(String),

    /// Optimistic-concurrency retries were exhausted for one issue.
    #[error("issue {issue_id} was modified concurrently, retry the update")]
    Conflict { issue_id: i64 },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(String),
}

impl AuditError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AuditError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether a collaborator may retry the same call unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuditError::TransientStorage(_) | AuditError::Conflict { .. }
        )
    }

    /// Stable machine-readable kind used by transports.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::NotFound { .. } => "not_found",
            AuditError::Validation(_) => "validation_error",
            AuditError::Incomplete { .. } => "incomplete",
            AuditError::DataIntegrity(_) => "data_integrity_fault",
            AuditError::TransientStorage(_) => "transient_storage_error",
            AuditError::Conflict { .. } => "conflict",
            AuditError::Storage(_) => "storage_error",
            AuditError::Io(_) => "io_error",
        }
    }
}

impl From<rusqlite::Error> for AuditError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                AuditError::TransientStorage(err.to_string())
            }
            _ => AuditError::Storage(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_database_maps_to_retryable_error() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        let mapped = AuditError::from(err);
        assert!(matches!(mapped, AuditError::TransientStorage(_)));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn other_sqlite_failures_are_not_retryable() {
        let mapped = AuditError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(mapped, AuditError::Storage(_)));
        assert!(!mapped.is_retryable());
        assert!(!AuditError::Validation("empty patch".into()).is_retryable());
    }
}
