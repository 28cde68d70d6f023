use analytics::AnalyticsError;
use core_types::CoreError;
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Store(DbError),

    #[error(transparent)]
    Metrics(#[from] AnalyticsError),
}

impl From<DbError> for LedgerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => LedgerError::NotFound("Record".to_string()),
            DbError::Conflict(constraint) => {
                LedgerError::Conflict(format!("Uniqueness constraint '{constraint}' violated"))
            }
            other => LedgerError::Store(other),
        }
    }
}
