use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("A uniqueness constraint was violated: {0}")]
    Conflict(String),
}

impl DbError {
    /// Classifies a driver error, lifting constraint violations into domain variants.
    ///
    /// A foreign-key violation means the parent company vanished mid-request, which
    /// callers see as `NotFound`.
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                let constraint = db_err.constraint().unwrap_or("unique constraint").to_string();
                DbError::Conflict(constraint)
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => DbError::NotFound,
            other => DbError::QueryError(other),
        }
    }
}
