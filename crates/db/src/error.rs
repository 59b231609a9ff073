/// Errors surfaced by an [`AnimeStore`](crate::store::AnimeStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write violated a store-level constraint (e.g. a blank name).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// PostgreSQL SQLSTATE codes that indicate the row itself was invalid.
const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

impl StoreError {
    /// Classify a sqlx error, lifting not-null and check violations into
    /// [`StoreError::Constraint`].
    pub fn classify(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            if matches!(code.as_deref(), Some(NOT_NULL_VIOLATION | CHECK_VIOLATION)) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                tracing::debug!(sqlstate = ?code, constraint, "Write rejected by database constraint");
                return StoreError::Constraint(format!(
                    "row violates constraint {constraint}: {}",
                    db_err.message()
                ));
            }
        }
        StoreError::Database(err)
    }
}
