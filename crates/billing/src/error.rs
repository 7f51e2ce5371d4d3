use tavolo_core::error::CoreError;

/// Error type for billing operations.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// A domain-level failure (validation, missing entity, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
