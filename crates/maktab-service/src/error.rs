use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] maktab_store::error::StoreError),

    #[error(transparent)]
    CoreError(#[from] maktab_core::error::CoreError),

    /// Template rejected before expansion; never silently coerced.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
