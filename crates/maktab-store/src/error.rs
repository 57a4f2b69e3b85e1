use maktab_core::types::InstanceId;
use thiserror::Error;

/// Store layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Instance not found: {0}")]
    InstanceNotFound(InstanceId),

    #[error(transparent)]
    CoreError(#[from] maktab_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
