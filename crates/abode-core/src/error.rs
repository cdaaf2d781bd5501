//! Error types for the Abode auth subsystem's infrastructure layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbodeError {
    #[error("store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AbodeResult<T> = Result<T, AbodeError>;
