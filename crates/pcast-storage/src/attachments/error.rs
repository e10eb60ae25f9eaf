use pcast_core::AppError;
use thiserror::Error;

use crate::traits::StorageError;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("File {filename} is {size} bytes; the limit is {limit} bytes")]
    TooLarge {
        filename: String,
        size: u64,
        limit: u64,
    },

    #[error("File type {mimetype} of {filename} is not accepted here")]
    TypeNotAccepted { filename: String, mimetype: String },

    #[error("At most {max} file(s) may be attached")]
    TooManyFiles { max: usize },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("File index error: {0}")]
    Index(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

impl From<AttachmentError> for AppError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            AttachmentError::TypeNotAccepted { .. }
            | AttachmentError::TooManyFiles { .. }
            | AttachmentError::InvalidFileName(_) => AppError::InvalidInput(err.to_string()),
            AttachmentError::Index(msg) => AppError::Internal(msg),
            AttachmentError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            other => AppError::Storage(other.to_string()),
        }
    }
}
