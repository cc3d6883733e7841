//! Error types for the Folio SDK.

use folio_kernel::KernelError;
use folio_types::DecodeError;

/// Errors surfaced by [`crate::Store`] construction and JSON dispatch.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    #[error("failed to compose reducers: {0}")]
    Kernel(#[from] KernelError),

    #[error("failed to decode event: {0}")]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, FolioError>;
