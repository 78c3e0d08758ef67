//! Error types

mod init;
mod read;
mod transfer;

pub use init::*;
pub use read::*;
pub use transfer::*;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Controller initialization failed.
    #[error(transparent)]
    Init(#[from] InitError),

    /// A file could not be read for preview generation.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A transfer to the upload endpoint failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}
