//! File read error types

/// Errors that can occur while reading a file for preview generation.
///
/// Read failures are local to the affected item; they never abort the rest
/// of the batch.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The handle could not produce the file's bytes.
    #[error("{name} is unreadable: {reason}")]
    Unreadable {
        /// File name as reported by the host.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// The file exceeds the configured size ceiling.
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Declared file size.
        size: u64,
        /// Configured maximum.
        limit: u64,
    },
}

impl ReadError {
    /// Creates an unreadable-file error.
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
