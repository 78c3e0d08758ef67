//! Upload configuration.

/// Configuration for an upload controller.
///
/// # Example
///
/// ```
/// use embedkit_lib::UploadConfig;
///
/// // Default configuration
/// let config = UploadConfig::default();
///
/// // Custom configuration
/// let custom = UploadConfig::default()
///     .max_concurrent_transfers(3)
///     .max_file_bytes(50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum number of simultaneous transfers.
    pub max_concurrent_transfers: usize,
    /// Largest file that still gets an inline data-URL preview; bigger
    /// images fall back to the placeholder.
    pub max_preview_bytes: u64,
    /// Reject files larger than this at ingest. `None` accepts any size.
    pub max_file_bytes: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_transfers: 4,
            max_preview_bytes: 2 * 1024 * 1024,
            max_file_bytes: None,
        }
    }
}

impl UploadConfig {
    /// Sets the maximum number of simultaneous transfers.
    pub fn max_concurrent_transfers(mut self, n: usize) -> Self {
        self.max_concurrent_transfers = n.max(1);
        self
    }

    /// Sets the preview size ceiling in bytes.
    pub fn max_preview_bytes(mut self, bytes: u64) -> Self {
        self.max_preview_bytes = bytes;
        self
    }

    /// Sets the maximum accepted file size in bytes.
    pub fn max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = Some(bytes);
        self
    }
}
