//! Embeddable page-widget controllers
//!
//! Two independent controllers that attach to containers supplied by a host
//! page: an accordion with mutually-exclusive sections, and a drag-and-drop
//! file uploader with client-side previews, bounded concurrent transfers,
//! and cooperative cancellation.

pub mod accordion;
pub mod config;
pub mod error;
pub mod upload;

pub use accordion::{AccordionController, Section, SectionId};
pub use config::UploadConfig;
pub use error::{Error, InitError, ReadError, TransferError};
pub use upload::{
    BatchId, DiskFile, FileMeta, FileSource, HttpTransport, ItemId, MemoryFile, Preview,
    Progress, RenderHook, Transport, TransferLimiter, TransferRequest, UploadController,
    UploadItem, UploadStatus,
};
