//! Drag-and-drop upload widget.

mod batch;
mod controller;
mod file;
mod item;
mod limiter;
mod preview;
mod render;
mod transfer;

pub use batch::BatchId;
pub use controller::{Missing, Set, UploadController, UploadControllerBuilder};
pub use file::{DiskFile, FileMeta, FileSource, MemoryFile};
pub use item::{ItemId, Preview, UploadItem, UploadStatus};
pub use limiter::TransferLimiter;
pub use preview::build_preview;
pub use render::{item_markup, RenderHook};
pub use transfer::{HttpTransport, Progress, Transport, TransferRequest};
