//! Drag-and-drop upload controller.

use std::sync::{Arc, RwLock};

use pagedom::{Dom, Event, EventResult};
use tokio_util::sync::CancellationToken;

use crate::config::UploadConfig;
use crate::error::{InitError, ReadError, TransferError};

use super::batch::{Batch, ItemSlot};
use super::preview::build_preview;
use super::render::{item_element_id, item_markup, RenderHook};
use super::{
    BatchId, FileSource, ItemId, Progress, Transport, TransferLimiter, TransferRequest,
    UploadItem, UploadStatus,
};

/// Class applied to the drop zone while files are dragged over it.
const DRAG_ACTIVE_CLASS: &str = "drag-active";

/// Controller for a drop-zone + preview-list pair.
///
/// Event methods are synchronous and cheap; file reads and transfers run as
/// tasks spawned onto the ambient tokio runtime, mutating shared item slots
/// and patching the preview subtree as they complete. The controller is
/// cheap to clone (`Arc` internally).
///
/// # Example
///
/// ```ignore
/// let uploader = UploadController::builder()
///     .dom(dom.clone())
///     .transport(HttpTransport::new(endpoint))
///     .drop_zone("drop-zone")
///     .preview_list("preview-list")
///     .initialize()?;
///
/// let batch = uploader.on_drop(files);
/// uploader.start_upload(batch);
/// ```
#[derive(Clone)]
pub struct UploadController {
    inner: Arc<ControllerInner>,
}

impl std::fmt::Debug for UploadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadController")
            .field("drop_zone", &self.inner.drop_zone)
            .field("preview_list", &self.inner.preview_list)
            .finish_non_exhaustive()
    }
}

struct ControllerInner {
    dom: Dom,
    drop_zone: String,
    preview_list: String,
    config: UploadConfig,
    transport: Arc<dyn Transport>,
    limiter: TransferLimiter,
    cancel: CancellationToken,
    batches: RwLock<Vec<Arc<Batch>>>,
    on_render: Option<RenderHook>,
}

impl UploadController {
    /// Creates a new builder for constructing a controller.
    pub fn builder() -> UploadControllerBuilder<Missing, Missing> {
        UploadControllerBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Drag affordance
    // -------------------------------------------------------------------------

    /// Applies the drag-active affordance to the drop zone. Idempotent
    /// while the drag continues.
    pub fn on_drag_over(&self) {
        self.inner.dom.update(|doc| {
            doc.add_class(&self.inner.drop_zone, DRAG_ACTIVE_CLASS);
        });
    }

    /// Clears the drag-active affordance.
    pub fn on_drag_leave(&self) {
        self.inner.dom.update(|doc| {
            doc.remove_class(&self.inner.drop_zone, DRAG_ACTIVE_CLASS);
        });
    }

    /// Whether the drag-active affordance is currently applied.
    pub fn is_drag_active(&self) -> bool {
        self.inner
            .dom
            .with(|doc| doc.has_class(&self.inner.drop_zone, DRAG_ACTIVE_CLASS))
    }

    /// Dispatches a host event targeting the drop zone. File payloads
    /// arrive separately through [`UploadController::on_drop`].
    pub fn handle_event(&self, event: &Event) -> EventResult {
        if event.target() != self.inner.drop_zone {
            return EventResult::Ignored;
        }

        match event {
            Event::DragOver { .. } => {
                self.on_drag_over();
                EventResult::Consumed
            }
            Event::DragLeave { .. } | Event::Drop { .. } => {
                self.on_drag_leave();
                EventResult::Consumed
            }
            Event::Click { .. } => EventResult::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Ingestion
    // -------------------------------------------------------------------------

    /// Accepts files released over the drop zone: clears the drag
    /// affordance and ingests them as a fresh batch.
    pub fn on_drop(&self, files: Vec<Arc<dyn FileSource>>) -> BatchId {
        self.on_drag_leave();
        self.ingest(files)
    }

    /// Accepts files chosen through the host's file picker.
    pub fn on_file_select(&self, files: Vec<Arc<dyn FileSource>>) -> BatchId {
        self.ingest(files)
    }

    /// Builds a new batch, renders a pending entry per file in input order,
    /// and spawns one independent read task per item.
    fn ingest(&self, files: Vec<Arc<dyn FileSource>>) -> BatchId {
        let batch = Arc::new(Batch::new(self.inner.cancel.child_token(), files));
        log::debug!(
            "[upload] batch {} created with {} file(s)",
            batch.id,
            batch.items.len()
        );

        // Append-only initial render, one entry per file in drop order.
        for slot in &batch.items {
            self.render(&batch, slot);
        }

        for slot in &batch.items {
            let oversize = self
                .inner
                .config
                .max_file_bytes
                .filter(|limit| slot.meta().size > *limit);

            match oversize {
                Some(limit) => {
                    // Rejected before any bytes move; the read is what failed.
                    let err = ReadError::TooLarge {
                        size: slot.meta().size,
                        limit,
                    };
                    log::warn!("[upload] rejecting {}: {err}", slot.meta().name);
                    slot.update(|item| {
                        item.transition(UploadStatus::Reading);
                        item.fail(err.to_string());
                    });
                    self.render(&batch, slot);
                }
                None => self.spawn_read(batch.clone(), slot.clone()),
            }
        }

        let id = batch.id;
        match self.inner.batches.write() {
            Ok(mut guard) => guard.push(batch),
            Err(poisoned) => poisoned.into_inner().push(batch),
        }
        id
    }

    fn spawn_read(&self, batch: Arc<Batch>, slot: Arc<ItemSlot>) {
        let controller = self.clone();
        let cancel = batch.cancel.clone();
        let task_batch = batch.clone();

        let handle = tokio::spawn(async move {
            let batch = task_batch;
            if cancel.is_cancelled() {
                return;
            }

            slot.update(|item| item.transition(UploadStatus::Reading));
            controller.render(&batch, &slot);

            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = slot.source().read() => result,
            };

            match result {
                Ok(bytes) => {
                    let preview = build_preview(slot.meta(), &bytes, &controller.inner.config);
                    slot.store_data(bytes);
                    slot.update(|item| {
                        item.preview = Some(preview);
                        item.transition(UploadStatus::ReadyToUpload);
                    });
                }
                Err(err) => {
                    log::warn!("[upload] read failed for {}: {err}", slot.meta().name);
                    slot.update(|item| item.fail(err.to_string()));
                }
            }
            controller.render(&batch, &slot);
        });

        batch.track(handle);
    }

    // -------------------------------------------------------------------------
    // Transfers
    // -------------------------------------------------------------------------

    /// Starts the transfer for every `ReadyToUpload` item in the batch.
    ///
    /// Transfers run concurrently, bounded by the configured limit; one
    /// item's failure never cancels its siblings. Returns the number of
    /// items scheduled.
    pub fn start_upload(&self, batch_id: BatchId) -> usize {
        let Some(batch) = self.batch(batch_id) else {
            log::warn!("[upload] start_upload on unknown batch {batch_id}");
            return 0;
        };

        let ready: Vec<Arc<ItemSlot>> = batch
            .items
            .iter()
            .filter(|slot| slot.snapshot().status == UploadStatus::ReadyToUpload)
            .cloned()
            .collect();

        log::debug!(
            "[upload] batch {batch_id}: scheduling {} transfer(s)",
            ready.len()
        );

        for slot in &ready {
            self.spawn_upload(batch.clone(), slot.clone());
        }
        ready.len()
    }

    fn spawn_upload(&self, batch: Arc<Batch>, slot: Arc<ItemSlot>) {
        let controller = self.clone();
        let cancel = batch.cancel.clone();
        let task_batch = batch.clone();

        let handle = tokio::spawn(async move {
            let batch = task_batch;
            // Permit before Uploading, held until the final status lands:
            // observers never see more than `limit` items in Uploading.
            let _permit = tokio::select! {
                _ = cancel.cancelled() => return,
                permit = controller.inner.limiter.acquire() => permit,
            };

            let Some(data) = slot.data() else {
                log::warn!("[upload] no bytes for {}, skipping", slot.meta().name);
                return;
            };

            if !slot.update(|item| item.transition(UploadStatus::Uploading)) {
                return;
            }
            controller.render(&batch, &slot);

            let progress = {
                let controller = controller.clone();
                let batch = batch.clone();
                let slot = slot.clone();
                Progress::new(move |sent, total| {
                    let percent = if total == 0 {
                        100
                    } else {
                        (sent.saturating_mul(100) / total).min(100) as u8
                    };
                    slot.update(|item| item.set_progress(percent));
                    controller.render(&batch, &slot);
                })
            };

            let request = TransferRequest {
                meta: slot.meta().clone(),
                data,
            };

            match controller
                .inner
                .transport
                .send(request, progress, cancel.clone())
                .await
            {
                Ok(()) => {
                    slot.update(|item| {
                        item.set_progress(100);
                        item.transition(UploadStatus::Succeeded);
                    });
                    controller.render(&batch, &slot);
                }
                Err(TransferError::Cancelled) => {
                    log::debug!("[upload] transfer cancelled for {}", slot.meta().name);
                }
                Err(err) => {
                    log::warn!("[upload] transfer failed for {}: {err}", slot.meta().name);
                    slot.update(|item| item.fail(err.to_string()));
                    controller.render(&batch, &slot);
                }
            }
        });

        batch.track(handle);
    }

    /// Manually re-queues a failed item as `ReadyToUpload`.
    ///
    /// Returns `false` when the batch or item is unknown, or the item is
    /// not in `Failed`. A subsequent [`UploadController::start_upload`]
    /// picks it up again.
    pub fn retry(&self, batch_id: BatchId, item_id: ItemId) -> bool {
        let Some(batch) = self.batch(batch_id) else {
            return false;
        };
        let Some(slot) = batch.slot(item_id).cloned() else {
            return false;
        };

        let retried = slot.update(|item| {
            if !item.transition(UploadStatus::ReadyToUpload) {
                return false;
            }
            item.error = None;
            // New attempt, new 0 -> 100 ramp.
            item.progress_percent = 0;
            true
        });

        if retried {
            log::debug!("[upload] retrying {} in batch {batch_id}", slot.meta().name);
            self.render(&batch, &slot);
        }
        retried
    }

    // -------------------------------------------------------------------------
    // Cancellation
    // -------------------------------------------------------------------------

    /// Cancels a batch's in-flight reads and transfers cooperatively.
    ///
    /// Already-running operations observe the token at their next await
    /// point; whatever completions still fire produce no render output.
    pub fn cancel_batch(&self, batch_id: BatchId) {
        if let Some(batch) = self.batch(batch_id) {
            log::debug!("[upload] cancelling batch {batch_id}");
            batch.cancel.cancel();
        }
    }

    /// Tears the controller down: every batch is cancelled and no further
    /// render output is produced. Call when the host removes the drop zone.
    pub fn destroy(&self) {
        log::debug!("[upload] controller for {:?} destroyed", self.inner.drop_zone);
        self.inner.cancel.cancel();
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Snapshots of the batch's items in drop order.
    pub fn snapshot(&self, batch_id: BatchId) -> Option<Vec<UploadItem>> {
        let batch = self.batch(batch_id)?;
        Some(batch.items.iter().map(|slot| slot.snapshot()).collect())
    }

    /// Ids of every batch this controller has ingested, oldest first.
    pub fn batch_ids(&self) -> Vec<BatchId> {
        match self.inner.batches.read() {
            Ok(guard) => guard.iter().map(|b| b.id).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|b| b.id).collect(),
        }
    }

    /// Awaits every task spawned so far for the batch. Intended for tests
    /// and orderly shutdown; new tasks spawned while waiting are awaited
    /// too.
    pub async fn wait_idle(&self, batch_id: BatchId) {
        let Some(batch) = self.batch(batch_id) else {
            return;
        };
        loop {
            let handles = batch.drain_tasks();
            if handles.is_empty() {
                break;
            }
            futures::future::join_all(handles).await;
        }
    }

    fn batch(&self, id: BatchId) -> Option<Arc<Batch>> {
        match self.inner.batches.read() {
            Ok(guard) => guard.iter().find(|b| b.id == id).cloned(),
            Err(poisoned) => poisoned.into_inner().iter().find(|b| b.id == id).cloned(),
        }
    }

    /// The one render path: patch the item's preview markup (append on
    /// first sight, replace in place afterwards) and notify the host hook.
    /// Cancelled batches render nothing.
    fn render(&self, batch: &Batch, slot: &ItemSlot) {
        if batch.cancel.is_cancelled() {
            return;
        }

        let item = slot.snapshot();
        let element_id = item_element_id(item.id);
        let markup = item_markup(&item);

        self.inner.dom.update(|doc| {
            if doc.contains(&element_id) {
                doc.replace_child(&element_id, markup);
            } else {
                doc.append_child(&self.inner.preview_list, markup);
            }
        });

        if let Some(hook) = &self.inner.on_render {
            hook(&item);
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`UploadController`].
///
/// Uses the typestate pattern so the required fields (`dom`, `transport`)
/// are enforced at compile time; `initialize` only exists once both are
/// set, and validates the container elements before handing back a
/// controller.
pub struct UploadControllerBuilder<D, T> {
    dom: D,
    transport: T,
    drop_zone: String,
    preview_list: String,
    config: UploadConfig,
    on_render: Option<RenderHook>,
}

impl UploadControllerBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            dom: Missing,
            transport: Missing,
            drop_zone: "drop-zone".to_string(),
            preview_list: "preview-list".to_string(),
            config: UploadConfig::default(),
            on_render: None,
        }
    }
}

impl Default for UploadControllerBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UploadControllerBuilder<Missing, T> {
    /// Sets the shared document handle.
    pub fn dom(self, dom: Dom) -> UploadControllerBuilder<Set<Dom>, T> {
        UploadControllerBuilder {
            dom: Set(dom),
            transport: self.transport,
            drop_zone: self.drop_zone,
            preview_list: self.preview_list,
            config: self.config,
            on_render: self.on_render,
        }
    }
}

impl<D> UploadControllerBuilder<D, Missing> {
    /// Sets the transfer implementation.
    pub fn transport<T: Transport + 'static>(
        self,
        transport: T,
    ) -> UploadControllerBuilder<D, Set<Arc<dyn Transport>>> {
        UploadControllerBuilder {
            dom: self.dom,
            transport: Set(Arc::new(transport) as Arc<dyn Transport>),
            drop_zone: self.drop_zone,
            preview_list: self.preview_list,
            config: self.config,
            on_render: self.on_render,
        }
    }
}

impl<D, T> UploadControllerBuilder<D, T> {
    /// Sets the drop zone element id. Defaults to `"drop-zone"`.
    pub fn drop_zone(mut self, id: impl Into<String>) -> Self {
        self.drop_zone = id.into();
        self
    }

    /// Sets the preview list element id. Defaults to `"preview-list"`.
    pub fn preview_list(mut self, id: impl Into<String>) -> Self {
        self.preview_list = id.into();
        self
    }

    /// Sets the upload configuration.
    pub fn config(mut self, config: UploadConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a hook called with each item snapshot after its markup is
    /// patched.
    pub fn on_render(mut self, hook: impl Fn(&UploadItem) + Send + Sync + 'static) -> Self {
        self.on_render = Some(Arc::new(hook));
        self
    }
}

impl UploadControllerBuilder<Set<Dom>, Set<Arc<dyn Transport>>> {
    /// Builds the [`UploadController`].
    ///
    /// Fails with [`InitError::MissingElement`] when the drop zone or
    /// preview list is absent from the document; the controller refuses to
    /// operate on a partial container structure.
    pub fn initialize(self) -> Result<UploadController, InitError> {
        let dom = self.dom.0;
        let transport = self.transport.0;

        dom.with(|doc| {
            for id in [&self.drop_zone, &self.preview_list] {
                if !doc.contains(id) {
                    return Err(InitError::MissingElement { id: id.clone() });
                }
            }
            Ok(())
        })?;

        log::debug!(
            "[upload] initialized: drop zone {:?}, preview list {:?}, {} concurrent transfer(s) max",
            self.drop_zone,
            self.preview_list,
            self.config.max_concurrent_transfers
        );

        let limiter = TransferLimiter::new(self.config.max_concurrent_transfers);

        Ok(UploadController {
            inner: Arc::new(ControllerInner {
                dom,
                drop_zone: self.drop_zone,
                preview_list: self.preview_list,
                config: self.config,
                transport,
                limiter,
                cancel: CancellationToken::new(),
                batches: RwLock::new(Vec::new()),
                on_render: self.on_render,
            }),
        })
    }
}
