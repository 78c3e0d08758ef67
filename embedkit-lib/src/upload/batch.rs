//! Upload batches.

use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{FileMeta, FileSource, ItemId, UploadItem};

/// Identifier for one drop/selection batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(Uuid);

impl BatchId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared slot for one item: observable state, the source handle, and the
/// bytes once read.
///
/// Read and upload tasks mutate through the slot; the controller snapshots
/// it for rendering. Lock access is poison-tolerant so a panicked task
/// cannot wedge its siblings.
pub(crate) struct ItemSlot {
    id: ItemId,
    source: Arc<dyn FileSource>,
    state: RwLock<UploadItem>,
    data: RwLock<Option<Arc<Vec<u8>>>>,
}

impl ItemSlot {
    pub(crate) fn new(source: Arc<dyn FileSource>) -> Self {
        let item = UploadItem::new(source.meta().clone());
        Self {
            id: item.id,
            source,
            state: RwLock::new(item),
            data: RwLock::new(None),
        }
    }

    pub(crate) fn id(&self) -> ItemId {
        self.id
    }

    pub(crate) fn meta(&self) -> &FileMeta {
        self.source.meta()
    }

    pub(crate) fn source(&self) -> &Arc<dyn FileSource> {
        &self.source
    }

    /// Clone of the current observable state.
    pub(crate) fn snapshot(&self) -> UploadItem {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Mutate the observable state through a closure.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut UploadItem) -> R) -> R {
        match self.state.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub(crate) fn store_data(&self, bytes: Vec<u8>) {
        let shared = Arc::new(bytes);
        match self.data.write() {
            Ok(mut guard) => *guard = Some(shared),
            Err(poisoned) => *poisoned.into_inner() = Some(shared),
        }
    }

    pub(crate) fn data(&self) -> Option<Arc<Vec<u8>>> {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// One drop/selection's worth of items.
///
/// Batches are never merged: every drop or picker selection creates a fresh
/// one with its own cancellation token, a child of the controller's.
pub(crate) struct Batch {
    pub(crate) id: BatchId,
    pub(crate) cancel: CancellationToken,
    pub(crate) items: Vec<Arc<ItemSlot>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Batch {
    pub(crate) fn new(cancel: CancellationToken, sources: Vec<Arc<dyn FileSource>>) -> Self {
        Self {
            id: BatchId::new(),
            cancel,
            items: sources.into_iter().map(|s| Arc::new(ItemSlot::new(s))).collect(),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn slot(&self, id: ItemId) -> Option<&Arc<ItemSlot>> {
        self.items.iter().find(|slot| slot.id() == id)
    }

    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        match self.tasks.lock() {
            Ok(mut guard) => guard.push(handle),
            Err(poisoned) => poisoned.into_inner().push(handle),
        }
    }

    /// Takes every tracked task handle, leaving the list empty.
    pub(crate) fn drain_tasks(&self) -> Vec<JoinHandle<()>> {
        match self.tasks.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}
