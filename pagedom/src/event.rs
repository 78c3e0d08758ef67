/// High-level host events with element targeting.
///
/// The host page adapts its native input events into these before handing
/// them to a controller. File payloads travel separately; a drop event only
/// names where it landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer click on an element.
    Click { target: String },
    /// Dragged files are over an element. Fires repeatedly while the drag
    /// continues.
    DragOver { target: String },
    /// Dragged files left the element, or the drag ended without a drop.
    DragLeave { target: String },
    /// Files were released over an element.
    Drop { target: String },
}

impl Event {
    /// The id of the element the event targets.
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target }
            | Self::DragOver { target }
            | Self::DragLeave { target }
            | Self::Drop { target } => target,
        }
    }
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}
