//! Accordion section state.

/// Identifies a section within one accordion, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(usize);

impl SectionId {
    /// Creates an id for the section at `index` in scan order.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the section in the container, starting at 0.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

/// One collapsible header/body pair.
///
/// Built by [`super::AccordionController::initialize`] from the container's
/// children; at most one section per accordion is expanded at a time, a
/// constraint the controller owns.
#[derive(Debug, Clone)]
pub struct Section {
    /// Position-based identifier.
    pub id: SectionId,
    /// Element id of the clickable header.
    pub header_id: String,
    /// Element id of the body shown when expanded.
    pub body_id: String,
    /// Whether the body is currently shown.
    pub expanded: bool,
}
