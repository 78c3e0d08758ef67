//! Initialization error types

/// Errors raised while attaching a controller to its container.
///
/// These are fatal to that controller: it refuses to operate on a partial
/// container structure and reports the problem to the integrating page.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// An expected element is missing from the page.
    #[error("no element with id {id:?}")]
    MissingElement {
        /// The id that was looked up.
        id: String,
    },

    /// The element exists but cannot hold child elements.
    #[error("element {id:?} is not a container")]
    NotAContainer {
        /// The offending element's id.
        id: String,
    },

    /// The container's children do not pair up into header/body sections.
    #[error("container {container:?} has {children} children; headers and bodies must alternate in pairs")]
    UnpairedHeader {
        /// The accordion container's id.
        container: String,
        /// How many children were found.
        children: usize,
    },
}
