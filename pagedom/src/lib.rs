//! Headless model of a host page's container structure.
//!
//! A retained element tree with ids, classes, and visibility, plus the host
//! event vocabulary. Widget controllers attach to containers in this tree
//! and mutate only the subtree they own; the host supplies the markup and
//! renders however it likes.

pub mod document;
pub mod dom;
pub mod element;
pub mod event;

pub use document::Document;
pub use dom::Dom;
pub use element::{find_element, find_element_mut, Content, Element};
pub use event::{Event, EventResult};
