//! Accordion widget - mutually-exclusive expand/collapse sections.

mod controller;
mod section;

pub use controller::AccordionController;
pub use section::{Section, SectionId};
