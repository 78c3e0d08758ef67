//! Accordion controller.

use pagedom::{Content, Dom, Event, EventResult};

use crate::error::InitError;

use super::{Section, SectionId};

/// Class applied to the header of the expanded section.
const EXPANDED_CLASS: &str = "expanded";

/// Controller for one accordion container.
///
/// Scans the container for alternating header/body child pairs and keeps at
/// most one section expanded. Each accordion owns exactly one container
/// subtree; multiple accordions on a page get one controller each.
///
/// # Example
///
/// ```ignore
/// let mut accordion = AccordionController::initialize(&dom, "faq")?;
///
/// // Host event adapter
/// accordion.handle_event(&Event::Click { target: header_id });
///
/// // Programmatic control
/// accordion.expand(SectionId::new(0));
/// accordion.collapse_all();
/// ```
#[derive(Debug)]
pub struct AccordionController {
    dom: Dom,
    container_id: String,
    sections: Vec<Section>,
}

impl AccordionController {
    /// Attaches to `container_id` and builds the section list.
    ///
    /// The container's children are paired up in document order: even
    /// indices become headers, odd indices their bodies. Headers are marked
    /// clickable and every body starts hidden, so the single-open invariant
    /// holds from the first observable state. An empty container yields a
    /// functioning no-op controller.
    pub fn initialize(dom: &Dom, container_id: impl Into<String>) -> Result<Self, InitError> {
        let container_id = container_id.into();

        let pairs = dom.with(|doc| {
            let container = doc.get(&container_id).ok_or_else(|| InitError::MissingElement {
                id: container_id.clone(),
            })?;

            let children: &[pagedom::Element] = match &container.content {
                Content::Children(children) => children,
                Content::None => &[],
                _ => {
                    return Err(InitError::NotAContainer {
                        id: container_id.clone(),
                    });
                }
            };

            if children.len() % 2 != 0 {
                return Err(InitError::UnpairedHeader {
                    container: container_id.clone(),
                    children: children.len(),
                });
            }

            Ok(children
                .chunks(2)
                .map(|pair| (pair[0].id.clone(), pair[1].id.clone()))
                .collect::<Vec<_>>())
        })?;

        let sections: Vec<Section> = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (header_id, body_id))| Section {
                id: SectionId::new(index),
                header_id,
                body_id,
                expanded: false,
            })
            .collect();

        dom.update(|doc| {
            for section in &sections {
                if let Some(header) = doc.get_mut(&section.header_id) {
                    header.clickable = true;
                    header.remove_class(EXPANDED_CLASS);
                }
                doc.set_hidden(&section.body_id, true);
            }
        });

        log::debug!(
            "[accordion] initialized {} section(s) under {container_id:?}",
            sections.len()
        );

        Ok(Self {
            dom: dom.clone(),
            container_id,
            sections,
        })
    }

    /// Dispatches a host event. Clicks on a known header toggle that
    /// section; everything else is ignored.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Click { target } => {
                match self.sections.iter().position(|s| &s.header_id == target) {
                    Some(index) => {
                        self.toggle(SectionId::new(index));
                        EventResult::Consumed
                    }
                    None => EventResult::Ignored,
                }
            }
            _ => EventResult::Ignored,
        }
    }

    /// Toggles a section.
    ///
    /// An expanded target collapses, leaving no section open. A collapsed
    /// target expands after collapsing whichever section currently is.
    pub fn toggle(&mut self, id: SectionId) {
        let index = id.index();
        if index >= self.sections.len() {
            log::warn!("[accordion] toggle on unknown {id}");
            return;
        }

        if self.sections[index].expanded {
            self.collapse_index(index);
        } else {
            if let Some(open) = self.expanded_index() {
                self.collapse_index(open);
            }
            self.expand_index(index);
        }

        debug_assert!(self.sections.iter().filter(|s| s.expanded).count() <= 1);
    }

    /// Expands a section, collapsing any other open one. No-op when the
    /// target is already expanded.
    pub fn expand(&mut self, id: SectionId) {
        let index = id.index();
        if index >= self.sections.len() || self.sections[index].expanded {
            return;
        }
        self.toggle(id);
    }

    /// Collapses every section.
    pub fn collapse_all(&mut self) {
        if let Some(open) = self.expanded_index() {
            self.collapse_index(open);
        }
    }

    /// The currently expanded section, if any.
    pub fn expanded_section(&self) -> Option<SectionId> {
        self.expanded_index().map(SectionId::new)
    }

    /// Read access to the scanned sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    fn expanded_index(&self) -> Option<usize> {
        self.sections.iter().position(|s| s.expanded)
    }

    fn expand_index(&mut self, index: usize) {
        let section = &mut self.sections[index];
        section.expanded = true;
        log::debug!("[accordion] expand {}", section.id);
        let header_id = section.header_id.clone();
        let body_id = section.body_id.clone();
        self.dom.update(|doc| {
            doc.add_class(&header_id, EXPANDED_CLASS);
            doc.set_hidden(&body_id, false);
        });
    }

    fn collapse_index(&mut self, index: usize) {
        let section = &mut self.sections[index];
        section.expanded = false;
        log::debug!("[accordion] collapse {}", section.id);
        let header_id = section.header_id.clone();
        let body_id = section.body_id.clone();
        self.dom.update(|doc| {
            doc.remove_class(&header_id, EXPANDED_CLASS);
            doc.set_hidden(&body_id, true);
        });
    }
}
