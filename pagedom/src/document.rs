//! Retained document tree with an in-place mutation surface.

use crate::element::{find_element, find_element_mut, Content, Element};

/// Owns a page's element tree.
///
/// Controllers never hold references into the tree; they address elements by
/// id through this surface. Mutators report missing targets through their
/// return value instead of panicking, since the host page owns the markup
/// and may restructure it.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Look up an element by id.
    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    /// Look up an element by id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Direct children of `id`, or `None` when the element is missing or
    /// holds non-child content.
    pub fn children_of(&self, id: &str) -> Option<&[Element]> {
        self.get(id)?.content.children()
    }

    /// Append a child to `parent`. Non-container content is promoted to a
    /// child list. Returns `false` when the parent does not exist.
    pub fn append_child(&mut self, parent: &str, child: Element) -> bool {
        match self.get_mut(parent) {
            Some(element) => {
                match &mut element.content {
                    Content::Children(children) => children.push(child),
                    _ => element.content = Content::Children(vec![child]),
                }
                true
            }
            None => {
                log::warn!("[dom] append_child: no element with id {parent:?}");
                false
            }
        }
    }

    /// Replace the element with `id` in place, keeping its position among
    /// its siblings. Returns `false` when no such element exists.
    pub fn replace_child(&mut self, id: &str, replacement: Element) -> bool {
        match find_element_mut(&mut self.root, id) {
            Some(element) => {
                *element = replacement;
                true
            }
            None => false,
        }
    }

    pub fn add_class(&mut self, id: &str, class: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.add_class(class);
                true
            }
            None => false,
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.get_mut(id) {
            Some(element) => element.remove_class(class),
            None => false,
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).map(|e| e.has_class(class)).unwrap_or(false)
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.hidden = hidden;
                true
            }
            None => false,
        }
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.get(id).map(|e| e.hidden).unwrap_or(false)
    }

    /// All elements in document order (depth-first, parents before children).
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }
}

fn collect<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    out.push(element);
    if let Content::Children(children) = &element.content {
        for child in children {
            collect(child, out);
        }
    }
}
