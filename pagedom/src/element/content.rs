use super::Element;

/// What an element holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    /// Inline image, e.g. a generated preview thumbnail. `source` is a URL
    /// or data URL; the host decides how to present it.
    Image {
        source: String,
        alt: String,
    },
    Children(Vec<Element>),
}

impl Content {
    /// Returns the child list, if this content holds children.
    pub fn children(&self) -> Option<&[Element]> {
        match self {
            Self::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Returns the text, if this content holds text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}
