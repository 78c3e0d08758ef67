//! Preview markup for upload items.

use std::sync::Arc;

use pagedom::Element;

use super::{ItemId, Preview, UploadItem, UploadStatus};

/// Hook invoked with an item snapshot after its preview markup is patched.
pub type RenderHook = Arc<dyn Fn(&UploadItem) + Send + Sync>;

/// Element id carrying an item's preview markup.
pub(crate) fn item_element_id(id: ItemId) -> String {
    format!("upload-item-{id}")
}

/// Builds the preview markup for one item.
///
/// The same structure is produced for every status; classes and children
/// shift with the lifecycle so the host's stylesheet can do the rest.
/// Markup for an item is replaced in place on updates, never reordered.
pub fn item_markup(item: &UploadItem) -> Element {
    let thumbnail = match &item.preview {
        Some(Preview::DataUrl(url)) => {
            Element::image(url.clone(), item.meta.name.clone()).class("thumbnail")
        }
        Some(Preview::Placeholder) => Element::box_()
            .class("thumbnail")
            .class("placeholder")
            .child(Element::text(extension_label(&item.meta.name))),
        None => Element::box_().class("thumbnail").class("loading"),
    };

    let mut element = Element::box_()
        .id(item_element_id(item.id))
        .class("upload-item")
        .class(status_class(item.status))
        .data("item-id", item.id.to_string())
        .child(thumbnail)
        .child(Element::text(item.meta.name.clone()).class("file-name"))
        .child(Element::text(format!("{}%", item.progress_percent)).class("progress"));

    if let Some(error) = &item.error {
        element = element.child(Element::text(error.clone()).class("error-message"));
    }

    element
}

fn status_class(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Pending => "status-pending",
        UploadStatus::Reading => "status-reading",
        UploadStatus::ReadyToUpload => "status-ready",
        UploadStatus::Uploading => "status-uploading",
        UploadStatus::Succeeded => "status-succeeded",
        UploadStatus::Failed => "status-failed",
    }
}

/// Uppercased extension for the placeholder icon, `FILE` when there is
/// none.
fn extension_label(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
        _ => "FILE".to_string(),
    }
}
