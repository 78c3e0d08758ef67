use pagedom::{Document, Dom, Element};

fn shared_page() -> Dom {
    Dom::new(Document::new(
        Element::box_().id("page").child(Element::box_().id("zone")),
    ))
}

#[test]
fn test_update_marks_dirty() {
    let dom = shared_page();
    assert!(!dom.is_dirty());

    dom.update(|doc| doc.add_class("zone", "drag-active"));
    assert!(dom.is_dirty());

    dom.clear_dirty();
    assert!(!dom.is_dirty());
}

#[test]
fn test_clones_share_state() {
    let dom = shared_page();
    let other = dom.clone();

    other.update(|doc| doc.add_class("zone", "drag-active"));

    assert!(dom.with(|doc| doc.has_class("zone", "drag-active")));
    assert!(dom.is_dirty());
}

#[test]
fn test_with_reads_without_dirtying() {
    let dom = shared_page();

    let exists = dom.with(|doc| doc.contains("zone"));
    assert!(exists);
    assert!(!dom.is_dirty());
}
