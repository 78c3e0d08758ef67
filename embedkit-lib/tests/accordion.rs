use embedkit_lib::{AccordionController, InitError, SectionId};
use pagedom::{Document, Dom, Element, Event, EventResult};

/// Accordion container with `count` header/body pairs: headers `h0..`,
/// bodies `b0..`.
fn accordion_dom(count: usize) -> Dom {
    let mut children = Vec::new();
    for i in 0..count {
        children.push(Element::text(format!("Header {i}")).id(format!("h{i}")));
        children.push(Element::text(format!("Body {i}")).id(format!("b{i}")));
    }
    let root = Element::box_()
        .id("page")
        .child(Element::box_().id("faq").children(children));
    Dom::new(Document::new(root))
}

fn expanded_count(accordion: &AccordionController) -> usize {
    accordion.sections().iter().filter(|s| s.expanded).count()
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_initialize_scans_pairs_in_document_order() {
    let dom = accordion_dom(3);
    let accordion = AccordionController::initialize(&dom, "faq").unwrap();

    assert_eq!(accordion.section_count(), 3);
    let headers: Vec<&str> = accordion
        .sections()
        .iter()
        .map(|s| s.header_id.as_str())
        .collect();
    assert_eq!(headers, vec!["h0", "h1", "h2"]);

    // All bodies start hidden, headers clickable
    for section in accordion.sections() {
        assert!(dom.with(|doc| doc.is_hidden(&section.body_id)));
        assert!(dom.with(|doc| doc.get(&section.header_id).unwrap().clickable));
    }
    assert_eq!(accordion.expanded_section(), None);
}

#[test]
fn test_initialize_missing_container() {
    let dom = accordion_dom(1);
    let err = AccordionController::initialize(&dom, "nope").unwrap_err();
    assert!(matches!(err, InitError::MissingElement { .. }));
}

#[test]
fn test_initialize_rejects_unpaired_children() {
    let root = Element::box_().id("page").child(
        Element::box_()
            .id("faq")
            .child(Element::text("Lonely header").id("h0")),
    );
    let dom = Dom::new(Document::new(root));

    let err = AccordionController::initialize(&dom, "faq").unwrap_err();
    match err {
        InitError::UnpairedHeader { children, .. } => assert_eq!(children, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_initialize_rejects_non_container() {
    let root = Element::box_()
        .id("page")
        .child(Element::text("just text").id("faq"));
    let dom = Dom::new(Document::new(root));

    let err = AccordionController::initialize(&dom, "faq").unwrap_err();
    assert!(matches!(err, InitError::NotAContainer { .. }));
}

#[test]
fn test_zero_sections_is_a_noop_controller() {
    let dom = Dom::new(Document::new(
        Element::box_().id("page").child(Element::box_().id("faq")),
    ));
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    assert!(accordion.is_empty());
    accordion.toggle(SectionId::new(0));
    accordion.collapse_all();
    assert_eq!(accordion.expanded_section(), None);
}

// ============================================================================
// Toggling
// ============================================================================

#[test]
fn test_toggle_expands_collapsed_section() {
    let dom = accordion_dom(3);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    accordion.toggle(SectionId::new(1));

    assert_eq!(accordion.expanded_section(), Some(SectionId::new(1)));
    assert_eq!(expanded_count(&accordion), 1);
    assert!(!dom.with(|doc| doc.is_hidden("b1")));
    assert!(dom.with(|doc| doc.has_class("h1", "expanded")));
    assert!(dom.with(|doc| doc.is_hidden("b0")));
}

#[test]
fn test_toggle_expanded_section_collapses_to_zero_open() {
    let dom = accordion_dom(2);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    accordion.toggle(SectionId::new(0));
    accordion.toggle(SectionId::new(0));

    assert_eq!(accordion.expanded_section(), None);
    assert_eq!(expanded_count(&accordion), 0);
    assert!(dom.with(|doc| doc.is_hidden("b0")));
    assert!(!dom.with(|doc| doc.has_class("h0", "expanded")));
}

#[test]
fn test_toggle_swaps_expanded_section() {
    let dom = accordion_dom(3);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    accordion.toggle(SectionId::new(0));
    accordion.toggle(SectionId::new(2));

    assert_eq!(accordion.expanded_section(), Some(SectionId::new(2)));
    assert_eq!(expanded_count(&accordion), 1);
    assert!(dom.with(|doc| doc.is_hidden("b0")));
    assert!(!dom.with(|doc| doc.is_hidden("b2")));
}

#[test]
fn test_at_most_one_expanded_after_any_toggle_sequence() {
    let dom = accordion_dom(4);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    for index in [0, 2, 2, 1, 3, 1, 0, 0, 3] {
        accordion.toggle(SectionId::new(index));
        assert!(expanded_count(&accordion) <= 1);

        // The DOM agrees with the controller's bookkeeping
        let visible = accordion
            .sections()
            .iter()
            .filter(|s| dom.with(|doc| !doc.is_hidden(&s.body_id)))
            .count();
        assert!(visible <= 1);
    }
}

// ============================================================================
// Event dispatch
// ============================================================================

#[test]
fn test_header_click_toggles() {
    let dom = accordion_dom(2);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    let result = accordion.handle_event(&Event::Click { target: "h1".into() });
    assert_eq!(result, EventResult::Consumed);
    assert!(result.is_handled());
    assert_eq!(accordion.expanded_section(), Some(SectionId::new(1)));

    // Clicking the open header closes it
    accordion.handle_event(&Event::Click { target: "h1".into() });
    assert_eq!(accordion.expanded_section(), None);
}

#[test]
fn test_unrelated_events_are_ignored() {
    let dom = accordion_dom(2);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    assert_eq!(
        accordion.handle_event(&Event::Click { target: "b0".into() }),
        EventResult::Ignored
    );
    assert_eq!(
        accordion.handle_event(&Event::DragOver { target: "h0".into() }),
        EventResult::Ignored
    );
    assert_eq!(accordion.expanded_section(), None);
}

// ============================================================================
// Programmatic control
// ============================================================================

#[test]
fn test_expand_and_collapse_all() {
    let dom = accordion_dom(3);
    let mut accordion = AccordionController::initialize(&dom, "faq").unwrap();

    accordion.expand(SectionId::new(1));
    assert_eq!(accordion.expanded_section(), Some(SectionId::new(1)));

    // Expanding the expanded section is a no-op
    accordion.expand(SectionId::new(1));
    assert_eq!(accordion.expanded_section(), Some(SectionId::new(1)));

    accordion.expand(SectionId::new(2));
    assert_eq!(accordion.expanded_section(), Some(SectionId::new(2)));

    accordion.collapse_all();
    assert_eq!(accordion.expanded_section(), None);
    assert_eq!(expanded_count(&accordion), 0);
}

#[test]
fn test_two_accordions_do_not_interfere() {
    let root = Element::box_().id("page").children(vec![
        Element::box_().id("left").children(vec![
            Element::text("L header").id("lh"),
            Element::text("L body").id("lb"),
        ]),
        Element::box_().id("right").children(vec![
            Element::text("R header").id("rh"),
            Element::text("R body").id("rb"),
        ]),
    ]);
    let dom = Dom::new(Document::new(root));

    let mut left = AccordionController::initialize(&dom, "left").unwrap();
    let mut right = AccordionController::initialize(&dom, "right").unwrap();

    left.toggle(SectionId::new(0));
    right.toggle(SectionId::new(0));

    // Each accordion enforces its invariant over its own container only
    assert!(!dom.with(|doc| doc.is_hidden("lb")));
    assert!(!dom.with(|doc| doc.is_hidden("rb")));

    left.toggle(SectionId::new(0));
    assert!(dom.with(|doc| doc.is_hidden("lb")));
    assert!(!dom.with(|doc| doc.is_hidden("rb")));
}
