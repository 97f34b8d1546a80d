use super::*;

// =============================================================
// Selectors
// =============================================================

#[test]
fn selectors_render_as_css() {
    assert_eq!(Selector::Class("section").to_css(), ".section");
    assert_eq!(Selector::Id("theme-toggle").to_css(), "#theme-toggle");
    assert_eq!(Selector::FragmentLinks.to_css(), r##"a[href^="#"]"##);
    assert_eq!(Selector::Descendant { ancestor_class: "hero", tag: "h1" }.to_css(), ".hero h1");
}

// =============================================================
// MemoryDom
// =============================================================

#[test]
fn query_returns_matches_in_document_order() {
    let mut dom = MemoryDom::new();
    let main = dom.add(MemoryDom::BODY, "main", &[]);
    let first = dom.add(main, "div", &["section"]);
    let nested = dom.add(first, "div", &["section"]);
    let second = dom.add(main, "div", &["section"]);
    assert_eq!(dom.query(&Selector::Class("section")), vec![first, nested, second]);
}

#[test]
fn detached_elements_are_not_queried() {
    let mut dom = MemoryDom::new();
    let card = dom.add(MemoryDom::BODY, "div", &["contact-card"]);
    let loose = dom.create("div").unwrap();
    dom.add_class(loose, "contact-card");
    assert_eq!(dom.query(&Selector::Class("contact-card")), vec![card]);

    dom.remove(card);
    assert!(dom.query(&Selector::Class("contact-card")).is_empty());
}

#[test]
fn remove_releases_the_subtree_for_reuse() {
    let mut dom = MemoryDom::new();
    let card = dom.add(MemoryDom::BODY, "div", &["contact-card"]);
    let label = dom.add(card, "span", &[]);
    assert_eq!(dom.live_handles(), 3);

    dom.remove(card);
    assert_eq!(dom.live_handles(), 1);
    assert_eq!(dom.tag(label), None);
    assert!(dom.children(MemoryDom::BODY).is_empty());

    let reused = dom.create("p").unwrap();
    assert!(reused == card || reused == label);
    assert_eq!(dom.live_handles(), 2);
}

#[test]
fn body_cannot_be_removed() {
    let mut dom = MemoryDom::new();
    dom.remove(MemoryDom::BODY);
    assert_eq!(dom.tag(MemoryDom::BODY), Some("body"));
}

#[test]
fn id_lookup_uses_the_id_attribute() {
    let mut dom = MemoryDom::new();
    let about = dom.add(MemoryDom::BODY, "section", &[]);
    dom.set_attribute(about, "id", "about");
    assert_eq!(dom.query_first(&Selector::Id("about")), Some(about));
    assert_eq!(dom.query_first(&Selector::Id("missing")), None);
}

#[test]
fn fragment_links_require_anchor_and_hash_prefix() {
    let mut dom = MemoryDom::new();
    let link = dom.add(MemoryDom::BODY, "a", &[]);
    dom.set_attribute(link, "href", "#about");
    let external = dom.add(MemoryDom::BODY, "a", &[]);
    dom.set_attribute(external, "href", "https://example.com/#about");
    let button = dom.add(MemoryDom::BODY, "button", &[]);
    dom.set_attribute(button, "href", "#about");
    assert_eq!(dom.query(&Selector::FragmentLinks), vec![link]);
}

#[test]
fn descendant_matches_any_depth_below_ancestor() {
    let mut dom = MemoryDom::new();
    let hero = dom.add(MemoryDom::BODY, "header", &["hero"]);
    let wrap = dom.add(hero, "div", &[]);
    let heading = dom.add(wrap, "h1", &[]);
    dom.add(MemoryDom::BODY, "h1", &[]);
    let selector = Selector::Descendant { ancestor_class: "hero", tag: "h1" };
    assert_eq!(dom.query(&selector), vec![heading]);
}

#[test]
fn classes_are_deduplicated_and_removable() {
    let mut dom = MemoryDom::new();
    dom.add_class(MemoryDom::BODY, "dark-mode");
    dom.add_class(MemoryDom::BODY, "dark-mode");
    assert_eq!(dom.classes(MemoryDom::BODY), vec!["dark-mode"]);
    dom.remove_class(MemoryDom::BODY, "dark-mode");
    assert!(!dom.has_class(MemoryDom::BODY, "dark-mode"));
}

#[test]
fn append_moves_an_attached_child() {
    let mut dom = MemoryDom::new();
    let a = dom.add(MemoryDom::BODY, "div", &[]);
    let b = dom.add(MemoryDom::BODY, "div", &[]);
    let child = dom.add(a, "span", &[]);
    dom.append(b, child);
    assert!(dom.children(a).is_empty());
    assert_eq!(dom.children(b), &[child]);
    assert_eq!(dom.parent(child), Some(b));
}

#[test]
fn unknown_handles_are_inert() {
    let mut dom = MemoryDom::new();
    let ghost = ElementId(99);
    dom.add_class(ghost, "x");
    dom.set_text(ghost, "x");
    dom.append(ghost, MemoryDom::BODY);
    assert!(!dom.has_class(ghost, "x"));
    assert_eq!(dom.text(ghost), "");
    assert_eq!(dom.client_size(ghost), (0.0, 0.0));
}

#[test]
fn scroll_requests_are_recorded() {
    let mut dom = MemoryDom::new();
    let target = dom.add(MemoryDom::BODY, "section", &[]);
    dom.scroll_into_view(target);
    dom.scroll_to_top();
    assert_eq!(dom.scrolls(), &[ScrollRequest::IntoView(target), ScrollRequest::Top]);
}
