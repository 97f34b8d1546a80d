use super::*;
use crate::config::PageConfig;
use crate::dom::{ElementId, MemoryDom};
use crate::observer::MemoryObserver;

fn setup(sections: usize) -> (RevealAnimator, MemoryDom, MemoryObserver, Vec<ElementId>) {
    let mut dom = MemoryDom::new();
    let ids = (0..sections).map(|_| dom.add(MemoryDom::BODY, "section", &["section"])).collect();
    let reveal = RevealAnimator::new(PageConfig::default().reveal_watch());
    (reveal, dom, MemoryObserver::new(), ids)
}

#[test]
fn init_hides_and_observes_every_section() {
    let (reveal, mut dom, mut observer, ids) = setup(3);
    assert_eq!(reveal.init(&mut dom, &mut observer), 3);
    for id in &ids {
        assert!(dom.has_class(*id, "fade-out"));
        assert!(observer.is_observed(Watch::Reveal, *id));
    }
    let options = observer.options(Watch::Reveal).unwrap();
    assert_eq!(options.root_margin, "0px 0px -50px 0px");
}

#[test]
fn first_entry_fades_in_and_unobserves() {
    let (reveal, mut dom, mut observer, ids) = setup(2);
    reveal.init(&mut dom, &mut observer);

    reveal.on_entry(&mut dom, &mut observer, IntersectionEntry { target: ids[0], entered: true });
    assert!(dom.has_class(ids[0], "fade-in"));
    assert!(!observer.is_observed(Watch::Reveal, ids[0]));
    assert!(!dom.has_class(ids[1], "fade-in"));
    assert!(observer.is_observed(Watch::Reveal, ids[1]));
}

#[test]
fn leaving_the_viewport_never_reverts_the_reveal() {
    let (reveal, mut dom, mut observer, ids) = setup(1);
    reveal.init(&mut dom, &mut observer);
    reveal.on_entry(&mut dom, &mut observer, IntersectionEntry { target: ids[0], entered: true });
    let after_reveal = dom.classes(ids[0]).join(" ");

    reveal.on_entry(&mut dom, &mut observer, IntersectionEntry { target: ids[0], entered: false });
    reveal.on_entry(&mut dom, &mut observer, IntersectionEntry { target: ids[0], entered: true });
    assert_eq!(dom.classes(ids[0]).join(" "), after_reveal);
    assert_eq!(after_reveal, "section fade-out fade-in");
}

#[test]
fn non_intersecting_entry_is_ignored() {
    let (reveal, mut dom, mut observer, ids) = setup(1);
    reveal.init(&mut dom, &mut observer);
    reveal.on_entry(&mut dom, &mut observer, IntersectionEntry { target: ids[0], entered: false });
    assert!(!dom.has_class(ids[0], "fade-in"));
    assert!(observer.is_observed(Watch::Reveal, ids[0]));
}

#[test]
fn sections_stay_visible_when_the_observer_refuses() {
    let (reveal, mut dom, _, ids) = setup(2);
    let mut observer = MemoryObserver::unavailable();
    assert_eq!(reveal.init(&mut dom, &mut observer), 0);
    for id in &ids {
        assert!(!dom.has_class(*id, "fade-out"));
    }
    assert!(observer.observed(Watch::Reveal).is_empty());
}
