#![allow(clippy::float_cmp)]

use super::*;
use crate::dom::MemoryDom;

fn click(x: f64, y: f64) -> ClickPoint {
    ClickPoint { client_x: x, client_y: y }
}

fn button(dom: &mut MemoryDom) -> ElementId {
    let id = dom.add(MemoryDom::BODY, "a", &["cta-button"]);
    dom.set_geometry(id, (200.0, 50.0), (100.0, 300.0));
    id
}

#[test]
fn geometry_centres_on_the_click_point() {
    let geometry = RippleGeometry::compute(click(150.0, 320.0), (100.0, 300.0), (200.0, 50.0));
    assert_eq!(geometry, RippleGeometry { diameter: 200.0, left: -50.0, top: -80.0 });
}

#[test]
fn geometry_uses_the_larger_side() {
    let geometry = RippleGeometry::compute(click(0.0, 0.0), (0.0, 0.0), (40.0, 90.0));
    assert_eq!(geometry.diameter, 90.0);
}

#[test]
fn spawn_appends_a_styled_ripple() {
    let mut dom = MemoryDom::new();
    let target = button(&mut dom);
    let ripple = spawn(&mut dom, target, click(150.0, 320.0)).unwrap();

    assert_eq!(dom.children(target), &[ripple]);
    assert_eq!(dom.tag(ripple), Some("span"));
    assert!(dom.has_class(ripple, "ripple"));
    assert_eq!(dom.style(ripple, "width"), Some("200px"));
    assert_eq!(dom.style(ripple, "height"), Some("200px"));
    assert_eq!(dom.style(ripple, "left"), Some("-50px"));
    assert_eq!(dom.style(ripple, "top"), Some("-80px"));
}

#[test]
fn repeated_clicks_keep_a_single_ripple() {
    let mut dom = MemoryDom::new();
    let target = button(&mut dom);
    let label = dom.add(target, "span", &["label"]);

    spawn(&mut dom, target, click(110.0, 310.0));
    let second = spawn(&mut dom, target, click(120.0, 320.0)).unwrap();

    assert_eq!(dom.children_with_class(target, "ripple"), vec![second]);
    assert_eq!(dom.children(target), &[label, second]);
}

#[test]
fn targets_cover_buttons_and_cards_once_each() {
    let mut dom = MemoryDom::new();
    let cta = dom.add(MemoryDom::BODY, "a", &["cta-button"]);
    let project = dom.add(MemoryDom::BODY, "div", &["project-card"]);
    let contact = dom.add(MemoryDom::BODY, "a", &["contact-card", "project-card"]);
    dom.add(MemoryDom::BODY, "div", &["section"]);
    assert_eq!(targets(&mut dom), vec![cta, project, contact]);
}

#[test]
fn repeated_clicks_do_not_grow_live_handles() {
    let mut dom = MemoryDom::new();
    let target = button(&mut dom);
    spawn(&mut dom, target, click(110.0, 310.0));
    let settled = dom.live_handles();

    for step in 0..50 {
        spawn(&mut dom, target, click(110.0 + f64::from(step), 310.0));
    }
    assert_eq!(dom.live_handles(), settled);
    assert_eq!(dom.children_with_class(target, "ripple").len(), 1);
}
