//! Click ripple overlays for buttons and cards.
//!
//! The overlay is a `span.ripple` sized to the target's larger side and
//! centred on the click point. Its expand/fade animation and eventual removal
//! belong to CSS; this module only spawns it and keeps at most one per target.
//!
//! Positioning assumes the clicked element is its own offset parent. Inside a
//! transformed ancestor the ripple can land in the wrong place.

#[cfg(test)]
#[path = "ripple_test.rs"]
mod ripple_test;

use crate::consts;
use crate::dom::{Dom, ElementId, Selector};

/// Pointer position of a click, in viewport CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClickPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Size and placement of a ripple relative to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    #[must_use]
    pub fn compute(click: ClickPoint, offset: (f64, f64), size: (f64, f64)) -> Self {
        let diameter = size.0.max(size.1);
        let radius = diameter / 2.0;
        Self { diameter, left: click.client_x - offset.0 - radius, top: click.client_y - offset.1 - radius }
    }
}

/// Elements that get a ripple on click.
#[must_use]
pub fn targets(dom: &mut impl Dom) -> Vec<ElementId> {
    let mut found = Vec::new();
    for class in [consts::CTA_BUTTON_CLASS, consts::PROJECT_CARD_CLASS, consts::CONTACT_CARD_CLASS] {
        for id in dom.query(&Selector::Class(class)) {
            if !found.contains(&id) {
                found.push(id);
            }
        }
    }
    found
}

/// Replace any ripple on `target` with a fresh one centred on `click`.
pub fn spawn(dom: &mut impl Dom, target: ElementId, click: ClickPoint) -> Option<ElementId> {
    let geometry = RippleGeometry::compute(click, dom.offset_position(target), dom.client_size(target));
    let ripple = dom.create("span")?;
    let diameter = format!("{}px", geometry.diameter);
    dom.set_style(ripple, "width", &diameter);
    dom.set_style(ripple, "height", &diameter);
    dom.set_style(ripple, "left", &format!("{}px", geometry.left));
    dom.set_style(ripple, "top", &format!("{}px", geometry.top));
    dom.add_class(ripple, consts::RIPPLE_CLASS);

    for existing in dom.children_with_class(target, consts::RIPPLE_CLASS) {
        dom.remove(existing);
    }
    dom.append(target, ripple);
    Some(ripple)
}
