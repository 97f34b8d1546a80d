//! Floating scroll-to-top control.

#[cfg(test)]
#[path = "scroll_top_test.rs"]
mod scroll_top_test;

use crate::consts;
use crate::dom::{Dom, ElementId, Selector};

/// Whether the control shows at vertical scroll `offset`. Strictly greater
/// than the threshold; no hysteresis.
#[must_use]
pub fn is_visible(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

#[derive(Clone, Debug)]
pub struct ScrollTopControl {
    threshold: f64,
    button: Option<ElementId>,
}

impl ScrollTopControl {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold, button: None }
    }

    #[cfg(test)]
    pub(crate) fn button(&self) -> Option<ElementId> {
        self.button
    }

    /// Create the hidden control (or adopt an existing `#scroll-to-top`).
    pub fn init(&mut self, dom: &mut impl Dom) -> Option<ElementId> {
        let button = match dom.query_first(&Selector::Id(consts::SCROLL_TOP_ID)) {
            Some(existing) => existing,
            None => {
                let body = dom.body()?;
                let created = dom.create("button")?;
                dom.set_attribute(created, "id", consts::SCROLL_TOP_ID);
                dom.add_class(created, consts::SCROLL_TOP_CLASS);
                dom.set_text(created, consts::SCROLL_TOP_ICON);
                dom.append(body, created);
                created
            }
        };
        dom.set_attribute(button, "aria-label", consts::SCROLL_TOP_LABEL);
        dom.remove_class(button, consts::VISIBLE_CLASS);
        self.button = Some(button);
        Some(button)
    }

    pub fn on_scroll(&self, dom: &mut impl Dom, offset: f64) {
        let Some(button) = self.button else {
            return;
        };
        if is_visible(offset, self.threshold) {
            dom.add_class(button, consts::VISIBLE_CLASS);
        } else {
            dom.remove_class(button, consts::VISIBLE_CLASS);
        }
    }

    pub fn on_click(&self, dom: &mut impl Dom) {
        dom.scroll_to_top();
    }
}
