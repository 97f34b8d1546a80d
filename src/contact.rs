//! Transient `clicked` feedback on contact cards.
//!
//! Every click re-arms its own removal timer; clicks are not coalesced, so an
//! earlier timer may clear the marker while a later animation is in flight.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use crate::consts;
use crate::dom::{Dom, ElementId, Selector};
use crate::scheduler::{Scheduler, Task};

#[derive(Clone, Copy, Debug)]
pub struct ContactFeedback {
    duration_ms: u32,
}

impl ContactFeedback {
    #[must_use]
    pub fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    /// Contact cards on the page.
    #[must_use]
    pub fn cards(dom: &mut impl Dom) -> Vec<ElementId> {
        dom.query(&Selector::Class(consts::CONTACT_CARD_CLASS))
    }

    pub fn on_click(&self, dom: &mut impl Dom, timers: &mut impl Scheduler, card: ElementId) {
        dom.add_class(card, consts::CLICKED_CLASS);
        timers.after(self.duration_ms, Task::RemoveClass { target: card, class: consts::CLICKED_CLASS });
    }
}
