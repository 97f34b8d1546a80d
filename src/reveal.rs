//! Reveal-on-scroll for `.section` elements.
//!
//! Sections start with `fade-out` and gain `fade-in` the first time they
//! intersect the (bottom-inset) viewport, after which they are unobserved.
//! The transition never reverses. A section the observer refuses is left
//! visible.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::consts;
use crate::dom::{Dom, Selector};
use crate::observer::{IntersectionEntry, Observer, Watch, WatchOptions};

#[derive(Clone, Debug)]
pub struct RevealAnimator {
    options: WatchOptions,
}

impl RevealAnimator {
    #[must_use]
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    /// Watch every section and hide the ones being watched. Returns how many
    /// were hidden.
    pub fn init(&self, dom: &mut impl Dom, observer: &mut impl Observer) -> usize {
        let mut hidden = 0;
        for section in dom.query(&Selector::Class(consts::SECTION_CLASS)) {
            if observer.observe(Watch::Reveal, &self.options, section) {
                dom.add_class(section, consts::FADE_OUT_CLASS);
                hidden += 1;
            }
        }
        hidden
    }

    pub fn on_entry(&self, dom: &mut impl Dom, observer: &mut impl Observer, entry: IntersectionEntry) {
        if !entry.entered {
            return;
        }
        if !dom.has_class(entry.target, consts::FADE_IN_CLASS) {
            dom.add_class(entry.target, consts::FADE_IN_CLASS);
        }
        observer.unobserve(Watch::Reveal, entry.target);
    }
}
