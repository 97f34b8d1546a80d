//! Typing effect for the hero heading.
//!
//! Off by default (`typing_effect` in the page config). When enabled, the
//! first `.hero h1` is emptied and retyped one character at a time after a
//! short delay.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use crate::consts;
use crate::dom::{Dom, ElementId, Selector};
use crate::scheduler::{Scheduler, Task};

#[derive(Clone, Debug)]
struct Run {
    target: ElementId,
    chars: Vec<char>,
    typed: String,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    delay_ms: u32,
    speed_ms: u32,
    run: Option<Run>,
}

impl TypingEffect {
    #[must_use]
    pub fn new(delay_ms: u32, speed_ms: u32) -> Self {
        Self { delay_ms, speed_ms, run: None }
    }

    /// Whether characters remain to be typed.
    #[cfg(test)]
    pub(crate) fn is_typing(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.typed.chars().count() < run.chars.len())
    }

    /// Empty the hero heading and schedule the first character.
    pub fn init(&mut self, dom: &mut impl Dom, timers: &mut impl Scheduler) -> Option<ElementId> {
        let selector = Selector::Descendant { ancestor_class: consts::HERO_CLASS, tag: consts::HERO_HEADING_TAG };
        let Some(heading) = dom.query_first(&selector) else {
            log::debug!("typing: no hero heading");
            return None;
        };
        let chars: Vec<char> = dom.text(heading).chars().collect();
        dom.set_text(heading, "");
        dom.set_style(heading, "opacity", "1");
        if !chars.is_empty() {
            timers.after(self.delay_ms, Task::TypeNext(heading));
        }
        self.run = Some(Run { target: heading, chars, typed: String::new() });
        Some(heading)
    }

    /// Type one character and schedule the next while any remain.
    pub fn type_next(&mut self, dom: &mut impl Dom, timers: &mut impl Scheduler, heading: ElementId) {
        let Some(run) = self.run.as_mut().filter(|run| run.target == heading) else {
            return;
        };
        let index = run.typed.chars().count();
        let Some(&next) = run.chars.get(index) else {
            return;
        };
        run.typed.push(next);
        dom.set_text(heading, &run.typed);
        if index + 1 < run.chars.len() {
            timers.after(self.speed_ms, Task::TypeNext(heading));
        }
    }
}
