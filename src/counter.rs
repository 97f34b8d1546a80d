//! Counting animation for `.stat-number` elements.
//!
//! Each stat holds a literal such as `42+` or `3.50`. The first time it is at
//! least half visible its text restarts at `0` and counts up to the literal
//! over a fixed duration, then snaps to the exact original text. A `counted`
//! marker keeps a later re-entry from restarting it.

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

use std::collections::HashMap;

use crate::consts;
use crate::dom::{Dom, ElementId, Selector};
use crate::observer::{IntersectionEntry, Observer, Watch, WatchOptions};
use crate::scheduler::{Scheduler, Task, TimerId};

/// Integer targets take this many steps (rounded up per step).
const INTEGER_STEPS: f64 = 30.0;
/// Decimal targets take exactly this many steps.
const DECIMAL_STEPS: f64 = 50.0;

/// Parsed animation plan for one stat literal.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterPlan {
    /// Trimmed original text, restored verbatim at the end.
    pub literal: String,
    pub target: f64,
    pub decimal: bool,
    pub plus_suffix: bool,
    pub increment: f64,
    pub interval_ms: u32,
}

/// Result of one animation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still counting; show this text.
    Show(String),
    /// Target reached; show the original literal and stop.
    Finish(String),
}

impl CounterPlan {
    /// Plan the animation for `text` over `duration_ms`.
    ///
    /// Returns `None` when the text has no leading number or the number is not
    /// positive; such stats are left as they are.
    #[must_use]
    pub fn parse(text: &str, duration_ms: u32) -> Option<Self> {
        let literal = text.trim();
        let target = leading_number(literal)?;
        if !target.is_finite() || target <= 0.0 {
            return None;
        }
        let decimal = literal.contains('.');
        let increment = if decimal { target / DECIMAL_STEPS } else { (target / INTEGER_STEPS).ceil() };
        let steps = target / increment;
        let interval = (f64::from(duration_ms) / steps).round().max(1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let interval_ms = interval.min(f64::from(u32::MAX)) as u32;

        Some(Self {
            literal: literal.to_owned(),
            target,
            decimal,
            plus_suffix: literal.contains('+'),
            increment,
            interval_ms,
        })
    }

    /// Text shown for a running total below the target.
    #[must_use]
    pub fn display(&self, current: f64) -> String {
        if self.decimal {
            format!("{current:.2}")
        } else {
            let suffix = if self.plus_suffix { "+" } else { "" };
            format!("{}{suffix}", current.floor())
        }
    }

    /// Advance `current` by one increment.
    pub fn step(&self, current: &mut f64) -> Step {
        *current += self.increment;
        if *current >= self.target {
            Step::Finish(self.literal.clone())
        } else {
            Step::Show(self.display(*current))
        }
    }
}

/// Leading decimal literal of `text` (`"42+"` → 42, `"3.50"` → 3.5).
fn leading_number(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '0'..='9' => end = index + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    if end == 0 {
        return None;
    }
    match text[..end].parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

#[derive(Clone, Debug)]
struct Run {
    plan: CounterPlan,
    current: f64,
}

/// Watches stats and drives their animations.
#[derive(Clone, Debug)]
pub struct StatCounter {
    options: WatchOptions,
    duration_ms: u32,
    runs: HashMap<ElementId, Run>,
}

impl StatCounter {
    #[must_use]
    pub fn new(options: WatchOptions, duration_ms: u32) -> Self {
        Self { options, duration_ms, runs: HashMap::new() }
    }

    /// Start watching every stat. Returns how many are watched.
    pub fn init(&self, dom: &mut impl Dom, observer: &mut impl Observer) -> usize {
        dom.query(&Selector::Class(consts::STAT_NUMBER_CLASS))
            .into_iter()
            .filter(|&stat| observer.observe(Watch::StatCounter, &self.options, stat))
            .count()
    }

    #[cfg(test)]
    pub(crate) fn is_running(&self, stat: ElementId) -> bool {
        self.runs.contains_key(&stat)
    }

    pub fn on_entry(&mut self, dom: &mut impl Dom, timers: &mut impl Scheduler, entry: IntersectionEntry) {
        if entry.entered && !dom.has_class(entry.target, consts::COUNTED_CLASS) {
            self.start(dom, timers, entry.target);
            dom.add_class(entry.target, consts::COUNTED_CLASS);
        }
    }

    fn start(&mut self, dom: &mut impl Dom, timers: &mut impl Scheduler, stat: ElementId) {
        let Some(plan) = CounterPlan::parse(&dom.text(stat), self.duration_ms) else {
            log::debug!("counter: {stat:?} has no positive leading number");
            return;
        };
        dom.set_text(stat, "0");
        timers.every(plan.interval_ms, Task::CounterTick(stat));
        self.runs.insert(stat, Run { plan, current: 0.0 });
    }

    /// One interval tick for `stat`; clears `timer` once the target is reached.
    pub fn tick(&mut self, dom: &mut impl Dom, timers: &mut impl Scheduler, timer: TimerId, stat: ElementId) {
        let Some(run) = self.runs.get_mut(&stat) else {
            timers.clear(timer);
            return;
        };
        match run.plan.step(&mut run.current) {
            Step::Show(text) => dom.set_text(stat, &text),
            Step::Finish(text) => {
                dom.set_text(stat, &text);
                timers.clear(timer);
                self.runs.remove(&stat);
            }
        }
    }
}
