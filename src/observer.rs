//! Viewport-intersection capability.
//!
//! The page registers elements under a [`Watch`]; the host reports
//! visibility changes back as [`IntersectionEntry`] batches through
//! [`crate::page::Page::on_intersection`].

use std::collections::{BTreeSet, HashMap};

use crate::dom::ElementId;

/// Which feature an observation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Watch {
    Reveal,
    StatCounter,
}

/// Intersection thresholds for one [`Watch`].
#[derive(Clone, Debug, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// CSS margin applied to the viewport before testing intersection.
    pub root_margin: String,
}

impl WatchOptions {
    pub const NO_MARGIN: &'static str = "0px";
}

/// One visibility change reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// `true` when the element now intersects under the watch's threshold.
    pub entered: bool,
}

pub trait Observer {
    /// Start reporting `target` under `watch`.
    ///
    /// Returns `false` when the watch could not be set up (for example the
    /// host rejected `options`); the target will then never be reported.
    fn observe(&mut self, watch: Watch, options: &WatchOptions, target: ElementId) -> bool;
    fn unobserve(&mut self, watch: Watch, target: ElementId);
}

/// Records observations without a renderer; entries are fed by hand.
#[derive(Clone, Debug, Default)]
pub struct MemoryObserver {
    watches: HashMap<Watch, (WatchOptions, BTreeSet<ElementId>)>,
    unavailable: bool,
}

impl MemoryObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer whose every `observe` call fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    #[must_use]
    pub fn is_observed(&self, watch: Watch, target: ElementId) -> bool {
        self.watches.get(&watch).is_some_and(|(_, targets)| targets.contains(&target))
    }

    /// Elements currently observed under `watch`.
    #[must_use]
    pub fn observed(&self, watch: Watch) -> Vec<ElementId> {
        self.watches.get(&watch).map_or_else(Vec::new, |(_, targets)| targets.iter().copied().collect())
    }

    /// Options the watch was first registered with.
    #[must_use]
    pub fn options(&self, watch: Watch) -> Option<&WatchOptions> {
        self.watches.get(&watch).map(|(options, _)| options)
    }
}

impl Observer for MemoryObserver {
    fn observe(&mut self, watch: Watch, options: &WatchOptions, target: ElementId) -> bool {
        if self.unavailable {
            return false;
        }
        self.watches
            .entry(watch)
            .or_insert_with(|| (options.clone(), BTreeSet::new()))
            .1
            .insert(target);
        true
    }

    fn unobserve(&mut self, watch: Watch, target: ElementId) {
        if let Some((_, targets)) = self.watches.get_mut(&watch) {
            targets.remove(&target);
        }
    }
}
