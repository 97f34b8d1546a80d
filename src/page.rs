//! The page-interaction layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`Page`] owns the four capabilities (element tree, preference store,
//! timers, intersection observer) and one instance of every feature module.
//! The host calls [`Page::init`] once when the document is ready, attaches a
//! click listener to every element it returns, and then forwards browser
//! events: clicks, scroll offsets, intersection batches, OS color-scheme
//! changes and fired timers. Feature modules never talk to each other.
//!
//! Separated from the browser binding so every behaviour can be exercised
//! against [`crate::dom::MemoryDom`] and friends.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::collections::BTreeMap;

use crate::config::PageConfig;
use crate::contact::ContactFeedback;
use crate::counter::StatCounter;
use crate::dom::{Dom, ElementId};
use crate::observer::{IntersectionEntry, Observer, Watch};
use crate::reveal::RevealAnimator;
use crate::ripple::{self, ClickPoint};
use crate::scheduler::{ManualScheduler, Scheduler, Task, TimerId};
use crate::scroll_top::ScrollTopControl;
use crate::smooth_scroll;
use crate::store::KeyValueStore;
use crate::theme::{Theme, ThemeController};
use crate::typing::TypingEffect;

/// Click behaviour bound to an element. An element may carry several.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listener {
    ThemeToggle,
    SmoothScroll,
    ContactCard,
    Ripple,
    ScrollTop,
}

/// What the host must do with the native click event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub prevent_default: bool,
}

pub struct Page<D, S, T, O> {
    pub dom: D,
    pub store: S,
    pub timers: T,
    pub observer: O,
    config: PageConfig,
    theme: ThemeController,
    reveal: RevealAnimator,
    counter: StatCounter,
    contact: ContactFeedback,
    scroll_top: ScrollTopControl,
    typing: TypingEffect,
    listeners: BTreeMap<ElementId, Vec<Listener>>,
    initialized: bool,
}

impl<D: Dom, S: KeyValueStore, T: Scheduler, O: Observer> Page<D, S, T, O> {
    #[must_use]
    pub fn new(dom: D, store: S, timers: T, observer: O, config: PageConfig) -> Self {
        Self {
            theme: ThemeController::new(&config),
            reveal: RevealAnimator::new(config.reveal_watch()),
            counter: StatCounter::new(config.counter_watch(), config.counter_duration_ms),
            contact: ContactFeedback::new(config.click_feedback_ms),
            scroll_top: ScrollTopControl::new(config.scroll_top_threshold),
            typing: TypingEffect::new(config.typing_delay_ms, config.typing_speed_ms),
            listeners: BTreeMap::new(),
            initialized: false,
            config,
            dom,
            store,
            timers,
            observer,
        }
    }

    /// Wire every feature to the current document.
    ///
    /// Returns the elements that need a click listener, in element order.
    /// Later calls are no-ops and return nothing.
    pub fn init(&mut self) -> Vec<ElementId> {
        if self.initialized {
            log::debug!("page: already initialized");
            return Vec::new();
        }
        self.initialized = true;

        if let Some(toggle) = self.theme.init(&mut self.dom, &self.store) {
            self.bind(toggle, Listener::ThemeToggle);
        }
        for link in smooth_scroll::links(&mut self.dom) {
            self.bind(link, Listener::SmoothScroll);
        }
        let sections = self.reveal.init(&mut self.dom, &mut self.observer);
        for card in ContactFeedback::cards(&mut self.dom) {
            self.bind(card, Listener::ContactCard);
        }
        let stats = self.counter.init(&mut self.dom, &mut self.observer);
        for target in ripple::targets(&mut self.dom) {
            self.bind(target, Listener::Ripple);
        }
        if let Some(button) = self.scroll_top.init(&mut self.dom) {
            self.bind(button, Listener::ScrollTop);
        }
        if self.config.typing_effect {
            self.typing.init(&mut self.dom, &mut self.timers);
        }

        log::info!(
            "portfolio initialized: {} click targets, {sections} sections, {stats} stats",
            self.listeners.len()
        );
        self.listeners.keys().copied().collect()
    }

    /// Listeners bound to `element`, in binding order.
    #[must_use]
    pub fn listeners(&self, element: ElementId) -> &[Listener] {
        self.listeners.get(&element).map(Vec::as_slice).unwrap_or_default()
    }

    fn bind(&mut self, element: ElementId, listener: Listener) {
        let bound = self.listeners.entry(element).or_default();
        if !bound.contains(&listener) {
            bound.push(listener);
        }
    }

    pub fn on_click(&mut self, target: ElementId, click: ClickPoint) -> ClickOutcome {
        let mut outcome = ClickOutcome::default();
        let Some(bound) = self.listeners.get(&target).cloned() else {
            return outcome;
        };
        for listener in bound {
            match listener {
                Listener::ThemeToggle => {
                    self.theme.toggle(&mut self.dom, &mut self.store, &mut self.timers);
                }
                Listener::SmoothScroll => {
                    outcome.prevent_default |= smooth_scroll::on_click(&mut self.dom, target);
                }
                Listener::ContactCard => self.contact.on_click(&mut self.dom, &mut self.timers, target),
                Listener::Ripple => {
                    ripple::spawn(&mut self.dom, target, click);
                }
                Listener::ScrollTop => self.scroll_top.on_click(&mut self.dom),
            }
        }
        outcome
    }

    /// Window scrolled to vertical `offset`.
    pub fn on_scroll(&mut self, offset: f64) {
        self.scroll_top.on_scroll(&mut self.dom, offset);
    }

    pub fn on_intersection(&mut self, watch: Watch, entries: impl IntoIterator<Item = IntersectionEntry>) {
        for entry in entries {
            match watch {
                Watch::Reveal => self.reveal.on_entry(&mut self.dom, &mut self.observer, entry),
                Watch::StatCounter => self.counter.on_entry(&mut self.dom, &mut self.timers, entry),
            }
        }
    }

    /// The OS `prefers-color-scheme: dark` result changed.
    pub fn on_system_scheme_change(&mut self, prefers_dark: bool) {
        self.theme.on_system_change(&mut self.dom, &self.store, prefers_dark);
    }

    /// A timer armed through [`Page::timers`] fired.
    pub fn run_task(&mut self, timer: TimerId, task: Task) {
        match task {
            Task::RemoveClass { target, class } => self.dom.remove_class(target, class),
            Task::CounterTick(stat) => self.counter.tick(&mut self.dom, &mut self.timers, timer, stat),
            Task::TypeNext(heading) => self.typing.type_next(&mut self.dom, &mut self.timers, heading),
        }
    }

    #[must_use]
    pub fn current_theme(&self) -> Theme {
        self.theme.current(&self.store)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme.set(&mut self.dom, &mut self.store, theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.dom, &mut self.store, &mut self.timers)
    }
}

impl<D: Dom, S: KeyValueStore, O: Observer> Page<D, S, ManualScheduler, O> {
    /// Advance the virtual clock by `ms`, running every timer that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now() + ms;
        while let Some((id, task)) = self.timers.pop_due(until) {
            self.run_task(id, task);
        }
        self.timers.set_now(until);
    }
}
