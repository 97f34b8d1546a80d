//! Timer capability.
//!
//! Deferred work is described as a [`Task`] value rather than a closure, so
//! the page stays the single owner of all mutable state: when a timer fires,
//! its host hands the task back to [`crate::page::Page::run_task`].
//!
//! [`ManualScheduler`] keeps a virtual clock. Tests move it forward with
//! `Page::advance`, which runs every due task in firing order.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use crate::dom::ElementId;

/// Handle returned by [`Scheduler::after`] and [`Scheduler::every`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Deferred page work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Drop a transient marker class.
    RemoveClass { target: ElementId, class: &'static str },
    /// Advance the counting animation of a stat.
    CounterTick(ElementId),
    /// Type the next character of the hero heading.
    TypeNext(ElementId),
}

pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn after(&mut self, delay_ms: u32, task: Task) -> TimerId;
    /// Run `task` every `interval_ms` until cleared.
    fn every(&mut self, interval_ms: u32, task: Task) -> TimerId;
    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn clear(&mut self, id: TimerId);
}

#[derive(Clone, Debug)]
struct Pending {
    id: TimerId,
    due_ms: u64,
    repeat_ms: Option<u32>,
    task: Task,
}

/// Deterministic scheduler over a virtual millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Number of armed timers, intervals included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Intervals are re-armed before being returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, Task)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.id))
            .map(|(index, _)| index)?;

        let due = self.pending[index].due_ms;
        self.now_ms = self.now_ms.max(due);
        match self.pending[index].repeat_ms {
            Some(repeat) => {
                let entry = &mut self.pending[index];
                entry.due_ms = due + u64::from(repeat.max(1));
                Some((entry.id, entry.task.clone()))
            }
            None => {
                let entry = self.pending.remove(index);
                Some((entry.id, entry.task))
            }
        }
    }

    /// Move the clock forward without running anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn arm(&mut self, delay_ms: u32, repeat_ms: Option<u32>, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due_ms: self.now_ms + u64::from(delay_ms), repeat_ms, task });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay_ms: u32, task: Task) -> TimerId {
        self.arm(delay_ms, None, task)
    }

    fn every(&mut self, interval_ms: u32, task: Task) -> TimerId {
        let interval = interval_ms.max(1);
        self.arm(interval, Some(interval), task)
    }

    fn clear(&mut self, id: TimerId) {
        self.pending.retain(|p| p.id != id);
    }
}
