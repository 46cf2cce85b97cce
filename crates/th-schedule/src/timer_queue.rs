//! `TimerQueue`: one-shot timers keyed by absolute simulation time.
//!
//! A train that starts mining registers the time its mining completes.  Each
//! tick the simulation drains every timer whose due time is at or before the
//! clock, so a timer fires at the first tick whose time reaches it and never
//! earlier.  Timers cannot be cancelled.
//!
//! A timer pushed after the tick's drain, even one already due (a zero-length
//! mine reached on arrival), fires at the next tick's drain.
//!
//! `BTreeMap` keeps due times ordered; timers sharing a due time fire in the
//! order they were pushed.

use std::collections::BTreeMap;

use th_core::{AgentId, SimTime};

/// Ordered map `due time → trains whose timer expires then`.
#[derive(Default, Debug)]
pub struct TimerQueue {
    inner: BTreeMap<SimTime, Vec<AgentId>>,
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent`'s timer to fire at `due`.
    pub fn push(&mut self, due: SimTime, agent: AgentId) {
        self.inner.entry(due).or_default().push(agent);
        self.total += 1;
    }

    /// Remove and return every `(due, agent)` with `due <= now`, earliest
    /// first.
    pub fn drain_due(&mut self, now: SimTime) -> Vec<(SimTime, AgentId)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let (due, agents) = entry.remove_entry();
            self.total -= agents.len();
            fired.extend(agents.into_iter().map(|a| (due, a)));
        }
        fired
    }

    /// The earliest pending due time, or `None` if empty.
    pub fn next_due(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Total pending timers.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
