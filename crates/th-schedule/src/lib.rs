//! `th-schedule`: deferred events for the train_harvest tick loop.
//!
//! | Module           | Contents                                           |
//! |------------------|----------------------------------------------------|
//! | [`timer_queue`]  | `TimerQueue` (`BTreeMap<SimTime, Vec<AgentId>>`)   |
//!
//! Mining completion is the only deferred operation in the simulation.  It
//! is modeled as an explicit one-shot timer rather than a callback: the
//! coordinator pushes `(due, agent)` when mining starts and drains due
//! timers once per tick.

pub mod timer_queue;

#[cfg(test)]
mod tests;

pub use timer_queue::TimerQueue;
