//! Simulation observer trait for display and data collection.

use th_core::{NodeId, Tick};
use th_train::TrainStore;

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery printer
///
/// ```rust,ignore
/// struct Score;
///
/// impl SimObserver for Score {
///     fn on_resources_changed(&mut self, tick: Tick, total: i64) {
///         println!("{tick}: {total} delivered");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the routing tables were rebuilt for a change at `node`.
    fn on_graph_changed(&mut self, _tick: Tick, _node: NodeId) {}

    /// Called once per tick in which at least one delivery happened, with
    /// the new ledger total.
    fn on_resources_changed(&mut self, _tick: Tick, _total: i64) {}

    /// Called at the end of each tick.  `travelling` is the number of trains
    /// on an edge after movement.
    fn on_tick_end(&mut self, _tick: Tick, _travelling: usize) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to every train, for rendering or recording.
    fn on_snapshot(&mut self, _tick: Tick, _trains: &TrainStore) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick, _total: i64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
