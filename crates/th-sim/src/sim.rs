//! The `Sim` struct and its tick loop.

use tracing::debug;

use th_core::{AgentId, NodeId, NodeKind, SimClock, SimConfig, SimTime, Tick};
use th_graph::{Graph, Router};
use th_schedule::TimerQueue;
use th_train::{decide, Action, Train, TrainStore};

use crate::{EdgeOccupancy, ResourceLedger, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation coordinator.
///
/// `Sim<R>` exclusively owns the graph, the routing tables, the trains, the
/// mining timers, the occupancy registry and the ledger.  Every mutation
/// happens on the caller's thread inside [`step`](Self::step) or one of the
/// explicit entry points below.  Each tick:
///
/// 1. **Changes**: poll every node's connection list in id order; a change
///    rebuilds the routing tables, re-projects trains whose edge changed
///    length and re-runs the decision for idle trains.
/// 2. **Timers**: fire every mining timer due at or before `now`; the train
///    picks up its load and decides again.  Timers scheduled later in the
///    tick fire on the next one.
/// 3. **Movement**: advance travelling trains in id order.  Arrivals leave
///    their edge and decide again, starting any new leg at `now`.
/// 4. **Flush**: report a changed ledger total, end-of-tick and snapshot
///    hooks, then advance the clock.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    /// Run configuration.  `time_scale` mirrors the clock.
    pub config: SimConfig,

    pub(crate) clock:     SimClock,
    pub(crate) graph:     Graph,
    pub(crate) router:    R,
    pub(crate) trains:    TrainStore,
    pub(crate) timers:    TimerQueue,
    pub(crate) occupancy: EdgeOccupancy,
    pub(crate) ledger:    ResourceLedger,
}

impl<R: Router> Sim<R> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick, self.ledger.total());
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let tick = self.clock.current_tick;
        let now = self.clock.now;
        observer.on_tick_start(tick);

        // ── Changes ───────────────────────────────────────────────────────
        let nodes: Vec<NodeId> = self.graph.node_ids().collect();
        for node in nodes {
            if self.graph.detect_change(node) {
                self.on_graph_changed(node);
                observer.on_graph_changed(tick, node);
            }
        }

        // ── Timers ────────────────────────────────────────────────────────
        for (due, agent) in self.timers.drain_due(now) {
            if let Some(train) = self.trains.get_mut(agent) {
                train.finish_mining();
                debug!(train = %agent, %due, "mining finished");
            }
            self.decide_next_action(agent);
        }

        // ── Movement ──────────────────────────────────────────────────────
        let ids: Vec<AgentId> = self.trains.ids().collect();
        for agent in ids {
            let Some(train) = self.trains.get_mut(agent) else { continue };
            if let Some(arrival) = train.advance(now) {
                self.occupancy.leave(agent, arrival.from, arrival.to);
                debug!(train = %agent, node = %arrival.to, %now, "arrived");
                self.decide_next_action(agent);
            }
        }

        // ── Flush ─────────────────────────────────────────────────────────
        if let Some(total) = self.ledger.take_changed() {
            observer.on_resources_changed(tick, total);
        }
        observer.on_tick_end(tick, self.trains.travelling_count());
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && tick.0.is_multiple_of(interval) {
            observer.on_snapshot(tick, &self.trains);
        }

        self.clock.advance();
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// Distances changed at `node`: rebuild the routing tables, re-time
    /// every train on one of `node`'s outgoing edges whose length changed,
    /// then let idle trains reconsider.
    ///
    /// [`step`](Self::step) calls this for each change it detects; call it
    /// directly to apply an edit within the current tick.
    pub fn on_graph_changed(&mut self, node: NodeId) {
        self.router.rebuild(&self.graph);
        debug!(%node, "distances changed");

        let now = self.clock.now;
        for train in self.trains.iter_mut() {
            if train.current_node() == node && train.edge_changed(&self.graph) {
                train.update_journey(&self.graph, now);
                debug!(train = %train.id(), %node, "journey re-projected");
            }
        }
        self.redecide_idle();
    }

    /// Toggle whether `node` answers nearest-of-kind queries, then let idle
    /// trains reconsider.
    pub fn set_node_active(&mut self, node: NodeId, active: bool) -> SimResult<()> {
        self.graph.set_active(node, active)?;
        debug!(%node, active, "node activity changed");
        self.redecide_idle();
        Ok(())
    }

    /// Change the simulation speed.  Times already scheduled are unaffected.
    pub fn set_time_scale(&mut self, time_scale: f64) -> SimResult<()> {
        if !(time_scale.is_finite() && time_scale >= 0.0) {
            return Err(SimError::Config(format!(
                "time_scale must be non-negative, got {time_scale}"
            )));
        }
        self.clock.set_time_scale(time_scale);
        self.config.time_scale = time_scale;
        Ok(())
    }

    /// Add `round(amount)` to the ledger and return the amount added.
    pub fn credit_resource(&mut self, amount: f64) -> i64 {
        self.ledger.credit(amount)
    }

    /// Run the decision function for `agent` until it settles.
    ///
    /// Travelling trains are left alone.  Delivering leaves the train idle
    /// at the same base, so a delivery is followed by another decision.
    pub fn decide_next_action(&mut self, agent: AgentId) {
        let now = self.clock.now;
        loop {
            let Some(train) = self.trains.get(agent) else { return };
            if train.is_travelling() {
                return;
            }
            match decide(train, &self.graph, &self.router) {
                Action::Wait => return,
                Action::Deliver { amount } => {
                    let added = self.ledger.credit(amount);
                    if let Some(train) = self.trains.get_mut(agent) {
                        train.deliver();
                    }
                    debug!(train = %agent, added, total = self.ledger.total(), "delivered");
                }
                Action::Mine { duration } => {
                    if let Some(train) = self.trains.get_mut(agent) {
                        let due = train.start_mining(duration, now);
                        self.timers.push(due, agent);
                        debug!(train = %agent, %due, "mining started");
                    }
                    return;
                }
                Action::TravelTo { next, goal } => {
                    if let Some(train) = self.trains.get_mut(agent) {
                        let from = train.current_node();
                        if let Some(previous) = train.start_moving(next, &self.graph, now) {
                            self.occupancy.leave(agent, previous.from, previous.to);
                        }
                        self.occupancy.enter(agent, from, next);
                        debug!(train = %agent, %from, %next, %goal, "departed");
                    }
                    return;
                }
                Action::Stall { wanted } => {
                    debug!(train = %agent, node = %train.current_node(), wanted = %wanted, "stalled");
                    return;
                }
            }
        }
    }

    fn redecide_idle(&mut self) {
        let idle: Vec<AgentId> = self.trains.iter().filter(|t| t.is_idle()).map(Train::id).collect();
        for agent in idle {
            self.decide_next_action(agent);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn query_nearest_of_kind(&self, from: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.router.nearest_of_kind(&self.graph, from, kind)
    }

    pub fn query_next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        self.router.next_hop(from, to)
    }

    pub fn query_distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.router.distance(from, to)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable graph access for runtime edits.  Distance edits are picked up
    /// by the next tick's change poll.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn trains(&self) -> &TrainStore {
        &self.trains
    }

    pub fn train(&self, agent: AgentId) -> Option<&Train> {
        self.trains.get(agent)
    }

    pub fn occupancy(&self) -> &EdgeOccupancy {
        &self.occupancy
    }

    pub fn ledger_total(&self) -> i64 {
        self.ledger.total()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn now(&self) -> SimTime {
        self.clock.now
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Mining timers not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
