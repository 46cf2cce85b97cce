//! Fluent builder for constructing a [`Sim`].

use th_core::{NodeId, Position, SimConfig, SimRng};
use th_graph::{Graph, Router};
use th_schedule::TimerQueue;
use th_train::{Train, TrainParams, TrainStore};

use crate::{EdgeOccupancy, ResourceLedger, Sim, SimError, SimResult};

// ── Spawn descriptions ────────────────────────────────────────────────────────

/// Where a train starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpawnPoint {
    /// A specific node.
    Node(NodeId),
    /// The node closest to a position.
    Near(Position),
    /// A uniformly chosen node, drawn from the seeded spawn RNG.
    Random,
}

/// One train to place at build time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrainSpawn {
    pub at:           SpawnPoint,
    pub params:       TrainParams,
    pub has_resource: bool,
}

impl TrainSpawn {
    pub fn at_node(node: NodeId, params: TrainParams) -> Self {
        Self { at: SpawnPoint::Node(node), params, has_resource: false }
    }

    pub fn random(params: TrainParams) -> Self {
        Self { at: SpawnPoint::Random, params, has_resource: false }
    }

    /// Start carrying a load.
    pub fn loaded(mut self) -> Self {
        self.has_resource = true;
        self
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick duration, time scale, total ticks, seed, …
/// - [`Graph`]: from [`th_graph::GraphBuilder`] or the CSV loader
/// - `R: Router`: the routing tables (e.g. [`th_graph::FloydWarshallRouter`])
///
/// Trains are added with [`train`](Self::train), [`trains`](Self::trains) or
/// [`spawn_random`](Self::spawn_random) and receive ids in the order added.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph, FloydWarshallRouter::new())
///     .train(TrainSpawn::at_node(base, TrainParams::new(80.0, 10.0)))
///     .spawn_random(2, |_| TrainParams::default())
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router> {
    config: SimConfig,
    graph:  Graph,
    router: R,
    spawns: Vec<TrainSpawn>,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, graph: Graph, router: R) -> Self {
        Self { config, graph, router, spawns: Vec::new() }
    }

    pub fn train(mut self, spawn: TrainSpawn) -> Self {
        self.spawns.push(spawn);
        self
    }

    pub fn trains(mut self, spawns: impl IntoIterator<Item = TrainSpawn>) -> Self {
        self.spawns.extend(spawns);
        self
    }

    /// Add `count` trains on random nodes; `params_for(i)` supplies the
    /// parameters of the `i`-th of them.
    pub fn spawn_random(mut self, count: usize, mut params_for: impl FnMut(usize) -> TrainParams) -> Self {
        self.spawns.extend((0..count).map(|i| TrainSpawn::random(params_for(i))));
        self
    }

    /// Validate inputs, build the routing tables, place every train and let
    /// each one make its first decision.
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;
        if !self.spawns.is_empty() && self.graph.is_empty() {
            return Err(SimError::EmptyGraph);
        }

        let mut graph = self.graph;
        // Accept the connection lists as given so the first tick does not
        // report them as changes.
        let nodes: Vec<NodeId> = graph.node_ids().collect();
        for node in nodes {
            graph.detect_change(node);
        }

        let mut router = self.router;
        router.rebuild(&graph);

        // ── Place trains ──────────────────────────────────────────────────
        let mut rng = SimRng::new(self.config.seed);
        let mut trains = TrainStore::new();
        for spawn in &self.spawns {
            spawn.params.validate()?;
            let node = resolve_spawn(&graph, spawn.at, &mut rng)?;
            let position = graph.position(node).ok_or(SimError::UnknownSpawnNode(node))?;
            trains.push(
                Train::new(trains.next_id(), spawn.params, node, position).with_resource(spawn.has_resource),
            );
        }

        let mut sim = Sim {
            clock: self.config.make_clock(),
            config: self.config,
            graph,
            router,
            trains,
            timers: TimerQueue::new(),
            occupancy: EdgeOccupancy::new(),
            ledger: ResourceLedger::new(),
        };

        let ids: Vec<_> = sim.trains.ids().collect();
        for agent in ids {
            sim.decide_next_action(agent);
        }
        Ok(sim)
    }
}

fn resolve_spawn(graph: &Graph, at: SpawnPoint, rng: &mut SimRng) -> SimResult<NodeId> {
    match at {
        SpawnPoint::Node(node) if graph.contains(node) => Ok(node),
        SpawnPoint::Node(node) => Err(SimError::UnknownSpawnNode(node)),
        SpawnPoint::Near(pos) => graph.snap_to_node(pos).ok_or(SimError::EmptyGraph),
        SpawnPoint::Random => {
            let i = rng.gen_index(graph.node_count()).ok_or(SimError::EmptyGraph)?;
            NodeId::try_from(i).map_err(|e| SimError::Config(e.to_string()))
        }
    }
}
