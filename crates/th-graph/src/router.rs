//! Routing trait and the default all-pairs implementation.
//!
//! # Pluggability
//!
//! `th-sim` talks to routing only through the [`Router`] trait, so a
//! different table builder (e.g. congestion-aware weights) can be swapped in
//! without touching the coordinator.  Trains never compute paths: they ask
//! for the nearest node of a kind and for the next hop toward it.
//!
//! # Floyd–Warshall
//!
//! [`FloydWarshallRouter`] keeps two dense `n × n` tables (row = source,
//! column = destination) and recomputes both from scratch on every
//! [`rebuild`](Router::rebuild).  Graphs are tens of nodes and weight
//! changes are rare relative to ticks, so O(n³) per change is acceptable.
//!
//! Relaxation uses a strict `<`: when several shortest paths tie, the one
//! discovered first (in node-id order of the intermediate `k`) is kept.  The
//! result is deterministic for a fixed node order and is relied on for
//! reproducible runs.

use tracing::debug;

use th_core::{NodeId, NodeKind};

use crate::graph::Graph;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Shortest-path oracle over a [`Graph`].
pub trait Router: Send + Sync {
    /// Recompute every table from the current adjacency of `graph`.
    fn rebuild(&mut self, graph: &Graph);

    /// Shortest distance `from → to`; `f64::INFINITY` if unreachable or
    /// either id is unknown.
    fn distance(&self, from: NodeId, to: NodeId) -> f64;

    /// The direct neighbor of `from` to move to next on a shortest path to
    /// `to`.  `None` when `from == to` or `to` is unreachable.
    fn next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId>;

    /// The active node of `kind` closest to `from`, first in id order on
    /// ties.  `None` if no such node is reachable.
    fn nearest_of_kind(&self, graph: &Graph, from: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut nearest = None;
        let mut best = f64::INFINITY;
        for node in graph.nodes() {
            if !node.active || node.kind != kind {
                continue;
            }
            let d = self.distance(from, node.id);
            if d < best {
                best = d;
                nearest = Some(node.id);
            }
        }
        nearest
    }
}

// ── FloydWarshallRouter ───────────────────────────────────────────────────────

/// All-pairs shortest distances and next hops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloydWarshallRouter {
    n:    usize,
    /// `dist[s * n + d]`.
    dist: Vec<f64>,
    /// `next[s * n + d]`; `NodeId::INVALID` for "none".
    next: Vec<NodeId>,
}

impl FloydWarshallRouter {
    /// A router with empty tables.  Every query answers "unreachable" until
    /// the first [`rebuild`](Router::rebuild).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tables for `graph` immediately.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut router = Self::new();
        router.rebuild(graph);
        router
    }

    /// Number of nodes covered by the current tables.
    pub fn node_count(&self) -> usize {
        self.n
    }

    #[inline]
    fn slot(&self, from: NodeId, to: NodeId) -> Option<usize> {
        let (s, d) = (from.index(), to.index());
        (s < self.n && d < self.n).then(|| s * self.n + d)
    }
}

impl Router for FloydWarshallRouter {
    fn rebuild(&mut self, graph: &Graph) {
        let n = graph.node_count();
        self.n = n;
        self.dist.clear();
        self.dist.resize(n * n, f64::INFINITY);
        self.next.clear();
        self.next.resize(n * n, NodeId::INVALID);

        // ── Direct edges ──────────────────────────────────────────────────
        for node in graph.nodes() {
            let s = node.id.index();
            self.dist[s * n + s] = 0.0;
            for (neighbor, d) in node.neighbors() {
                self.dist[s * n + neighbor.index()] = d;
                self.next[s * n + neighbor.index()] = neighbor;
            }
        }

        // ── Relax through every intermediate k ────────────────────────────
        for k in 0..n {
            for i in 0..n {
                let ik = self.dist[i * n + k];
                if ik == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let kj = self.dist[k * n + j];
                    if kj == f64::INFINITY {
                        continue;
                    }
                    if ik + kj < self.dist[i * n + j] {
                        self.dist[i * n + j] = ik + kj;
                        self.next[i * n + j] = self.next[i * n + k];
                    }
                }
            }
        }

        debug!(nodes = n, "routing tables rebuilt");
    }

    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.slot(from, to).map_or(f64::INFINITY, |i| self.dist[i])
    }

    fn next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        if from == to {
            return None;
        }
        let hop = self.next[self.slot(from, to)?];
        hop.is_valid().then_some(hop)
    }
}
