//! Graph model: typed nodes with weighted, directed outgoing connections.
//!
//! # Connections vs. adjacency
//!
//! Each node carries two views of its outgoing edges:
//!
//! - the **connection list**: exactly what configuration (or a runtime
//!   edit) declared, in declaration order, including malformed entries;
//! - the **adjacency map** `neighbor → distance`: derived from the list by
//!   dropping malformed entries (unknown or missing neighbor, self-loop,
//!   negative or non-finite distance).  Later duplicates overwrite earlier
//!   ones.
//!
//! Every mutation of a connection list rebuilds that node's adjacency in
//! full before returning, so adjacency never holds stale entries.
//!
//! # Change detection
//!
//! Alongside the list each node caches the distances that were last
//! *accepted* by the owner.  [`Graph::detect_change`] compares the live list
//! against that snapshot (count, then each distance within
//! [`DISTANCE_EPSILON`]) and refreshes the snapshot when they differ.  The
//! simulation polls it once per tick per node and rebuilds routing on `true`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps positions to the nearest `NodeId` for spawn
//! placement and debug tooling.  Node positions are fixed after build.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use th_core::{NodeId, NodeKind, Position};

use crate::{GraphError, GraphResult};

/// Relative tolerance for "did this distance change?".
pub const DISTANCE_EPSILON: f64 = 1e-6;

/// `true` if `a` and `b` differ by no more than [`DISTANCE_EPSILON`] scaled
/// by their magnitude (absolute below 1.0).
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b || (a.is_nan() && b.is_nan()) {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= DISTANCE_EPSILON * scale
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Connection ────────────────────────────────────────────────────────────────

/// One declared outgoing edge.
///
/// `to == NodeId::INVALID` models an unassigned neighbor slot; it stays in
/// the list (and counts for change detection) but never reaches adjacency.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub to:       NodeId,
    pub distance: f64,
}

impl Connection {
    #[inline]
    pub fn new(to: NodeId, distance: f64) -> Self {
        Self { to, distance }
    }

    /// A connection with no neighbor assigned.
    #[inline]
    pub fn unassigned(distance: f64) -> Self {
        Self { to: NodeId::INVALID, distance }
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// A graph vertex.
#[derive(Debug, Clone)]
pub struct Node {
    pub id:         NodeId,
    pub kind:       NodeKind,
    /// Delivered-amount scale at a Base, mining-time scale at a Mine.
    pub multiplier: f64,
    /// Inactive nodes are skipped by nearest-of-kind queries.
    pub active:     bool,
    pub position:   Position,

    connections: Vec<Connection>,
    adjacency:   FxHashMap<NodeId, f64>,
    accepted:    Vec<f64>,
}

impl Node {
    /// Declared connections in declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Direct distance to `neighbor`, if it is a valid outgoing edge.
    #[inline]
    pub fn neighbor_distance(&self, neighbor: NodeId) -> Option<f64> {
        self.adjacency.get(&neighbor).copied()
    }

    /// Valid outgoing edges, in no particular order.
    pub fn neighbors(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency.iter().map(|(&n, &d)| (n, d))
    }

    pub fn out_degree(&self) -> usize {
        self.adjacency.len()
    }

    fn rebuild_adjacency(&mut self, node_count: usize) {
        self.adjacency.clear();
        for conn in &self.connections {
            let malformed = !conn.to.is_valid()
                || conn.to.index() >= node_count
                || conn.to == self.id
                || !conn.distance.is_finite()
                || conn.distance < 0.0;
            if !malformed {
                self.adjacency.insert(conn.to, conn.distance);
            }
        }
    }

    fn accept_distances(&mut self) {
        self.accepted.clear();
        self.accepted.extend(self.connections.iter().map(|c| c.distance));
    }

    fn distances_changed(&self) -> bool {
        self.connections.len() != self.accepted.len()
            || self
                .connections
                .iter()
                .zip(&self.accepted)
                .any(|(c, &last)| !approx_eq(c.distance, last))
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// The full node set.  Construct with [`GraphBuilder`] or the CSV loader.
#[derive(Debug)]
pub struct Graph {
    nodes:       Vec<Node>,
    spatial_idx: RTree<NodeEntry>,
}

impl Graph {
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    // ── Dimensions and lookup ─────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Direct edge weight `from → to`, or `None` if there is no valid edge.
    #[inline]
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.node(from)?.neighbor_distance(to)
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(GraphError::NodeNotFound(id))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Replace `node`'s connection list and rebuild its adjacency.
    pub fn set_connections(&mut self, node: NodeId, connections: Vec<Connection>) -> GraphResult<()> {
        let count = self.nodes.len();
        let n = self.node_mut(node)?;
        n.connections = connections;
        n.rebuild_adjacency(count);
        Ok(())
    }

    /// Set the distance of every declared `from → to` connection.
    ///
    /// Returns `false` (and changes nothing) if no such connection is
    /// declared.
    pub fn set_distance(&mut self, from: NodeId, to: NodeId, distance: f64) -> GraphResult<bool> {
        let count = self.nodes.len();
        let n = self.node_mut(from)?;
        let mut found = false;
        for conn in n.connections.iter_mut().filter(|c| c.to == to) {
            conn.distance = distance;
            found = true;
        }
        if found {
            n.rebuild_adjacency(count);
        }
        Ok(found)
    }

    /// Append a connection to `from`'s list.
    pub fn add_connection(&mut self, from: NodeId, to: NodeId, distance: f64) -> GraphResult<()> {
        let count = self.nodes.len();
        let n = self.node_mut(from)?;
        n.connections.push(Connection::new(to, distance));
        n.rebuild_adjacency(count);
        Ok(())
    }

    /// Remove every declared `from → to` connection.  Returns whether any
    /// was removed.
    pub fn remove_connection(&mut self, from: NodeId, to: NodeId) -> GraphResult<bool> {
        let count = self.nodes.len();
        let n = self.node_mut(from)?;
        let before = n.connections.len();
        n.connections.retain(|c| c.to != to);
        let removed = n.connections.len() != before;
        if removed {
            n.rebuild_adjacency(count);
        }
        Ok(removed)
    }

    pub fn set_active(&mut self, node: NodeId, active: bool) -> GraphResult<()> {
        self.node_mut(node)?.active = active;
        Ok(())
    }

    // ── Change detection ──────────────────────────────────────────────────

    /// Compare `node`'s connection distances against the last accepted
    /// snapshot.  On a difference the snapshot is refreshed and `true` is
    /// returned; the caller is expected to rebuild routing.
    ///
    /// Unknown nodes report no change.
    pub fn detect_change(&mut self, node: NodeId) -> bool {
        let count = self.nodes.len();
        let Some(n) = self.nodes.get_mut(node.index()) else {
            return false;
        };
        if !n.distances_changed() {
            return false;
        }
        n.rebuild_adjacency(count);
        n.accept_distances();
        true
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `pos` by straight-line distance, or `None` for an
    /// empty graph.
    pub fn snap_to_node(&self, pos: Position) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use th_core::{NodeKind, Position};
/// use th_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let base = b.add_node(NodeKind::Base, 1.0, Position::new(0.0, 0.0));
/// let mine = b.add_node(NodeKind::Mine, 2.0, Position::new(10.0, 0.0));
/// b.add_track(base, mine, 10.0);
/// let graph = b.build();
/// assert_eq!(graph.distance(mine, base), Some(10.0));
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, kind: NodeKind, multiplier: f64, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            kind,
            multiplier,
            active: true,
            position,
            connections: Vec::new(),
            adjacency:   FxHashMap::default(),
            accepted:    Vec::new(),
        });
        id
    }

    /// Mark a node inactive from the start.  Unknown ids are ignored.
    pub fn deactivate(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            n.active = false;
        }
    }

    /// Declare a **directed** connection.  Unknown `from` ids are ignored;
    /// unknown `to` ids are kept in the list and excluded from adjacency.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, distance: f64) {
        if let Some(n) = self.nodes.get_mut(from.index()) {
            n.connections.push(Connection::new(to, distance));
        }
    }

    /// Declare connections in **both directions** with the same distance.
    pub fn add_track(&mut self, a: NodeId, b: NodeId, distance: f64) {
        self.add_directed_edge(a, b, distance);
        self.add_directed_edge(b, a, distance);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder, derive adjacency, accept the initial distances,
    /// and bulk-load the spatial index.
    pub fn build(self) -> Graph {
        let mut nodes = self.nodes;
        let count = nodes.len();
        for n in &mut nodes {
            n.rebuild_adjacency(count);
            n.accept_distances();
        }

        let entries: Vec<NodeEntry> = nodes
            .iter()
            .map(|n| NodeEntry { point: [n.position.x, n.position.y], id: n.id })
            .collect();

        Graph {
            nodes,
            spatial_idx: RTree::bulk_load(entries),
        }
    }
}
