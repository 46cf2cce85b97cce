//! Which trains are on which directed edge.
//!
//! The registry is kept in step with travel but nothing consults it to
//! block movement; it exists for inspection and for future congestion-aware
//! routing.

use rustc_hash::{FxHashMap, FxHashSet};

use th_core::{AgentId, NodeId};

#[derive(Debug, Default, Clone)]
pub struct EdgeOccupancy {
    edges: FxHashMap<(NodeId, NodeId), FxHashSet<AgentId>>,
}

impl EdgeOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `agent` as traversing `from → to`.
    pub fn enter(&mut self, agent: AgentId, from: NodeId, to: NodeId) {
        self.edges.entry((from, to)).or_default().insert(agent);
    }

    /// Remove `agent` from `from → to`.  A no-op if it was not there.
    pub fn leave(&mut self, agent: AgentId, from: NodeId, to: NodeId) {
        if let Some(set) = self.edges.get_mut(&(from, to)) {
            set.remove(&agent);
            if set.is_empty() {
                self.edges.remove(&(from, to));
            }
        }
    }

    /// Trains on `from → to`, in ascending id order.
    pub fn occupants(&self, from: NodeId, to: NodeId) -> Vec<AgentId> {
        let mut agents: Vec<AgentId> = self
            .edges
            .get(&(from, to))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        agents.sort_unstable();
        agents
    }

    pub fn occupant_count(&self, from: NodeId, to: NodeId) -> usize {
        self.edges.get(&(from, to)).map_or(0, FxHashSet::len)
    }

    /// `true` when no train is on any edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
