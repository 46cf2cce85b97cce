//! The train decision function.
//!
//! [`decide`] is pure: it reads the train, the graph and the routing tables
//! and names the next [`Action`].  The coordinator applies the action and,
//! for [`Action::Deliver`], asks again immediately, since delivering leaves
//! the train idle at the same node.

use th_core::{NodeId, NodeKind};
use th_graph::{Graph, Router};

use crate::Train;

/// What an idle train does next.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    /// Mining is in progress; wait for the timer.
    Wait,
    /// Unload at the current base, crediting `amount`.
    Deliver { amount: f64 },
    /// Start mining at the current mine for `duration` time units.
    Mine { duration: f64 },
    /// Take one hop toward `goal`.
    TravelTo { next: NodeId, goal: NodeId },
    /// No reachable node of the wanted kind (or no hop toward it).  The
    /// train stays idle until the graph changes.
    Stall { wanted: NodeKind },
}

/// Choose the next action for an idle `train`.
///
/// Callers only invoke this on trains that are not travelling.
pub fn decide<R: Router + ?Sized>(train: &Train, graph: &Graph, router: &R) -> Action {
    if train.is_mining() {
        return Action::Wait;
    }

    let here = train.current_node();
    let Some(node) = graph.node(here) else {
        let wanted = if train.has_resource() { NodeKind::Base } else { NodeKind::Mine };
        return Action::Stall { wanted };
    };

    match (train.has_resource(), node.kind) {
        (true, NodeKind::Base) => Action::Deliver { amount: node.multiplier },
        (true, _) => head_toward(here, NodeKind::Base, graph, router),
        (false, NodeKind::Mine) => Action::Mine { duration: train.mining_duration(node.multiplier) },
        (false, _) => head_toward(here, NodeKind::Mine, graph, router),
    }
}

fn head_toward<R: Router + ?Sized>(here: NodeId, wanted: NodeKind, graph: &Graph, router: &R) -> Action {
    router
        .nearest_of_kind(graph, here, wanted)
        .and_then(|goal| router.next_hop(here, goal).map(|next| Action::TravelTo { next, goal }))
        .unwrap_or(Action::Stall { wanted })
}
