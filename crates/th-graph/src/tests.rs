//! Unit tests for th-graph.
//!
//! All tests use hand-built graphs; node positions only matter for the
//! spatial-snap tests.

#[cfg(test)]
mod helpers {
    use th_core::{NodeId, NodeKind, Position};

    use crate::{Graph, GraphBuilder};

    /// Triangle A–B (5), B–C (5), A–C (20), all bidirectional.
    ///
    /// A is a Base, C a Mine, B a Waypoint.
    pub fn triangle() -> (Graph, [NodeId; 3]) {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeKind::Base, 1.0, Position::new(0.0, 0.0));
        let m = b.add_node(NodeKind::Waypoint, 1.0, Position::new(5.0, 0.0));
        let c = b.add_node(NodeKind::Mine, 1.0, Position::new(10.0, 0.0));
        b.add_track(a, m, 5.0);
        b.add_track(m, c, 5.0);
        b.add_track(a, c, 20.0);
        (b.build(), [a, m, c])
    }

    /// One-way A → B only.
    pub fn one_way() -> (Graph, [NodeId; 2]) {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeKind::Waypoint, 1.0, Position::new(0.0, 0.0));
        let c = b.add_node(NodeKind::Waypoint, 1.0, Position::new(1.0, 0.0));
        b.add_directed_edge(a, c, 3.0);
        (b.build(), [a, c])
    }
}

// ── Graph model ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use th_core::{NodeId, NodeKind, Position};

    use crate::{Connection, GraphBuilder};

    #[test]
    fn empty_build() {
        let g = GraphBuilder::new().build();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.snap_to_node(Position::ORIGIN), None);
    }

    #[test]
    fn track_is_bidirectional_edge_is_not() {
        let (g, [a, c]) = super::helpers::one_way();
        assert_eq!(g.distance(a, c), Some(3.0));
        assert_eq!(g.distance(c, a), None);

        let (g, [a, m, _]) = super::helpers::triangle();
        assert_eq!(g.distance(a, m), Some(5.0));
        assert_eq!(g.distance(m, a), Some(5.0));
    }

    #[test]
    fn malformed_connections_excluded_from_adjacency() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let c = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let mut g = b.build();
        g.set_connections(a, vec![
            Connection::unassigned(4.0),
            Connection::new(a, 1.0),           // self-loop
            Connection::new(NodeId(99), 2.0),  // unknown node
            Connection::new(c, -1.0),          // negative
            Connection::new(c, f64::NAN),
        ])
        .unwrap();

        let node = g.node(a).unwrap();
        assert_eq!(node.connections().len(), 5);
        assert_eq!(node.out_degree(), 0);
    }

    #[test]
    fn later_duplicate_overrides_earlier() {
        let (mut g, [a, c]) = super::helpers::one_way();
        g.set_connections(a, vec![Connection::new(c, 3.0), Connection::new(c, 7.0)]).unwrap();
        assert_eq!(g.distance(a, c), Some(7.0));
    }

    #[test]
    fn set_connections_rebuilds_in_full() {
        let (mut g, [a, m, c]) = super::helpers::triangle();
        g.set_connections(a, vec![Connection::new(c, 2.0)]).unwrap();
        assert_eq!(g.distance(a, m), None, "stale entry survived rebuild");
        assert_eq!(g.distance(a, c), Some(2.0));
    }

    #[test]
    fn set_distance_updates_adjacency_immediately() {
        let (mut g, [a, m, _]) = super::helpers::triangle();
        assert!(g.set_distance(a, m, 9.0).unwrap());
        assert_eq!(g.distance(a, m), Some(9.0));
        // Reverse direction is a separate connection.
        assert_eq!(g.distance(m, a), Some(5.0));
    }

    #[test]
    fn set_distance_on_missing_connection_is_false() {
        let (mut g, [a, c]) = super::helpers::one_way();
        assert!(!g.set_distance(c, a, 1.0).unwrap());
        assert!(g.set_distance(NodeId(50), a, 1.0).is_err());
    }

    #[test]
    fn remove_connection() {
        let (mut g, [a, c]) = super::helpers::one_way();
        assert!(g.remove_connection(a, c).unwrap());
        assert!(!g.remove_connection(a, c).unwrap());
        assert_eq!(g.distance(a, c), None);
    }

    #[test]
    fn snap_to_nearest_node() {
        let (g, [a, m, c]) = super::helpers::triangle();
        assert_eq!(g.snap_to_node(Position::new(-3.0, 1.0)), Some(a));
        assert_eq!(g.snap_to_node(Position::new(5.4, 2.0)), Some(m));
        assert_eq!(g.snap_to_node(Position::new(40.0, 0.0)), Some(c));
    }
}

// ── Change detection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod change_detection {
    use th_core::NodeId;

    #[test]
    fn fresh_graph_reports_no_change() {
        let (mut g, ids) = super::helpers::triangle();
        for id in ids {
            assert!(!g.detect_change(id));
        }
    }

    #[test]
    fn distance_change_detected_once() {
        let (mut g, [a, m, _]) = super::helpers::triangle();
        g.set_distance(a, m, 6.0).unwrap();
        assert!(g.detect_change(a));
        assert!(!g.detect_change(a), "snapshot was not refreshed");
        assert!(!g.detect_change(m));
    }

    #[test]
    fn count_change_detected() {
        let (mut g, [a, c]) = super::helpers::one_way();
        g.add_connection(c, a, 3.0).unwrap();
        assert!(g.detect_change(c));
    }

    #[test]
    fn change_within_tolerance_ignored() {
        let (mut g, [a, m, _]) = super::helpers::triangle();
        g.set_distance(a, m, 5.0 + 1e-9).unwrap();
        assert!(!g.detect_change(a));
    }

    #[test]
    fn nan_distance_reported_once() {
        let (mut g, [a, m, _]) = super::helpers::triangle();
        g.set_distance(a, m, f64::NAN).unwrap();
        assert!(g.detect_change(a));
        assert!(!g.detect_change(a));
    }

    #[test]
    fn unknown_node_never_changes() {
        let (mut g, _) = super::helpers::triangle();
        assert!(!g.detect_change(NodeId(12)));
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use th_core::{NodeId, NodeKind, Position};

    use crate::{FloydWarshallRouter, GraphBuilder, Router};

    #[test]
    fn triangle_prefers_two_short_legs() {
        let (g, [a, m, c]) = super::helpers::triangle();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.distance(a, c), 10.0);
        assert_eq!(r.next_hop(a, c), Some(m));
        assert_eq!(r.next_hop(c, a), Some(m));
    }

    #[test]
    fn diagonal_is_zero_without_hop() {
        let (g, ids) = super::helpers::triangle();
        let r = FloydWarshallRouter::from_graph(&g);
        for id in ids {
            assert_eq!(r.distance(id, id), 0.0);
            assert_eq!(r.next_hop(id, id), None);
        }
    }

    #[test]
    fn symmetric_fixture_gives_symmetric_distances() {
        let (g, ids) = super::helpers::triangle();
        let r = FloydWarshallRouter::from_graph(&g);
        for &i in &ids {
            for &j in &ids {
                assert_eq!(r.distance(i, j), r.distance(j, i));
            }
        }
    }

    #[test]
    fn one_way_edge_is_asymmetric() {
        let (g, [a, c]) = super::helpers::one_way();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.distance(a, c), 3.0);
        assert_eq!(r.distance(c, a), f64::INFINITY);
        assert_eq!(r.next_hop(c, a), None);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let (g, _) = super::helpers::triangle();
        let mut r = FloydWarshallRouter::from_graph(&g);
        let first = r.clone();
        r.rebuild(&g);
        assert_eq!(r, first);
    }

    #[test]
    fn rebuild_tracks_weight_change() {
        let (mut g, [a, m, c]) = super::helpers::triangle();
        let mut r = FloydWarshallRouter::from_graph(&g);
        g.set_distance(a, c, 4.0).unwrap();
        r.rebuild(&g);
        assert_eq!(r.distance(a, c), 4.0);
        assert_eq!(r.next_hop(a, c), Some(c));
        assert_eq!(r.next_hop(a, m), Some(m));
    }

    #[test]
    fn equal_cost_tie_keeps_first_discovered() {
        // A→B→D and A→C→D both cost 2; k = B is relaxed before k = C.
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let n1 = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let n2 = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let d = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        b.add_directed_edge(a, n2, 1.0);
        b.add_directed_edge(a, n1, 1.0);
        b.add_directed_edge(n1, d, 1.0);
        b.add_directed_edge(n2, d, 1.0);
        let r = FloydWarshallRouter::from_graph(&b.build());
        assert_eq!(r.distance(a, d), 2.0);
        assert_eq!(r.next_hop(a, d), Some(n1));
    }

    #[test]
    fn empty_graph_and_unknown_ids_answer_none() {
        let g = GraphBuilder::new().build();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.next_hop(NodeId(0), NodeId(1)), None);
        assert_eq!(r.distance(NodeId(0), NodeId(1)), f64::INFINITY);
        assert_eq!(r.nearest_of_kind(&g, NodeId(0), NodeKind::Mine), None);

        let unbuilt = FloydWarshallRouter::new();
        assert_eq!(unbuilt.node_count(), 0);
        assert_eq!(unbuilt.next_hop(NodeId(3), NodeId(4)), None);
    }
}

// ── Nearest of kind ───────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use th_core::{NodeKind, Position};

    use crate::{FloydWarshallRouter, GraphBuilder, Router};

    #[test]
    fn picks_minimum_distance() {
        let mut b = GraphBuilder::new();
        let start = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let far   = b.add_node(NodeKind::Mine, 1.0, Position::ORIGIN);
        let near  = b.add_node(NodeKind::Mine, 1.0, Position::ORIGIN);
        b.add_track(start, far, 8.0);
        b.add_track(start, near, 3.0);
        let g = b.build();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.nearest_of_kind(&g, start, NodeKind::Mine), Some(near));
    }

    #[test]
    fn ties_resolve_to_lowest_id() {
        let mut b = GraphBuilder::new();
        let start = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let first = b.add_node(NodeKind::Base, 1.0, Position::ORIGIN);
        let second = b.add_node(NodeKind::Base, 1.0, Position::ORIGIN);
        b.add_track(start, second, 4.0);
        b.add_track(start, first, 4.0);
        let g = b.build();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.nearest_of_kind(&g, start, NodeKind::Base), Some(first));
    }

    #[test]
    fn inactive_nodes_skipped() {
        let (mut g, [a, _, c]) = super::helpers::triangle();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.nearest_of_kind(&g, a, NodeKind::Mine), Some(c));
        g.set_active(c, false).unwrap();
        assert_eq!(r.nearest_of_kind(&g, a, NodeKind::Mine), None);
    }

    #[test]
    fn unreachable_candidates_ignored() {
        let mut b = GraphBuilder::new();
        let island = b.add_node(NodeKind::Waypoint, 1.0, Position::ORIGIN);
        let _mine  = b.add_node(NodeKind::Mine, 1.0, Position::ORIGIN);
        let g = b.build();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.nearest_of_kind(&g, island, NodeKind::Mine), None);
    }

    #[test]
    fn node_of_requested_kind_finds_itself() {
        let (g, [_, _, c]) = super::helpers::triangle();
        let r = FloydWarshallRouter::from_graph(&g);
        assert_eq!(r.nearest_of_kind(&g, c, NodeKind::Mine), Some(c));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use th_core::{NodeId, NodeKind};

    use crate::{load_graph_reader, GraphError};

    const NODES: &str = "\
node_id,kind,multiplier,x,y,active
1,waypoint,1.0,5,0,
0,base,2.0,0,0,
2,Mine,3.0,10,0,false
";

    const EDGES: &str = "\
from,to,distance
0,1,5
1,0,5
1,2,5.5
2,2,1
";

    #[test]
    fn loads_nodes_and_edges() {
        let g = load_graph_reader(Cursor::new(NODES), Cursor::new(EDGES)).unwrap();
        assert_eq!(g.node_count(), 3);

        let base = g.node(NodeId(0)).unwrap();
        assert_eq!(base.kind, NodeKind::Base);
        assert_eq!(base.multiplier, 2.0);
        assert!(base.active);

        let mine = g.node(NodeId(2)).unwrap();
        assert_eq!(mine.kind, NodeKind::Mine);
        assert!(!mine.active);

        assert_eq!(g.distance(NodeId(1), NodeId(2)), Some(5.5));
        // Self-loop row is loaded but not routable.
        assert_eq!(mine.connections().len(), 1);
        assert_eq!(mine.out_degree(), 0);
    }

    #[test]
    fn sparse_node_ids_rejected() {
        let nodes = "node_id,kind,multiplier,x,y,active\n0,base,1,0,0,\n2,mine,1,0,0,\n";
        let err = load_graph_reader(Cursor::new(nodes), Cursor::new("from,to,distance\n"));
        assert!(matches!(err, Err(GraphError::Parse(_))));
    }

    #[test]
    fn unknown_edge_endpoint_rejected() {
        let edges = "from,to,distance\n0,7,1\n";
        let err = load_graph_reader(Cursor::new(NODES), Cursor::new(edges));
        assert!(matches!(err, Err(GraphError::Parse(_))));
    }

    #[test]
    fn bad_kind_rejected() {
        let nodes = "node_id,kind,multiplier,x,y,active\n0,depot,1,0,0,\n";
        let err = load_graph_reader(Cursor::new(nodes), Cursor::new("from,to,distance\n"));
        assert!(matches!(err, Err(GraphError::Core(_))));
    }
}
