//! CSV graph loader.
//!
//! # CSV format
//!
//! Two tables.  Nodes, one row per node; ids must be dense `0..n` but may
//! appear in any order.  `active` may be left empty (defaults to `true`).
//!
//! ```csv
//! node_id,kind,multiplier,x,y,active
//! 0,base,2.0,0,0,
//! 1,waypoint,1.0,5,0,
//! 2,mine,3.0,10,0,false
//! ```
//!
//! Edges, one row per **directed** connection, kept in file order:
//!
//! ```csv
//! from,to,distance
//! 0,1,5
//! 1,0,5
//! 1,2,5.5
//! ```
//!
//! Edges naming an unknown node are a parse error.  Self-loops and negative
//! distances load fine and are left out of adjacency by the graph itself.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use th_core::{NodeId, NodeKind, Position};

use crate::{GraphBuilder, GraphError, GraphResult};
use crate::graph::Graph;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id:    u32,
    kind:       String,
    multiplier: f64,
    x:          f64,
    y:          f64,
    active:     Option<bool>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:     u32,
    to:       u32,
    distance: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a graph from a nodes CSV file and an edges CSV file.
pub fn load_graph_csv(nodes: &Path, edges: &Path) -> GraphResult<Graph> {
    let nodes = std::fs::File::open(nodes)?;
    let edges = std::fs::File::open(edges)?;
    load_graph_reader(nodes, edges)
}

/// Like [`load_graph_csv`] but accepts any `Read` sources.
///
/// Useful for tests and for scenes embedded with `include_str!`.
pub fn load_graph_reader<N: Read, E: Read>(nodes: N, edges: E) -> GraphResult<Graph> {
    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut rows: Vec<NodeRecord> = csv::Reader::from_reader(nodes)
        .deserialize::<NodeRecord>()
        .map(|r| r.map_err(|e| GraphError::Parse(e.to_string())))
        .collect::<GraphResult<_>>()?;
    rows.sort_unstable_by_key(|r| r.node_id);

    for (expected, row) in rows.iter().enumerate() {
        if row.node_id as usize != expected {
            return Err(GraphError::Parse(format!(
                "node ids must be dense from 0: expected {expected}, found {}",
                row.node_id
            )));
        }
    }

    let mut builder = GraphBuilder::new();
    for row in &rows {
        let kind: NodeKind = row.kind.parse()?;
        let id = builder.add_node(kind, row.multiplier, Position::new(row.x, row.y));
        if row.active == Some(false) {
            builder.deactivate(id);
        }
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let node_count = rows.len() as u32;
    for result in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let edge = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        for endpoint in [edge.from, edge.to] {
            if endpoint >= node_count {
                return Err(GraphError::Parse(format!(
                    "edge {} -> {} references unknown node {endpoint}",
                    edge.from, edge.to
                )));
            }
        }
        builder.add_directed_edge(NodeId(edge.from), NodeId(edge.to), edge.distance);
    }

    Ok(builder.build())
}
