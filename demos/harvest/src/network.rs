//! The demo scene: one base, two mines, and a ring of waypoints.

use std::io::Cursor;

use th_core::NodeId;
use th_graph::{Graph, GraphResult, load_graph_reader};

// Node 0 is the base; 3 and 6 are mines.  The east mine (3) is rich but
// slow to work, the west mine (6) quick but poor.
const NODES_CSV: &str = "\
node_id,kind,multiplier,x,y,active\n\
0,base,2.0,0,0,\n\
1,waypoint,1.0,30,10,\n\
2,waypoint,1.0,60,20,\n\
3,mine,3.0,90,10,\n\
4,waypoint,1.0,-30,15,\n\
5,waypoint,1.0,-55,30,\n\
6,mine,1.0,-80,20,\n\
7,waypoint,1.0,10,50,\n\
";

// Tracks are declared in both directions except the one-way shortcut 7 → 2.
const EDGES_CSV: &str = "\
from,to,distance\n\
0,1,32\n\
1,0,32\n\
1,2,32\n\
2,1,32\n\
2,3,20\n\
3,2,20\n\
0,4,34\n\
4,0,34\n\
4,5,29\n\
5,4,29\n\
5,6,27\n\
6,5,27\n\
0,7,51\n\
7,0,51\n\
7,2,55\n\
";

/// Named ids of the interesting nodes.
pub struct Landmarks {
    pub base:      NodeId,
    pub east_mine: NodeId,
    pub west_mine: NodeId,
    pub east_leg:  (NodeId, NodeId),
}

pub fn build_scene() -> GraphResult<(Graph, Landmarks)> {
    let graph = load_graph_reader(Cursor::new(NODES_CSV), Cursor::new(EDGES_CSV))?;
    let landmarks = Landmarks {
        base:      NodeId(0),
        east_mine: NodeId(3),
        west_mine: NodeId(6),
        east_leg:  (NodeId(1), NodeId(2)),
    };
    Ok((graph, landmarks))
}
