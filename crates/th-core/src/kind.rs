//! Node kind enum shared by the graph, the router and the train logic.

use std::str::FromStr;

use crate::CoreError;

/// What a node is for.
///
/// The node's `multiplier` is interpreted per kind: at a `Base` it scales the
/// delivered amount, at a `Mine` it scales the mining duration.  Waypoints
/// ignore it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Delivery point.
    Base,
    /// Resource source.
    Mine,
    /// Pass-through junction.
    #[default]
    Waypoint,
}

impl NodeKind {
    /// Lower-case label, used by the CSV loader and log output.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Base     => "base",
            NodeKind::Mine     => "mine",
            NodeKind::Waypoint => "waypoint",
        }
    }
}

impl FromStr for NodeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base"     => Ok(NodeKind::Base),
            "mine"     => Ok(NodeKind::Mine),
            "waypoint" => Ok(NodeKind::Waypoint),
            other => Err(CoreError::Parse(format!(
                "invalid node kind {other:?}: expected \"base\", \"mine\" or \"waypoint\""
            ))),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
