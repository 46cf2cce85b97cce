//! Graph-subsystem error type.

use thiserror::Error;

use th_core::{CoreError, NodeId};

/// Errors produced by `th-graph`.  Routing queries never fail; these cover
/// configuration input and edits naming unknown nodes.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
