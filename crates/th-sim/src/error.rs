use th_core::{CoreError, NodeId};
use th_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("spawn point {0} is not a node of the graph")]
    UnknownSpawnNode(NodeId),

    #[error("cannot place trains: the graph has no nodes")]
    EmptyGraph,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SimResult<T> = Result<T, SimError>;
