//! `th-graph`: graph model, change detection, and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `Graph`, `Node`, `Connection`, `GraphBuilder`                |
//! | [`router`] | `Router` trait, `FloydWarshallRouter`                        |
//! | [`loader`] | `load_graph_csv`, `load_graph_reader`                        |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod loader;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{approx_eq, Connection, Graph, GraphBuilder, Node, DISTANCE_EPSILON};
pub use loader::{load_graph_csv, load_graph_reader};
pub use router::{FloydWarshallRouter, Router};
