//! `th-core`: foundational types for the `train_harvest` simulation.
//!
//! This crate is a dependency of every other `th-*` crate.  It has no `th-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `NodeId`                                        |
//! | [`geo`]    | `Position`, Euclidean distance, linear interpolation       |
//! | [`kind`]   | `NodeKind` enum (`Base`, `Mine`, `Waypoint`)               |
//! | [`time`]   | `Tick`, `SimTime`, `SimClock`, `SimConfig`                 |
//! | [`rng`]    | `SimRng` (seeded spawn placement)                          |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Position;
pub use ids::{AgentId, NodeId};
pub use kind::NodeKind;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, SimTime, Tick};
