//! `th-train`: train state machine, travel interpolation, and decisions.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`journey`]  | `Journey`: one interpolated leg along a directed edge       |
//! | [`train`]    | `Train`, `TrainParams`, `Phase`, `TrainStatus`, `Arrival`    |
//! | [`decision`] | `Action`, `decide`: what an idle train does next            |
//! | [`store`]    | `TrainStore`: `Vec<Train>` indexed by `AgentId`             |
//!
//! # Movement model
//!
//! Trains move one edge at a time.  Starting a leg records the edge length
//! (direct distance from the graph), the expected duration `length / speed`,
//! and the start time and positions.  Each tick [`Train::advance`]
//! interpolates the position by elapsed-time fraction; reaching the end
//! snaps the train onto the target node and hands control back to
//! [`decide`].  If the edge changes weight mid-leg, [`Train::update_journey`]
//! re-times the remainder without moving the train.

pub mod decision;
pub mod journey;
pub mod store;
pub mod train;


pub use decision::{decide, Action};
pub use journey::Journey;
pub use store::TrainStore;
pub use train::{Arrival, Phase, Train, TrainParams, TrainStatus};
