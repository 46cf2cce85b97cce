//! `th-sim`: the simulation coordinator for train_harvest.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   1. changes:  poll each node's connection list; on a change rebuild the
//!                routing tables, re-project trains on the changed edges and
//!                let idle trains decide again.
//!   2. timers:   fire mining timers due at or before `now`.
//!   3. movement: advance travelling trains in id order; arrivals decide.
//!   4. flush:    report the ledger total if it changed, end-of-tick and
//!                snapshot hooks, advance the clock.
//! ```
//!
//! Everything is single-threaded.  A rebuild completes before any train
//! moves, so all trains see the same routing tables within a tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use th_core::SimConfig;
//! use th_graph::FloydWarshallRouter;
//! use th_sim::{NoopObserver, SimBuilder};
//! use th_train::TrainParams;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), graph, FloydWarshallRouter::new())
//!     .spawn_random(3, |_| TrainParams::default())
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! println!("delivered {}", sim.ledger_total());
//! ```

pub mod builder;
pub mod error;
pub mod ledger;
pub mod observer;
pub mod occupancy;
pub mod sim;


pub use builder::{SimBuilder, SpawnPoint, TrainSpawn};
pub use error::{SimError, SimResult};
pub use ledger::ResourceLedger;
pub use observer::{NoopObserver, SimObserver};
pub use occupancy::EdgeOccupancy;
pub use sim::Sim;
