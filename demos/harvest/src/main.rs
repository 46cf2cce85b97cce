//! harvest: three trains working one base and two mines.
//!
//! Halfway through the run the track between the base and the east mine is
//! made much longer, as if a section were put under speed restriction.
//! Trains already on that stretch slow down in place; the rest re-route.
//!
//! Set `RUST_LOG=debug` to follow every departure, arrival and delivery.

mod network;

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use th_core::{NodeId, NodeKind, SimConfig, Tick};
use th_graph::FloydWarshallRouter;
use th_sim::{SimBuilder, SimObserver};
use th_train::{TrainParams, TrainStatus, TrainStore};

use network::build_scene;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const TICK_DURATION:   f64 = 0.1;
const TOTAL_TICKS:     u64 = 6_000;
const SNAPSHOT_EVERY:  u64 = 1_000;
const RESTRICTED_DIST: f64 = 140.0;

/// Speed and base mining time of the `i`-th spawned train: one fast, one
/// crawling, the rest in between.
fn params_for(i: usize) -> TrainParams {
    match i {
        0 => TrainParams::new(200.0, 20.0),
        1 => TrainParams::new(5.0, 1.0),
        _ => TrainParams::new(80.0, 10.0),
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct HarvestLog {
    deliveries: usize,
    reroutes:   usize,
}

impl SimObserver for HarvestLog {
    fn on_graph_changed(&mut self, tick: Tick, node: NodeId) {
        self.reroutes += 1;
        info!(%tick, %node, "routing rebuilt");
    }

    fn on_resources_changed(&mut self, tick: Tick, total: i64) {
        self.deliveries += 1;
        info!(%tick, total, "resources delivered");
    }

    fn on_snapshot(&mut self, tick: Tick, trains: &TrainStore) {
        for train in trains.iter() {
            info!(
                %tick,
                train = %train.id(),
                position = %train.position(),
                status = ?train.status(),
                "snapshot"
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, total: i64) {
        info!(%final_tick, total, "simulation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Scene.
    let (graph, marks) = build_scene()?;
    info!(nodes = graph.node_count(), base = %marks.base, "scene loaded");

    // 2. Sim.
    let config = SimConfig {
        tick_duration:           TICK_DURATION,
        time_scale:              1.0,
        total_ticks:             TOTAL_TICKS,
        seed:                    SEED,
        snapshot_interval_ticks: SNAPSHOT_EVERY,
    };
    let mut sim = SimBuilder::new(config, graph, FloydWarshallRouter::new())
        .spawn_random(3, params_for)
        .build()?;

    for train in sim.trains().iter() {
        info!(
            train = %train.id(),
            node = %train.current_node(),
            speed = train.params().speed,
            mining = train.params().base_mining_time,
            "spawned"
        );
    }

    // 3. First half.
    let mut log = HarvestLog::default();
    let t0 = Instant::now();
    sim.run_ticks(TOTAL_TICKS / 2, &mut log);

    // 4. Restrict the east leg in both directions; the next tick notices.
    let (a, b) = marks.east_leg;
    sim.graph_mut().set_distance(a, b, RESTRICTED_DIST)?;
    sim.graph_mut().set_distance(b, a, RESTRICTED_DIST)?;
    info!(
        from = %a,
        to = %b,
        distance = RESTRICTED_DIST,
        nearest_mine = ?sim.query_nearest_of_kind(marks.base, NodeKind::Mine),
        "east leg restricted"
    );

    // 5. Second half.
    sim.run(&mut log);
    let elapsed = t0.elapsed();

    // 6. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  delivered        : {}", sim.ledger_total());
    println!("  delivery ticks   : {}", log.deliveries);
    println!("  routing rebuilds : {}", log.reroutes);
    println!(
        "  next hop to east mine now: {:?}",
        sim.query_next_hop(marks.base, marks.east_mine)
    );
    println!(
        "  distance to west mine    : {:.1}",
        sim.query_distance(marks.base, marks.west_mine)
    );
    println!();

    println!("{:<8} {:<8} {:<10} {:<10}", "Train", "Node", "Status", "Travelling");
    println!("{}", "-".repeat(40));
    for train in sim.trains().iter() {
        let status = match train.status() {
            TrainStatus::Carrying => "carrying",
            TrainStatus::Mining => "mining",
            TrainStatus::Empty => "empty",
        };
        println!(
            "{:<8} {:<8} {:<10} {:<10}",
            train.id().0,
            train.current_node().0,
            status,
            if train.is_travelling() { "yes" } else { "no" },
        );
    }

    Ok(())
}
