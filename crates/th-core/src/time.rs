//! Simulation time model.
//!
//! # Design
//!
//! The loop is driven by an integer `Tick` counter.  Each tick advances the
//! continuous simulation time `SimTime` by
//!
//!   step = tick_duration * time_scale
//!
//! Travel interpolation and mining timers are expressed in `SimTime`, so a
//! train's arrival or a timer's due time does not depend on the tick
//! resolution beyond "observed at the first tick whose time reaches it".
//! `time_scale` is the run-time speed knob; changing it never rewrites times
//! already recorded by trains or timers.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Continuous simulation time in abstract time units.
///
/// Totally ordered through [`f64::total_cmp`] so it can key a `BTreeMap`.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time units elapsed from `earlier` to `self`, never negative.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus the continuous time it maps to.
///
/// `now` is derived from the tick count since the last time-scale change
/// rather than summed step by step, so a fractional `tick_duration` does not
/// drift.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Time units per tick before scaling.
    pub tick_duration: f64,
    time_scale: f64,
    pub current_tick: Tick,
    pub now: SimTime,
    anchor_tick: Tick,
    anchor_time: SimTime,
}

impl SimClock {
    pub fn new(tick_duration: f64, time_scale: f64) -> Self {
        Self {
            tick_duration,
            time_scale,
            current_tick: Tick::ZERO,
            now: SimTime::ZERO,
            anchor_tick: Tick::ZERO,
            anchor_time: SimTime::ZERO,
        }
    }

    /// Rate multiplier applied to every step.  `0.0` pauses time while
    /// ticks keep counting.
    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Change the rate from the current tick on.  Time already elapsed is
    /// kept as is.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.anchor_tick = self.current_tick;
        self.anchor_time = self.now;
        self.time_scale = time_scale;
    }

    /// Time added by one call to [`advance`](Self::advance).
    #[inline]
    pub fn step(&self) -> f64 {
        self.tick_duration * self.time_scale
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
        let ticks = (self.current_tick.0 - self.anchor_tick.0) as f64;
        self.now = self.anchor_time + ticks * self.step();
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, x{})", self.current_tick, self.now, self.time_scale)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Time units per tick.  Must be positive.
    pub tick_duration: f64,

    /// Simulation speed multiplier.  Must be non-negative.
    pub time_scale: f64,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed for random spawn placement.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration, self.time_scale)
    }

    /// Reject values that would make the clock stand still or run backwards.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_duration.is_finite() && self.tick_duration > 0.0) {
            return Err(CoreError::Config(format!(
                "tick_duration must be positive, got {}",
                self.tick_duration
            )));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(CoreError::Config(format!(
                "time_scale must be non-negative, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration:           1.0,
            time_scale:              1.0,
            total_ticks:             1_000,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}
