//! The train state machine.
//!
//! # States
//!
//! | State      | Observable as                                         |
//! |------------|-------------------------------------------------------|
//! | Idle       | no journey, `is_mining == false`                      |
//! | Travelling | `journey.is_some()`                                   |
//! | Mining     | `is_mining == true`                                   |
//!
//! Delivering is instantaneous and never observable.  Transitions are only
//! reachable through the methods below, which keep the invariants:
//!
//! - a target node exists iff the train is travelling;
//! - mining and travelling are mutually exclusive;
//! - `has_resource` survives travel and is cleared only by [`Train::deliver`].
//!
//! The coordinator owns the side effects (occupancy registry, ledger,
//! timers); methods here return what the coordinator needs to apply them.

use tracing::warn;

use th_core::{AgentId, CoreError, CoreResult, NodeId, Position, SimTime};
use th_graph::{approx_eq, Graph};

use crate::Journey;

// ── TrainParams ───────────────────────────────────────────────────────────────

/// Per-train constants.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainParams {
    /// Distance units per time unit.
    pub speed: f64,
    /// Mining time before the mine's multiplier is applied.
    pub base_mining_time: f64,
}

impl TrainParams {
    pub fn new(speed: f64, base_mining_time: f64) -> Self {
        Self { speed, base_mining_time }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(CoreError::Config(format!("train speed must be positive, got {}", self.speed)));
        }
        if !(self.base_mining_time.is_finite() && self.base_mining_time >= 0.0) {
            return Err(CoreError::Config(format!(
                "base mining time must be non-negative, got {}",
                self.base_mining_time
            )));
        }
        Ok(())
    }
}

impl Default for TrainParams {
    fn default() -> Self {
        Self { speed: 10.0, base_mining_time: 5.0 }
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Travelling,
    Mining,
}

/// Coarse display classification for rendering collaborators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrainStatus {
    /// Carrying a load (drawn green).
    Carrying,
    /// Mining (drawn yellow).
    Mining,
    /// Anything else (drawn white).
    Empty,
}

/// A completed leg, reported by [`Train::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub from: NodeId,
    pub to:   NodeId,
}

// ── Train ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Train {
    id:           AgentId,
    params:       TrainParams,
    current_node: NodeId,
    has_resource: bool,
    is_mining:    bool,
    position:     Position,
    journey:      Option<Journey>,
}

impl Train {
    /// An idle, empty train standing at `node`.
    pub fn new(id: AgentId, params: TrainParams, node: NodeId, position: Position) -> Self {
        Self {
            id,
            params,
            current_node: node,
            has_resource: false,
            is_mining:    false,
            position,
            journey:      None,
        }
    }

    /// Start out already carrying a load.
    pub fn with_resource(mut self, has_resource: bool) -> Self {
        self.has_resource = has_resource;
        self
    }

    // ── Observable state ──────────────────────────────────────────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn params(&self) -> &TrainParams {
        &self.params
    }

    /// The node the train is at, or departed from while travelling.
    pub fn current_node(&self) -> NodeId {
        self.current_node
    }

    pub fn target_node(&self) -> Option<NodeId> {
        self.journey.as_ref().map(|j| j.target)
    }

    pub fn has_resource(&self) -> bool {
        self.has_resource
    }

    pub fn is_mining(&self) -> bool {
        self.is_mining
    }

    pub fn is_travelling(&self) -> bool {
        self.journey.is_some()
    }

    /// Idle trains are the ones whose decision function may act.
    pub fn is_idle(&self) -> bool {
        !self.is_mining && self.journey.is_none()
    }

    /// Interpolated position as of the last [`advance`](Self::advance).
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn journey(&self) -> Option<&Journey> {
        self.journey.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.is_mining {
            Phase::Mining
        } else if self.journey.is_some() {
            Phase::Travelling
        } else {
            Phase::Idle
        }
    }

    /// Carrying takes precedence over mining.
    pub fn status(&self) -> TrainStatus {
        if self.has_resource {
            TrainStatus::Carrying
        } else if self.is_mining {
            TrainStatus::Mining
        } else {
            TrainStatus::Empty
        }
    }

    // ── Travel ────────────────────────────────────────────────────────────

    /// Begin a leg from `current_node` to the direct neighbor `target`.
    ///
    /// If the train was already travelling, the edge it was on is returned
    /// so the caller can release it.
    pub fn start_moving(&mut self, target: NodeId, graph: &Graph, now: SimTime) -> Option<Arrival> {
        let previous = self.journey.take().map(|j| Arrival { from: j.from, to: j.target });

        let start_position = self.position;
        let target_position = graph.position(target).unwrap_or(start_position);
        let length = self.leg_length(graph, target, start_position, target_position);

        self.journey = Some(Journey {
            from: self.current_node,
            target,
            length,
            straight_line: graph.distance(self.current_node, target).is_none(),
            remaining_distance: length,
            expected_duration: length / self.params.speed,
            start_time: now,
            start_position,
            target_position,
            origin_position: start_position,
        });
        previous
    }

    /// Move along the current leg to `now`.  Reaching the end snaps the
    /// train onto the target node and reports the finished edge.
    pub fn advance(&mut self, now: SimTime) -> Option<Arrival> {
        let journey = self.journey.as_ref()?;
        let progress = journey.progress(now);
        self.position = journey.position_at(now);
        if progress < 1.0 {
            return None;
        }

        let journey = self.journey.take()?;
        self.current_node = journey.target;
        self.position = journey.target_position;
        Some(Arrival { from: journey.from, to: journey.target })
    }

    /// Re-project the current leg after its edge changed weight.
    ///
    /// The position at `now` becomes the new start and the clock origin
    /// restarts at `now`.  What is left of the current segment, as a
    /// fraction, is applied to the new edge length and re-timed at the
    /// train's speed.  Returns `false` if the train is not travelling.
    pub fn update_journey(&mut self, graph: &Graph, now: SimTime) -> bool {
        let Some(journey) = self.journey.as_ref() else {
            return false;
        };
        let progress = journey.progress(now);
        let position = journey.position_at(now);
        let (target, origin, target_position) =
            (journey.target, journey.origin_position, journey.target_position);

        let length = self.leg_length(graph, target, origin, target_position);
        let remaining = length * (1.0 - progress);

        if let Some(journey) = self.journey.as_mut() {
            journey.length = length;
            journey.straight_line = graph.distance(journey.from, target).is_none();
            journey.remaining_distance = remaining;
            journey.expected_duration = remaining / self.params.speed;
            journey.start_time = now;
            journey.start_position = position;
        }
        self.position = position;
        true
    }

    /// Whether the edge under this train no longer has the length its
    /// journey was timed with, or has vanished since.  Always `false` for a
    /// train that is not travelling.
    pub fn edge_changed(&self, graph: &Graph) -> bool {
        let Some(journey) = self.journey.as_ref() else {
            return false;
        };
        match graph.distance(journey.from, journey.target) {
            Some(length) => journey.straight_line || !approx_eq(length, journey.length),
            None => !journey.straight_line,
        }
    }

    /// Direct edge length to `target`, or the straight-line distance when
    /// the edge is gone.
    fn leg_length(&self, graph: &Graph, target: NodeId, from: Position, to: Position) -> f64 {
        match graph.distance(self.current_node, target) {
            Some(d) => d,
            None => {
                let fallback = from.distance(to);
                warn!(
                    train = %self.id,
                    from = %self.current_node,
                    to = %target,
                    fallback,
                    "edge missing, using straight-line distance"
                );
                fallback
            }
        }
    }

    // ── Mining and delivery ───────────────────────────────────────────────

    /// Time this train needs at a mine with the given multiplier.
    pub fn mining_duration(&self, multiplier: f64) -> f64 {
        self.params.base_mining_time * multiplier
    }

    /// Enter the mining state for `duration` time units and return the
    /// completion time.
    pub fn start_mining(&mut self, duration: f64, now: SimTime) -> SimTime {
        self.is_mining = true;
        now + duration.max(0.0)
    }

    /// Mining timer fired: the train now carries a load.
    pub fn finish_mining(&mut self) {
        self.is_mining = false;
        self.has_resource = true;
    }

    /// Unload at a base.
    pub fn deliver(&mut self) {
        self.has_resource = false;
    }
}
