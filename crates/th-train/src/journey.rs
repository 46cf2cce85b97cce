//! Per-leg travel state and its interpolation.

use th_core::{NodeId, Position, SimTime};

/// One leg of travel along a single directed edge `from → target`.
///
/// A journey is linear interpolation from `start_position` (at
/// `start_time`) to `target_position` over `expected_duration`.  A
/// re-projection moves the start to wherever the train currently is and
/// restarts the time origin, so the rendered position is continuous while
/// the rate of approach changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    /// The edge's source; equals the train's `current_node` while travelling.
    pub from:   NodeId,
    pub target: NodeId,

    /// Full length of the edge at the last (re)projection.
    pub length: f64,

    /// `length` is the straight-line distance because the edge was missing.
    pub straight_line: bool,

    /// Distance still to cover from `start_position`.
    pub remaining_distance: f64,

    /// Time to go from `start_position` to `target_position`.
    pub expected_duration: f64,

    pub start_time:      SimTime,
    pub start_position:  Position,
    pub target_position: Position,

    /// Where the leg began; only used for the straight-line fallback.
    pub origin_position: Position,
}

impl Journey {
    /// Fraction of the current interpolation segment completed at `now`,
    /// clamped to `[0, 1]`.  A zero-duration segment is already complete.
    pub fn progress(&self, now: SimTime) -> f64 {
        if self.expected_duration <= 0.0 {
            return 1.0;
        }
        (now.since(self.start_time) / self.expected_duration).clamp(0.0, 1.0)
    }

    /// Interpolated position at `now`.
    pub fn position_at(&self, now: SimTime) -> Position {
        self.start_position.lerp(self.target_position, self.progress(now))
    }

    /// Time at which the current segment reaches the target.
    pub fn arrival_time(&self) -> SimTime {
        self.start_time + self.expected_duration.max(0.0)
    }
}
