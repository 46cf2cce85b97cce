//! Planar position type and the interpolation primitive used for travel.
//!
//! Node positions only matter for rendering and for the straight-line
//! fallback when a train's edge disappears mid-journey; routing itself uses
//! the declared connection distances.

/// A point in the simulation plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation from `self` toward `target`.
    ///
    /// `t` is clamped to `[0, 1]`, so `lerp(.., 1.0)` lands exactly on
    /// `target` and overshoot never happens.
    #[inline]
    pub fn lerp(self, target: Position, t: f64) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
