//! The running total of delivered resource.

/// Integer resource total with a pending-refresh flag.
///
/// Each credit is rounded half-to-even before it is added, so `2.5` adds 2
/// and `3.5` adds 4.  There is no way to decrease the total.
#[derive(Debug, Default, Clone)]
pub struct ResourceLedger {
    total: i64,
    dirty: bool,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `round(amount)` and return the amount actually added.
    pub fn credit(&mut self, amount: f64) -> i64 {
        let added = amount.round_ties_even() as i64;
        self.total += added;
        self.dirty = true;
        added
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Return the total if it changed since the last call.
    pub fn take_changed(&mut self) -> Option<i64> {
        std::mem::take(&mut self.dirty).then_some(self.total)
    }
}
