/// Wrap-around tick counter for trajectory and fixation epochs.
///
/// `incr` advances the counter and reports the wrap: when the incremented
/// value reaches `max`, it resets to 0 and returns true. A `max` of 0 wraps
/// immediately, which is what lets the very first step of a fresh engine
/// register as both a trajectory start and a saccade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    pub cur: i64,
    pub max: i64,
}

impl Counter {
    /// Counter with no epoch length adopted yet; wraps on the first `incr`.
    pub fn starting_at(cur: i64) -> Self {
        Self { cur, max: 0 }
    }

    pub fn incr(&mut self) -> bool {
        self.cur += 1;
        if self.cur >= self.max {
            self.cur = 0;
            return true;
        }
        false
    }

    /// Arrange for the next `incr` to wrap regardless of progress through
    /// the current epoch.
    pub fn force_wrap_next(&mut self) {
        self.cur = self.max - 1;
    }
}
