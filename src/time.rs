//! Clock abstraction so the animation can run on any monotonic timer.

/// Source of monotonic time instants.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current instant.
    fn now(&self) -> I;
}

/// Elapsed time between two instants.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration.
    const ZERO: Self;

    /// Duration in whole milliseconds.
    fn as_millis(&self) -> u64;

    /// Builds a duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Duration in seconds, at millisecond resolution.
    fn as_secs_f32(&self) -> f32 {
        self.as_millis() as f32 / 1000.0
    }
}

/// A point on a monotonic clock.
pub trait TimeInstant: Copy {
    /// Duration type produced by subtracting instants.
    type Duration: TimeDuration;

    /// Time elapsed since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds a duration, returning `None` on timer overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
