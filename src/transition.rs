//! Cross-fade sequencing between the three rings.
//!
//! One ring fades in while the previously active one fades out; the third
//! stays dark. When a fade completes the next ring takes over, bouncing
//! between the outer and inner ring: outer, middle, inner, middle, outer, ...

use crate::time::{TimeDuration, TimeInstant};
use crate::topology::Ring;
use core::f32::consts::PI;

/// Which way the active ring moves on the next switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the inner ring.
    Inward,
    /// Towards the outer ring.
    Outward,
}

impl Direction {
    /// Signed step in ring index.
    pub const fn step(self) -> isize {
        match self {
            Direction::Inward => 1,
            Direction::Outward => -1,
        }
    }
}

/// Smooth-step easing: `0.5 - 0.5 * cos(progress * pi)`.
///
/// Maps `0.0..=1.0` onto `0.0..=1.0` with zero slope at both ends. Input is
/// clamped to that range.
#[inline]
pub fn ease(progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    0.5 - 0.5 * libm::cosf(progress * PI)
}

/// Result of advancing the transition for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fade {
    /// Eased progress of the current cross-fade, `0.0..=1.0`.
    pub eased: f32,
    /// A new cross-fade started on this frame.
    pub committed: bool,
}

/// Ring cross-fade state machine.
#[derive(Debug, Clone, Copy)]
pub struct RingTransition<I: TimeInstant> {
    active: Ring,
    previous: Ring,
    direction: Direction,
    started_at: I,
    eased: f32,
}

impl<I: TimeInstant> RingTransition<I> {
    /// Outer ring fading in, inner ring fading out, heading inward.
    pub fn new(now: I) -> Self {
        Self {
            active: Ring::Outer,
            previous: Ring::Inner,
            direction: Direction::Inward,
            started_at: now,
            eased: 0.0,
        }
    }

    /// Ring currently fading in.
    pub fn active(&self) -> Ring {
        self.active
    }

    /// Ring currently fading out.
    pub fn previous(&self) -> Ring {
        self.previous
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Instant of the last switch.
    pub fn started_at(&self) -> I {
        self.started_at
    }

    /// Eased progress computed by the last [`update`](Self::update).
    pub fn eased(&self) -> f32 {
        self.eased
    }

    /// Advances the fade to `now`.
    ///
    /// Once a full `switch_duration_secs` has elapsed, the active ring becomes
    /// the previous one, the next ring in the bounce order becomes active and
    /// the fade restarts from zero at `now`. On that commit frame the reported
    /// progress is exactly `0.0`, so the new ring starts dark and the old one
    /// at full brightness. At most one switch happens per update, even after
    /// a long gap.
    pub fn update(&mut self, now: I, switch_duration_secs: f32) -> Fade {
        let elapsed = now.duration_since(self.started_at).as_secs_f32();
        let linear = elapsed / switch_duration_secs;

        if linear >= 1.0 {
            self.commit(now);
            self.eased = 0.0;
            return Fade {
                eased: self.eased,
                committed: true,
            };
        }

        self.eased = ease(linear);
        Fade {
            eased: self.eased,
            committed: false,
        }
    }

    fn commit(&mut self, now: I) {
        self.previous = self.active;

        // Direction only flips at the ends of the ring order.
        match self.active {
            Ring::Inner => self.direction = Direction::Outward,
            Ring::Outer => self.direction = Direction::Inward,
            Ring::Middle => {}
        }

        let next = self.active.index() as isize + self.direction.step();
        self.active = Ring::from_index(next as usize).unwrap_or(self.previous);
        self.started_at = now;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ring switch: {} -> {} ({})",
            self.previous,
            self.active,
            self.direction
        );
    }

    /// Shifts the fade start forward by a pause, so the fade resumes where
    /// it stopped. Keeps the old start if the timer would overflow.
    pub fn postpone(&mut self, pause: I::Duration) {
        self.started_at = self.started_at.checked_add(pause).unwrap_or(self.started_at);
    }

    /// Brightness of `ring` for eased progress `eased`, scaled to `max`.
    pub fn brightness(&self, ring: Ring, eased: f32, max: f32) -> f32 {
        if ring == self.active {
            eased * max
        } else if ring == self.previous {
            (1.0 - eased) * max
        } else {
            0.0
        }
    }
}
