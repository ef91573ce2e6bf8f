//! Rotation state and its per-frame advance.

use crate::topology::PhaseSource;

/// Phase units in one full revolution.
pub const PHASE_PERIOD: f32 = 144.0;

/// Wraps `value` into `0.0..period`.
///
/// Also handles negative input, which the counter-rotating phase produces
/// every frame.
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    let r = value % period;
    let r = if r < 0.0 { r + period } else { r };
    // A tiny negative remainder can round up to exactly `period`.
    if r >= period { 0.0 } else { r }
}

/// The two rotation phases and the current hue.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotation {
    pos: f32,
    middle_pos: f32,
    hue: f32,
}

impl Rotation {
    /// Creates a rotation, wrapping every value into its range.
    pub fn new(pos: f32, middle_pos: f32, hue: f32) -> Self {
        Self {
            pos: wrap(pos, PHASE_PERIOD),
            middle_pos: wrap(middle_pos, PHASE_PERIOD),
            hue: wrap(hue, 1.0),
        }
    }

    /// Outer and inner ring phase, in `0.0..144.0`.
    pub fn pos(&self) -> f32 {
        self.pos
    }

    /// Middle ring phase, in `0.0..144.0`.
    pub fn middle_pos(&self) -> f32 {
        self.middle_pos
    }

    /// Hue in turns, in `0.0..1.0`.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Phase driving a ring.
    pub fn phase(&self, source: PhaseSource) -> f32 {
        match source {
            PhaseSource::Shared => self.pos,
            PhaseSource::Counter => self.middle_pos,
        }
    }

    /// Moves to the next frame: the shared phase turns forward, the middle
    /// phase turns backward by the same amount, and the hue drifts.
    pub fn advance(&mut self, speed: f32, hue_step: f32) {
        self.pos = wrap(self.pos + speed, PHASE_PERIOD);
        self.middle_pos = wrap(self.middle_pos - speed, PHASE_PERIOD);
        self.hue = wrap(self.hue + hue_step, 1.0);
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
