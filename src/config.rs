//! Fixed animation parameters and their validation.

use crate::phase::PHASE_PERIOD;
use crate::topology::ELEMENT_COUNT;

/// Animation parameters, fixed for the lifetime of an animator.
///
/// Build one with [`SpiralConfig::builder`], or use [`Default`] for the
/// stock look: half brightness, one phase unit per frame, frozen red hue,
/// mirrored eyes and a two second cross-fade between rings. Fields are
/// private, so every instance has passed [`ConfigBuilder::build`]:
///
/// ```compile_fail
/// let config = hypno_spiral::SpiralConfig {
///     switch_duration_secs: 0.0,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiralConfig {
    /// Brightness ceiling in `0.0..=1.0`.
    brightness_max: f32,

    /// Number of elements on the chain (both panels).
    element_count: usize,

    /// Phase units added per frame to the outer/inner rotation.
    speed: f32,

    /// Hue turns added per frame, either direction. Zero freezes the color.
    hue_step: f32,

    /// Copy every color onto the mirrored element of the second eye.
    /// When off, the second eye repeats the first at a fixed offset.
    mirror: bool,

    /// Length of one ring cross-fade, in seconds.
    switch_duration_secs: f32,

    /// Starting outer/inner rotation phase.
    initial_pos: f32,

    /// Starting middle ring rotation phase.
    initial_middle_pos: f32,

    /// Starting hue, in turns.
    initial_hue: f32,
}

impl SpiralConfig {
    /// Creates a builder seeded with the default values.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Brightness ceiling in `0.0..=1.0`.
    pub fn brightness_max(&self) -> f32 {
        self.brightness_max
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn hue_step(&self) -> f32 {
        self.hue_step
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn switch_duration_secs(&self) -> f32 {
        self.switch_duration_secs
    }

    pub fn initial_pos(&self) -> f32 {
        self.initial_pos
    }

    pub fn initial_middle_pos(&self) -> f32 {
        self.initial_middle_pos
    }

    pub fn initial_hue(&self) -> f32 {
        self.initial_hue
    }
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            brightness_max: 0.5,
            element_count: ELEMENT_COUNT,
            speed: 1.0,
            hue_step: 0.0,
            mirror: true,
            switch_duration_secs: 2.0,
            initial_pos: 0.0,
            initial_middle_pos: 0.0,
            initial_hue: 0.0,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Brightness ceiling outside `0.0..=1.0`.
    BrightnessOutOfRange,

    /// The chain is too short for both panels.
    TooFewElements { count: usize, required: usize },

    /// Switch duration is zero, negative or not finite.
    InvalidSwitchDuration,

    /// Rotation speed is NaN or infinite.
    NonFiniteSpeed,

    /// Hue step is not finite or reaches a full turn in either direction.
    HueStepOutOfRange,

    /// An initial phase or hue lies outside its wrap range.
    PhaseOutOfRange,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::BrightnessOutOfRange => {
                write!(f, "brightness ceiling must be within 0.0..=1.0")
            }
            ConfigError::TooFewElements { count, required } => {
                write!(
                    f,
                    "element count {} is too small, both panels need {}",
                    count, required
                )
            }
            ConfigError::InvalidSwitchDuration => {
                write!(f, "ring switch duration must be a positive number of seconds")
            }
            ConfigError::NonFiniteSpeed => {
                write!(f, "rotation speed must be finite")
            }
            ConfigError::HueStepOutOfRange => {
                write!(f, "hue step must be finite and within -1.0..1.0 exclusive")
            }
            ConfigError::PhaseOutOfRange => {
                write!(
                    f,
                    "initial phases must be within 0.0..144.0 and hue within 0.0..1.0"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for validated [`SpiralConfig`] values.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: SpiralConfig,
}

impl ConfigBuilder {
    /// Creates a builder holding the defaults.
    pub fn new() -> Self {
        Self {
            config: SpiralConfig::default(),
        }
    }

    pub fn brightness_max(mut self, brightness: f32) -> Self {
        self.config.brightness_max = brightness;
        self
    }

    pub fn element_count(mut self, count: usize) -> Self {
        self.config.element_count = count;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    pub fn hue_step(mut self, step: f32) -> Self {
        self.config.hue_step = step;
        self
    }

    pub fn mirror(mut self, enabled: bool) -> Self {
        self.config.mirror = enabled;
        self
    }

    pub fn switch_duration_secs(mut self, secs: f32) -> Self {
        self.config.switch_duration_secs = secs;
        self
    }

    /// Seeds both rotation phases, e.g. from a hardware RNG.
    pub fn initial_phases(mut self, pos: f32, middle_pos: f32) -> Self {
        self.config.initial_pos = pos;
        self.config.initial_middle_pos = middle_pos;
        self
    }

    pub fn initial_hue(mut self, hue: f32) -> Self {
        self.config.initial_hue = hue;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found, checked in field order.
    pub fn build(self) -> Result<SpiralConfig, ConfigError> {
        let c = self.config;

        if !(0.0..=1.0).contains(&c.brightness_max) {
            return Err(ConfigError::BrightnessOutOfRange);
        }

        if c.element_count < ELEMENT_COUNT {
            return Err(ConfigError::TooFewElements {
                count: c.element_count,
                required: ELEMENT_COUNT,
            });
        }

        if !c.speed.is_finite() {
            return Err(ConfigError::NonFiniteSpeed);
        }

        if !(c.hue_step > -1.0 && c.hue_step < 1.0) {
            return Err(ConfigError::HueStepOutOfRange);
        }

        if !(c.switch_duration_secs.is_finite() && c.switch_duration_secs > 0.0) {
            return Err(ConfigError::InvalidSwitchDuration);
        }

        let phase_range = 0.0..PHASE_PERIOD;
        if !phase_range.contains(&c.initial_pos)
            || !phase_range.contains(&c.initial_middle_pos)
            || !(0.0..1.0).contains(&c.initial_hue)
        {
            return Err(ConfigError::PhaseOutOfRange);
        }

        Ok(c)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
