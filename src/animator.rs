//! Frame loop driving the spiral on a [`PixelStrip`].
//!
//! Provides [`SpiralAnimator`], which owns the strip and all animation state,
//! and renders one frame per [`service`](SpiralAnimator::service) call using
//! real elapsed time from a [`TimeSource`].

use crate::colors::OFF;
use crate::command::AnimatorAction;
use crate::config::SpiralConfig;
use crate::phase::Rotation;
use crate::renderer::render_frame;
use crate::strip::PixelStrip;
use crate::time::{TimeInstant, TimeSource};
use crate::topology::{Ring, Topology, TopologyError};
use crate::transition::RingTransition;

/// The current state of an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorState {
    /// Not started, or stopped. Both panels are dark.
    Idle,
    /// Rendering frames.
    Running,
    /// Holding the last rendered frame.
    Paused,
}

/// How many frames a bounded run may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBudget {
    /// Render exactly this many frames.
    Finite(u32),
    /// Render until an error occurs.
    Infinite,
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Ring fading in.
    pub active: Ring,
    /// Ring fading out.
    pub previous: Ring,
    /// Eased cross-fade progress used for this frame.
    pub eased: f32,
    /// A ring switch happened on this frame.
    pub committed: bool,
}

/// Errors that can occur during animator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Which state(s) the operation accepts.
        expected: &'static str,
        /// The actual current state.
        actual: AnimatorState,
    },
    /// A write fell outside the chain.
    Topology(TopologyError),
}

impl core::fmt::Display for AnimatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AnimatorError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but animator is in {:?}",
                    expected, actual
                )
            }
            AnimatorError::Topology(err) => write!(f, "topology error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AnimatorError {}

impl From<TopologyError> for AnimatorError {
    fn from(err: TopologyError) -> Self {
        AnimatorError::Topology(err)
    }
}

/// Drives the hypnotic spiral on both eye panels.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `S` - Strip implementation type
/// * `T` - Time source implementation type
pub struct SpiralAnimator<'t, I: TimeInstant, S: PixelStrip, T: TimeSource<I>> {
    strip: S,
    time_source: &'t T,
    config: SpiralConfig,
    topology: Topology,
    state: AnimatorState,
    rotation: Rotation,
    transition: Option<RingTransition<I>>,
    pause_start_time: Option<I>,
}

impl<'t, I: TimeInstant, S: PixelStrip, T: TimeSource<I>> SpiralAnimator<'t, I, S, T> {
    /// Creates an idle animator and blanks the strip.
    pub fn new(strip: S, time_source: &'t T, config: SpiralConfig) -> Self {
        let mut animator = Self {
            strip,
            time_source,
            config,
            topology: Topology::new(config.mirror(), config.element_count()),
            state: AnimatorState::Idle,
            rotation: Self::initial_rotation(&config),
            transition: None,
            pause_start_time: None,
        };
        animator.blank();
        animator
    }

    fn initial_rotation(config: &SpiralConfig) -> Rotation {
        Rotation::new(
            config.initial_pos(),
            config.initial_middle_pos(),
            config.initial_hue(),
        )
    }

    /// Dispatches a queued control request.
    ///
    /// # Returns
    /// * `Ok(Some(report))` - The action rendered a frame (`Start`, `Resume`)
    /// * `Ok(None)` - The action rendered nothing
    /// * `Err` - Invalid state for the action
    pub fn handle_action(
        &mut self,
        action: AnimatorAction,
    ) -> Result<Option<FrameReport>, AnimatorError> {
        match action {
            AnimatorAction::Start => self.start().map(Some),
            AnimatorAction::Pause => {
                self.pause()?;
                Ok(None)
            }
            AnimatorAction::Resume => self.resume().map(Some),
            AnimatorAction::Stop => {
                self.stop()?;
                Ok(None)
            }
        }
    }

    /// Starts the animation from the outer ring and renders the first frame.
    ///
    /// Must be called from `Idle` state.
    pub fn start(&mut self) -> Result<FrameReport, AnimatorError> {
        if self.state != AnimatorState::Idle {
            return Err(AnimatorError::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        self.begin();
        self.service()
    }

    fn begin(&mut self) {
        self.rotation = Self::initial_rotation(&self.config);
        self.transition = Some(RingTransition::new(self.time_source.now()));
        self.pause_start_time = None;
        self.state = AnimatorState::Running;

        #[cfg(feature = "defmt")]
        defmt::info!("spiral started");
    }

    /// Renders and flushes one frame, then advances the rotation.
    ///
    /// The frame uses the rotation left by the previous frame and the fade
    /// progress at the current instant. Must be called from `Running` state.
    ///
    /// # Errors
    /// On a `Topology` error the fade has already advanced (possibly switching
    /// rings) but no frame is flushed and the rotation does not move.
    pub fn service(&mut self) -> Result<FrameReport, AnimatorError> {
        let not_running = AnimatorError::InvalidState {
            expected: "Running",
            actual: self.state,
        };
        if self.state != AnimatorState::Running {
            return Err(not_running);
        }
        let transition = self.transition.as_mut().ok_or(not_running)?;

        let now = self.time_source.now();
        let fade = transition.update(now, self.config.switch_duration_secs());
        let transition = *transition;
        let max = self.config.brightness_max();

        render_frame(&mut self.strip, &self.topology, &self.rotation, |ring| {
            transition.brightness(ring, fade.eased, max)
        })?;
        self.strip.flush();

        self.rotation.advance(self.config.speed(), self.config.hue_step());

        Ok(FrameReport {
            active: transition.active(),
            previous: transition.previous(),
            eased: fade.eased,
            committed: fade.committed,
        })
    }

    /// Renders frames until the budget is spent, starting first if idle.
    ///
    /// Returns the number of frames rendered. With `FrameBudget::Infinite`
    /// this only returns on error.
    pub fn run(&mut self, budget: FrameBudget) -> Result<u32, AnimatorError> {
        self.prepare_run()?;

        match budget {
            FrameBudget::Finite(frames) => {
                for _ in 0..frames {
                    self.service()?;
                }
                Ok(frames)
            }
            FrameBudget::Infinite => loop {
                self.service()?;
            },
        }
    }

    /// Renders frames until `cancel` returns true, starting first if idle.
    ///
    /// `cancel` is checked before every frame. Returns the number of frames
    /// rendered.
    pub fn run_until<F: FnMut() -> bool>(&mut self, mut cancel: F) -> Result<u32, AnimatorError> {
        self.prepare_run()?;

        let mut frames: u32 = 0;
        while !cancel() {
            self.service()?;
            frames = frames.wrapping_add(1);
        }
        Ok(frames)
    }

    fn prepare_run(&mut self) -> Result<(), AnimatorError> {
        match self.state {
            AnimatorState::Idle => {
                self.begin();
                Ok(())
            }
            AnimatorState::Running => Ok(()),
            AnimatorState::Paused => Err(AnimatorError::InvalidState {
                expected: "Idle or Running",
                actual: self.state,
            }),
        }
    }

    /// Freezes the current frame.
    ///
    /// Must be called from `Running` state.
    pub fn pause(&mut self) -> Result<(), AnimatorError> {
        if self.state != AnimatorState::Running {
            return Err(AnimatorError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        self.pause_start_time = Some(self.time_source.now());
        self.state = AnimatorState::Paused;

        #[cfg(feature = "defmt")]
        defmt::info!("spiral paused");
        Ok(())
    }

    /// Resumes a paused animation and renders a frame.
    ///
    /// The cross-fade continues from where it was paused. Must be called from
    /// `Paused` state.
    pub fn resume(&mut self) -> Result<FrameReport, AnimatorError> {
        if self.state != AnimatorState::Paused {
            return Err(AnimatorError::InvalidState {
                expected: "Paused",
                actual: self.state,
            });
        }

        let now = self.time_source.now();
        if let (Some(paused_at), Some(transition)) =
            (self.pause_start_time.take(), self.transition.as_mut())
        {
            transition.postpone(now.duration_since(paused_at));
        }
        self.state = AnimatorState::Running;

        #[cfg(feature = "defmt")]
        defmt::info!("spiral resumed");
        self.service()
    }

    /// Blanks both panels and returns to `Idle`.
    ///
    /// Can be called from `Running` or `Paused`.
    pub fn stop(&mut self) -> Result<(), AnimatorError> {
        match self.state {
            AnimatorState::Running | AnimatorState::Paused => {
                self.transition = None;
                self.pause_start_time = None;
                self.state = AnimatorState::Idle;
                self.blank();

                #[cfg(feature = "defmt")]
                defmt::info!("spiral stopped");
                Ok(())
            }
            AnimatorState::Idle => Err(AnimatorError::InvalidState {
                expected: "Running or Paused",
                actual: self.state,
            }),
        }
    }

    fn blank(&mut self) {
        for index in 0..self.config.element_count() {
            self.strip.write_element(index, OFF);
        }
        self.strip.flush();
    }

    /// Returns the current state of the animator.
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == AnimatorState::Paused
    }

    /// Rotation that the next frame will be drawn with.
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Cross-fade state, if started.
    pub fn transition(&self) -> Option<&RingTransition<I>> {
        self.transition.as_ref()
    }

    pub fn config(&self) -> &SpiralConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Consumes the animator and hands back the strip.
    pub fn release(self) -> S {
        self.strip
    }
}
