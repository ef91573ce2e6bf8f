#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SpiralAnimator`**: Owns the strip and animation state, renders one frame per `service`
//! - **`SpiralConfig`**: Brightness ceiling, rotation speed, hue drift, mirror mode, fade length
//! - **`Topology`**: Ring layout and mirrored write path onto both eye panels
//! - **`RingTransition`**: Eased cross-fade that bounces outer → middle → inner → middle → ...
//! - **`Rotation`**: The shared and counter-rotating phases plus the hue
//! - **`PixelStrip`**: Trait to implement for your LED chain
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`AnimatorAction`**: Commands that can be sent to control the animator
//!
//! Colors are built in HSV through `palette` and handed to the strip packed as
//! `0x00RRGGBB`.

pub mod animator;
pub mod colors;
pub mod command;
pub mod config;
pub mod phase;
pub mod renderer;
pub mod strip;
pub mod time;
pub mod topology;
pub mod transition;

pub use animator::{AnimatorError, AnimatorState, FrameBudget, FrameReport, SpiralAnimator};
pub use colors::OFF;
pub use command::AnimatorAction;
pub use config::{ConfigBuilder, ConfigError, SpiralConfig};
pub use phase::{PHASE_PERIOD, Rotation};
pub use strip::{FrameBuffer, PixelStrip};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use topology::{
    ELEMENT_COUNT, MIRROR_INDEX, PANEL_ELEMENTS, RING_SPECS, Ring, RingSpec, Topology,
    TopologyError,
};
pub use transition::{Direction, Fade, RingTransition};

/// Frame buffer sized for both eye panels.
pub type EyeFrameBuffer = FrameBuffer<ELEMENT_COUNT>;
