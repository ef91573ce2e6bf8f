//! Command-based control for the animator.

/// Control requests a host can queue (e.g. from a button interrupt) and
/// dispatch with [`SpiralAnimator::handle_action`](crate::SpiralAnimator::handle_action).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimatorAction {
    /// Start from the first ring.
    Start,
    /// Freeze the current frame.
    Pause,
    /// Continue a paused animation.
    Resume,
    /// Blank both panels.
    Stop,
}
