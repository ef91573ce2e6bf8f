//! Shared test infrastructure for hypno-spiral integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use hypno_spiral::{
    EyeFrameBuffer, OFF, Ring, SpiralAnimator, SpiralConfig, TimeDuration, TimeInstant,
    TimeSource, Topology,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestAnimator<'t> = SpiralAnimator<'t, TestInstant, EyeFrameBuffer, MockTimeSource>;

pub fn animator(timer: &MockTimeSource) -> TestAnimator<'_> {
    animator_with(timer, SpiralConfig::default())
}

pub fn animator_with(timer: &MockTimeSource, config: SpiralConfig) -> TestAnimator<'_> {
    SpiralAnimator::new(EyeFrameBuffer::new(), timer, config)
}

/// Shown colors of a ring on the first panel
pub fn ring_colors(strip: &EyeFrameBuffer, ring: Ring) -> Vec<u32> {
    ring.spec().indices().map(|i| strip.shown()[i]).collect()
}

/// Number of lit elements of a ring on the first panel
pub fn lit_count(strip: &EyeFrameBuffer, ring: Ring) -> usize {
    ring_colors(strip, ring).iter().filter(|c| **c != OFF).count()
}

/// Every element of the first panel shows the same color as its partner
pub fn panels_agree(strip: &EyeFrameBuffer, topology: &Topology) -> bool {
    (0..hypno_spiral::PANEL_ELEMENTS).all(|i| {
        let partner = topology.partner(i).unwrap();
        strip.shown()[i] == strip.shown()[partner]
    })
}

/// Compare two floats with tolerance
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1.0e-4
}
