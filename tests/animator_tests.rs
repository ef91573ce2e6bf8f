//! Integration tests for SpiralAnimator

mod common;
use common::*;

use hypno_spiral::{
    AnimatorAction, AnimatorError, AnimatorState, FrameBudget, OFF, PHASE_PERIOD, Ring,
    SpiralConfig,
};

#[test]
fn new_animator_is_idle_and_dark() {
    let timer = MockTimeSource::new();
    let animator = animator(&timer);

    assert_eq!(animator.state(), AnimatorState::Idle);
    assert!(animator.transition().is_none());
    assert_eq!(animator.strip().flush_count(), 1);
    assert!(animator.strip().shown().iter().all(|c| *c == OFF));
}

#[test]
fn service_requires_running_state() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);

    let result = animator.service();
    assert!(matches!(
        result,
        Err(AnimatorError::InvalidState {
            actual: AnimatorState::Idle,
            ..
        })
    ));
}

#[test]
fn first_frame_shows_only_the_fading_out_inner_ring() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);

    let report = animator.start().unwrap();
    assert_eq!(report.active, Ring::Outer);
    assert_eq!(report.previous, Ring::Inner);
    assert!(!report.committed);

    let strip = animator.strip();
    assert_eq!(strip.flush_count(), 2);
    assert_eq!(lit_count(strip, Ring::Outer), 0);
    assert_eq!(lit_count(strip, Ring::Middle), 0);

    let inner = ring_colors(strip, Ring::Inner);
    assert_ne!(inner[0], OFF);
    assert_eq!(inner[1], inner[0]);
    assert_eq!(inner[2], inner[0]);
    assert_eq!(inner[3], OFF);
}

#[test]
fn midway_through_fade_both_rings_share_half_brightness() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    timer.advance(1000);
    let report = animator.service().unwrap();
    assert!(approx_eq(report.eased, 0.5));

    let strip = animator.strip();
    assert_eq!(lit_count(strip, Ring::Outer), 8);
    assert_eq!(lit_count(strip, Ring::Middle), 0);
    assert_eq!(lit_count(strip, Ring::Inner), 3);

    let outer = ring_colors(strip, Ring::Outer);
    let inner = ring_colors(strip, Ring::Inner);
    let color = outer[0];
    assert_eq!(inner[0], color);

    // Pure red at a quarter of full scale.
    assert_eq!(color & 0xFFFF, 0);
    let red = color >> 16;
    assert!((63..=64).contains(&red), "red channel {}", red);
}

#[test]
fn second_eye_mirrors_first_every_frame() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    for _ in 0..60 {
        timer.advance(97);
        animator.service().unwrap();
        assert!(panels_agree(animator.strip(), animator.topology()));
    }
}

#[test]
fn second_eye_repeats_first_without_mirror() {
    let timer = MockTimeSource::new();
    let config = SpiralConfig::builder().mirror(false).build().unwrap();
    let mut animator = animator_with(&timer, config);
    animator.start().unwrap();

    for _ in 0..30 {
        timer.advance(150);
        animator.service().unwrap();
        let shown = animator.strip().shown();
        for i in 0..44 {
            assert_eq!(shown[i], shown[i + 44]);
        }
    }
}

#[test]
fn idle_ring_stays_dark() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    for _ in 0..200 {
        timer.advance(73);
        let report = animator.service().unwrap();
        let idle = Ring::ALL
            .into_iter()
            .find(|r| *r != report.active && *r != report.previous)
            .unwrap();
        assert_eq!(lit_count(animator.strip(), idle), 0);
    }
}

#[test]
fn ring_switches_after_two_seconds() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    timer.advance(2000);
    let report = animator.service().unwrap();
    assert!(report.committed);
    assert_eq!(report.active, Ring::Middle);
    assert_eq!(report.previous, Ring::Outer);
    assert_eq!(report.eased, 0.0);

    let transition = animator.transition().unwrap();
    assert_eq!(transition.started_at(), TestInstant(2000));

    // Incoming middle ring starts dark, outgoing outer ring at full.
    assert_eq!(lit_count(animator.strip(), Ring::Middle), 0);
    assert_eq!(lit_count(animator.strip(), Ring::Outer), 8);
}

#[test]
fn phases_return_home_after_full_revolution() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();
    assert_eq!(animator.rotation().pos(), 1.0);
    assert_eq!(animator.rotation().middle_pos(), 143.0);

    animator.run(FrameBudget::Finite(143)).unwrap();
    assert_eq!(animator.rotation().pos(), 0.0);
    assert_eq!(animator.rotation().middle_pos(), 0.0);
}

#[test]
fn phases_and_hue_stay_in_range() {
    let timer = MockTimeSource::new();
    let config = SpiralConfig::builder()
        .speed(3.7)
        .hue_step(0.25)
        .build()
        .unwrap();
    let mut animator = animator_with(&timer, config);
    animator.start().unwrap();

    for _ in 0..1000 {
        timer.advance(16);
        animator.service().unwrap();
        let rotation = animator.rotation();
        assert!((0.0..PHASE_PERIOD).contains(&rotation.pos()));
        assert!((0.0..PHASE_PERIOD).contains(&rotation.middle_pos()));
        assert!((0.0..1.0).contains(&rotation.hue()));
    }
}

#[test]
fn initial_phases_come_from_config() {
    let timer = MockTimeSource::new();
    let config = SpiralConfig::builder()
        .initial_phases(10.0, 20.0)
        .build()
        .unwrap();
    let mut animator = animator_with(&timer, config);
    assert_eq!(animator.rotation().pos(), 10.0);

    animator.start().unwrap();
    assert_eq!(animator.rotation().pos(), 11.0);
    assert_eq!(animator.rotation().middle_pos(), 19.0);
}

#[test]
fn run_renders_exact_frame_budget() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);

    let frames = animator.run(FrameBudget::Finite(5)).unwrap();
    assert_eq!(frames, 5);
    assert_eq!(animator.state(), AnimatorState::Running);
    assert_eq!(animator.strip().flush_count(), 6);
}

#[test]
fn run_until_stops_when_cancelled() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);

    let mut checks = 0;
    let frames = animator
        .run_until(|| {
            checks += 1;
            timer.advance(16);
            checks > 7
        })
        .unwrap();

    assert_eq!(frames, 7);
    assert_eq!(animator.strip().flush_count(), 8);
}

#[test]
fn pause_holds_frame_and_resume_continues_fade() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    timer.advance(500);
    animator.service().unwrap();
    animator.pause().unwrap();
    assert!(animator.is_paused());

    let flushes = animator.strip().flush_count();
    assert!(animator.service().is_err());
    assert!(animator.run(FrameBudget::Finite(1)).is_err());
    assert_eq!(animator.strip().flush_count(), flushes);

    timer.advance(10_000);
    let report = animator.resume().unwrap();
    assert!(!report.committed);
    assert_eq!(report.active, Ring::Outer);
    assert_eq!(animator.transition().unwrap().started_at(), TestInstant(10_000));

    timer.advance(1500);
    let report = animator.service().unwrap();
    assert!(report.committed);
    assert_eq!(report.active, Ring::Middle);
}

#[test]
fn stop_blanks_both_panels() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();
    timer.advance(1000);
    animator.service().unwrap();

    animator.stop().unwrap();
    assert_eq!(animator.state(), AnimatorState::Idle);
    assert!(animator.transition().is_none());
    assert!(animator.strip().shown().iter().all(|c| *c == OFF));

    assert!(matches!(
        animator.stop(),
        Err(AnimatorError::InvalidState { .. })
    ));
}

#[test]
fn start_requires_idle_state() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();

    assert!(matches!(
        animator.start(),
        Err(AnimatorError::InvalidState {
            actual: AnimatorState::Running,
            ..
        })
    ));
}

#[test]
fn restart_after_stop_begins_at_outer_ring() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.start().unwrap();
    timer.advance(4500);
    animator.service().unwrap();
    animator.stop().unwrap();

    let report = animator.start().unwrap();
    assert_eq!(report.active, Ring::Outer);
    assert_eq!(report.previous, Ring::Inner);
    assert_eq!(animator.transition().unwrap().started_at(), TestInstant(4500));
}

#[test]
fn handle_action_dispatches_controls() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);

    let report = animator.handle_action(AnimatorAction::Start).unwrap();
    assert!(report.is_some());

    assert_eq!(animator.handle_action(AnimatorAction::Pause), Ok(None));
    assert!(animator.is_paused());

    let report = animator.handle_action(AnimatorAction::Resume).unwrap();
    assert!(report.is_some());
    assert!(animator.is_running());

    assert_eq!(animator.handle_action(AnimatorAction::Stop), Ok(None));
    assert!(animator.handle_action(AnimatorAction::Resume).is_err());
}

#[test]
fn release_returns_strip() {
    let timer = MockTimeSource::new();
    let mut animator = animator(&timer);
    animator.run(FrameBudget::Finite(3)).unwrap();

    let strip = animator.release();
    assert_eq!(strip.flush_count(), 4);
}

#[test]
fn degenerate_configs_never_reach_the_animator() {
    assert!(
        SpiralConfig::builder()
            .switch_duration_secs(0.0)
            .build()
            .is_err()
    );
    assert!(SpiralConfig::builder().element_count(44).build().is_err());

    // Whatever the builder accepts renders finite fades without a switch per frame.
    let timer = MockTimeSource::new();
    let config = SpiralConfig::builder()
        .switch_duration_secs(0.05)
        .build()
        .unwrap();
    let mut animator = animator_with(&timer, config);
    let first = animator.start().unwrap();
    assert!(first.eased.is_finite());
    assert!(!first.committed);

    let mut switches = 0;
    for _ in 0..10 {
        timer.advance(16);
        let report = animator.service().unwrap();
        assert!(report.eased.is_finite());
        if report.committed {
            switches += 1;
        }
    }
    // 160 ms at 50 ms per fade.
    assert_eq!(switches, 2);
}

#[test]
fn negative_hue_step_wraps_into_range() {
    let timer = MockTimeSource::new();
    let config = SpiralConfig::builder().hue_step(-0.25).build().unwrap();
    let mut animator = animator_with(&timer, config);
    animator.start().unwrap();
    assert_eq!(animator.rotation().hue(), 0.75);

    animator.run(FrameBudget::Finite(2)).unwrap();
    assert_eq!(animator.rotation().hue(), 0.25);
}
