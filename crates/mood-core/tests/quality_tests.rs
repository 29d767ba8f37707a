// Tests for the adaptive quality state machine and fps sampling.

use mood_core::quality::{FrameStats, QualityController, QualityTier};

#[test]
fn tier_settings_table_is_fixed() {
    let high = QualityTier::High.settings();
    assert_eq!(high.particle_budget, 2000);
    assert!((high.resolution_scale - 1.0).abs() < 1e-6);
    assert!(high.effects_enabled);

    let medium = QualityTier::Medium.settings();
    assert_eq!(medium.particle_budget, 1000);
    assert!((medium.resolution_scale - 0.75).abs() < 1e-6);
    assert!(medium.effects_enabled);

    let low = QualityTier::Low.settings();
    assert_eq!(low.particle_budget, 500);
    assert!((low.resolution_scale - 0.5).abs() < 1e-6);
    assert!(!low.effects_enabled);
}

#[test]
fn low_fps_forces_low_from_any_tier() {
    for start in [QualityTier::High, QualityTier::Medium] {
        let mut controller = QualityController::new(start);
        // Put the anchor somewhere a healthy session would have it.
        controller.observe(60.0);
        let change = controller.observe(25.0);
        assert_eq!(
            change,
            Some(QualityTier::Low),
            "fast degrade failed from {:?}",
            start
        );
        assert_eq!(controller.tier(), QualityTier::Low);
    }
}

#[test]
fn upgrade_scenario_medium_to_high_fires_once() {
    let mut controller = QualityController::new(QualityTier::Medium);
    let mut transitions = Vec::new();
    for fps in [58.0, 59.0, 61.0, 62.0] {
        if let Some(tier) = controller.observe(fps) {
            transitions.push((fps, tier));
        }
    }
    assert_eq!(
        transitions,
        vec![(61.0, QualityTier::High)],
        "expected exactly one transition, on the first sample >= 60"
    );
}

#[test]
fn observe_is_idempotent_for_repeated_samples() {
    let mut controller = QualityController::new(QualityTier::Medium);
    assert_eq!(controller.observe(62.0), Some(QualityTier::High));
    for _ in 0..10 {
        assert_eq!(controller.observe(62.0), None, "repeated sample re-emitted");
    }
}

#[test]
fn dead_band_absorbs_single_frame_glitches() {
    let mut controller = QualityController::new(QualityTier::High);
    assert_eq!(controller.observe(61.0), None); // already high
    // A sample within +-5 of the last applied transition fps is ignored,
    // even if it crosses a rule boundary.
    controller.observe(25.0); // high -> low, anchor 25
    assert_eq!(controller.tier(), QualityTier::Low);
    assert_eq!(controller.observe(29.0), None);
    assert_eq!(controller.tier(), QualityTier::Low);
}

#[test]
fn mid_band_holds_the_current_tier() {
    let mut controller = QualityController::new(QualityTier::High);
    for fps in [31.0, 38.0, 44.0] {
        assert_eq!(controller.observe(fps), None, "30..45 must hold at {fps}");
        assert_eq!(controller.tier(), QualityTier::High);
    }
}

#[test]
fn medium_band_targets_medium() {
    let mut controller = QualityController::new(QualityTier::High);
    assert_eq!(controller.observe(50.0), Some(QualityTier::Medium));
    let mut controller = QualityController::new(QualityTier::Low);
    assert_eq!(controller.observe(45.0), Some(QualityTier::Medium));
}

#[test]
fn recovery_path_low_to_high() {
    let mut controller = QualityController::new(QualityTier::High);
    assert_eq!(controller.observe(20.0), Some(QualityTier::Low));
    assert_eq!(controller.observe(52.0), Some(QualityTier::Medium));
    assert_eq!(controller.observe(61.0), Some(QualityTier::High));
}

#[test]
fn frame_stats_emit_once_per_window() {
    let mut stats = FrameStats::new(0.0);
    let mut samples = Vec::new();
    // 60 fps for two seconds: frames every ~16.67 ms.
    for frame in 1..=120 {
        let now = frame as f64 * (1000.0 / 60.0);
        if let Some(s) = stats.on_frame(now) {
            samples.push(s);
        }
    }
    assert_eq!(samples.len(), 2, "expected one sample per second");
    for s in &samples {
        assert!(
            (s.fps - 60.0).abs() <= 1.0,
            "fps sample off: {}",
            s.fps
        );
        assert!(s.render_time_ms > 0.0);
    }
}

#[test]
fn frame_stats_track_slow_frames() {
    let mut stats = FrameStats::new(0.0);
    let mut last = None;
    // 20 fps: 50 ms frames.
    for frame in 1..=40 {
        if let Some(s) = stats.on_frame(frame as f64 * 50.0) {
            last = Some(s);
        }
    }
    let sample = last.expect("expected at least one sample");
    assert!((sample.fps - 20.0).abs() <= 1.0, "fps: {}", sample.fps);
    assert!((sample.render_time_ms - 50.0).abs() < 1e-6);
}
