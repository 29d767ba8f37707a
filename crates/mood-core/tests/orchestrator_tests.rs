// Tests for the mood -> scene parameter derivation.

use mood_core::mood::{MoodKind, MoodState};
use mood_core::orchestrator::{derive, preset};

const KINDS: [MoodKind; 4] = [
    MoodKind::Creative,
    MoodKind::Melancholy,
    MoodKind::Energetic,
    MoodKind::Neutral,
];

#[test]
fn spawn_rate_and_velocity_scale_linearly_with_intensity() {
    for kind in KINDS {
        let base = preset(kind);
        for step in 0..=10 {
            let intensity = step as f32 / 10.0;
            let mood = MoodState::new(kind, intensity, 1.0, 0.0);
            let derived = derive(&mood);
            assert!(
                (derived.spawn_rate - base.spawn_rate * intensity).abs() < 1e-6,
                "spawn rate for {kind:?} at {intensity}"
            );
            assert!(
                (derived.velocity - base.velocity * intensity).abs() < 1e-6,
                "velocity for {kind:?} at {intensity}"
            );
        }
    }
}

#[test]
fn zero_intensity_stills_the_scene() {
    let mood = MoodState::new(MoodKind::Energetic, 0.0, 1.0, 0.0);
    let derived = derive(&mood);
    assert_eq!(derived.spawn_rate, 0.0);
    assert_eq!(derived.velocity, 0.0);
}

#[test]
fn description_appends_rounded_intensity_percentage() {
    let mood = MoodState::new(MoodKind::Creative, 0.72, 1.0, 0.0);
    let derived = derive(&mood);
    assert!(
        derived.description.ends_with("(72% intensity)"),
        "got: {}",
        derived.description
    );
    assert!(derived
        .description
        .starts_with(preset(MoodKind::Creative).description));
}

#[test]
fn non_scaled_fields_pass_through_from_the_preset() {
    for kind in KINDS {
        let base = preset(kind);
        let mood = MoodState::new(kind, 0.4, 1.0, 0.0);
        let derived = derive(&mood);
        assert_eq!(derived.background, base.background);
        assert_eq!(derived.soundscape, base.soundscape);
        assert_eq!(derived.particle_types, base.particle_types);
    }
}

#[test]
fn every_kind_has_a_distinct_soundscape() {
    let mut files: Vec<&str> = KINDS.iter().map(|&k| preset(k).soundscape).collect();
    files.sort_unstable();
    files.dedup();
    assert_eq!(files.len(), KINDS.len());
    for file in files {
        assert!(file.ends_with(".mp3"), "unexpected resource name: {file}");
    }
}

#[test]
fn state_constructor_clamps_out_of_range_inputs() {
    let mood = MoodState::new(MoodKind::Neutral, 1.7, -0.2, 0.0);
    assert_eq!(mood.intensity, 1.0);
    assert_eq!(mood.confidence, 0.0);
}
