// Tests for the loudness-to-mood mapping and mood state invariants.

use mood_core::mood::{mood_from_level, normalized_level, Emotion, MoodKind, MoodState};

#[test]
fn level_bands_map_to_the_four_kinds() {
    assert_eq!(mood_from_level(0.9, 0.0).kind, MoodKind::Energetic);
    assert_eq!(mood_from_level(0.55, 0.0).kind, MoodKind::Creative);
    assert_eq!(mood_from_level(0.25, 0.0).kind, MoodKind::Melancholy);
    assert_eq!(mood_from_level(0.05, 0.0).kind, MoodKind::Neutral);
}

#[test]
fn band_edges_fall_into_the_lower_band() {
    // Thresholds are strictly greater-than.
    assert_eq!(mood_from_level(0.7, 0.0).kind, MoodKind::Creative);
    assert_eq!(mood_from_level(0.4, 0.0).kind, MoodKind::Melancholy);
    assert_eq!(mood_from_level(0.1, 0.0).kind, MoodKind::Neutral);
}

#[test]
fn the_level_becomes_the_intensity() {
    for level in [0.0_f32, 0.3, 0.62, 1.0] {
        let mood = mood_from_level(level, 0.0);
        assert_eq!(mood.intensity, level);
        assert_eq!(mood.confidence, 0.8);
    }
    // Out-of-range input is clamped, not propagated.
    assert_eq!(mood_from_level(1.7, 0.0).intensity, 1.0);
}

#[test]
fn happy_and_calm_survive_in_the_dominant_slot() {
    assert_eq!(mood_from_level(0.8, 0.0).dominant, Some(Emotion::Energetic));
    assert_eq!(mood_from_level(0.5, 0.0).dominant, Some(Emotion::Happy));
    assert_eq!(mood_from_level(0.2, 0.0).dominant, Some(Emotion::Calm));
    assert_eq!(mood_from_level(0.05, 0.0).dominant, None);
}

#[test]
fn spectrum_mean_is_normalized() {
    assert_eq!(normalized_level(&[]), 0.0);
    assert_eq!(normalized_level(&[0; 128]), 0.0);
    assert_eq!(normalized_level(&[255; 128]), 1.0);
    assert!((normalized_level(&[0, 255]) - 0.5).abs() < 1e-3);
}

#[test]
fn the_initial_mood_is_a_playable_neutral() {
    let initial = MoodState::initial(0.0);
    assert_eq!(initial.kind, MoodKind::Neutral);
    assert_eq!(initial.intensity, 0.5);
    assert_eq!(initial.confidence, 1.0);
    // Above the 0.1 intensity gate, so background audio restarts on reset.
    assert!(initial.intensity > 0.1);
}
