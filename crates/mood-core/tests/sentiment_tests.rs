// Host-side tests for the lexical mood inference.

use mood_core::mood::{Emotion, MoodKind};
use mood_core::sentiment::{analyze, analyze_fast};

#[test]
fn zero_matches_return_neutral_fallback() {
    for text in ["", "the weather is cloudy today", "12345 !!!", "lorem ipsum dolor"] {
        let mood = analyze(text, 0.0);
        assert_eq!(mood.kind, MoodKind::Neutral, "text: {text:?}");
        assert!((mood.intensity - 0.3).abs() < 1e-6);
        assert!((mood.confidence - 0.7).abs() < 1e-6);
        assert!(mood.dominant.is_none());
    }
}

#[test]
fn fast_analyzer_shares_the_neutral_fallback() {
    let mood = analyze_fast("nothing emotional here", 0.0);
    assert_eq!(mood.kind, MoodKind::Neutral);
    assert!((mood.intensity - 0.3).abs() < 1e-6);
    assert!((mood.confidence - 0.7).abs() < 1e-6);
}

#[test]
fn creative_and_happy_scenario() {
    // "creative" keyword (1) + "feel creative" phrase (2) beats "happy" (1).
    let mood = analyze("I feel creative and happy!", 0.0);
    assert_eq!(mood.dominant, Some(Emotion::Creative));
    assert_eq!(mood.kind, MoodKind::Creative);
    assert!(
        mood.intensity >= 0.6,
        "expected intensity >= 0.6, got {}",
        mood.intensity
    );
    // confidence = max(3/4, 0.8)
    assert!((mood.confidence - 0.8).abs() < 1e-6);
}

#[test]
fn happy_remaps_to_creative() {
    let mood = analyze("joy and laugh and smile", 0.0);
    assert_eq!(mood.dominant, Some(Emotion::Happy));
    assert_eq!(mood.kind, MoodKind::Creative);
}

#[test]
fn tie_break_prefers_first_declared_category() {
    // One keyword each for melancholy and energetic; creative declared
    // first but scores zero, melancholy wins the tie.
    let mood = analyze("sad but pumped", 0.0);
    assert_eq!(mood.dominant, Some(Emotion::Melancholy));
    assert_eq!(mood.kind, MoodKind::Melancholy);
}

#[test]
fn tokenization_is_case_and_punctuation_insensitive() {
    let a = analyze("ENERGY!!! energy, Energy.", 0.0);
    assert_eq!(a.kind, MoodKind::Energetic);
    let b = analyze("energy energy energy", 0.0);
    assert_eq!(a.kind, b.kind);
    assert!((a.intensity - b.intensity).abs() < 1e-6);
}

#[test]
fn substrings_do_not_match_keywords() {
    // "arts" is not "art", "sadness" is not "sad".
    let mood = analyze("arts sadness happiness", 0.0);
    assert_eq!(mood.kind, MoodKind::Neutral);
}

#[test]
fn phrase_bonus_outweighs_single_keywords() {
    // "so energized" phrase (+2) beats one melancholy keyword.
    let mood = analyze("calm but so energized", 0.0);
    assert_eq!(mood.dominant, Some(Emotion::Energetic));
}

#[test]
fn intensity_modifier_scales_but_never_exceeds_one() {
    // 5+ energetic keywords saturate score/5 at 1.0; modifier 1.5 must
    // still clamp to 1.
    let mood = analyze("energy excite dynamic active vibrant alive power", 0.0);
    assert_eq!(mood.kind, MoodKind::Energetic);
    assert!((mood.intensity - 1.0).abs() < 1e-6);
    assert!(mood.confidence <= 1.0);
}

#[test]
fn melancholy_modifier_dampens_intensity() {
    // Two melancholy keywords: (2/5) * 0.8 = 0.32.
    let mood = analyze("sad memory", 0.0);
    assert_eq!(mood.kind, MoodKind::Melancholy);
    assert!((mood.intensity - 0.32).abs() < 1e-5);
}

#[test]
fn intensity_and_confidence_always_in_unit_range() {
    let samples = [
        "happy happy happy happy happy happy happy happy",
        "create design imagine inspire art paint draw write compose",
        "sad",
        "so excited feel happy wonderful amazing",
        "full of energy so energized pumped thrilled",
    ];
    for text in samples {
        for mood in [analyze(text, 0.0), analyze_fast(text, 0.0)] {
            assert!(
                (0.0..=1.0).contains(&mood.intensity),
                "intensity out of range for {text:?}: {}",
                mood.intensity
            );
            assert!(
                (0.0..=1.0).contains(&mood.confidence),
                "confidence out of range for {text:?}: {}",
                mood.confidence
            );
        }
    }
}

#[test]
fn fast_analyzer_uses_coarser_intensity_and_floor() {
    // One creative keyword: intensity 1/3, confidence max(1.0, 0.6) = 1.0.
    let mood = analyze_fast("creative", 0.0);
    assert_eq!(mood.kind, MoodKind::Creative);
    assert!((mood.intensity - 1.0 / 3.0).abs() < 1e-6);
    assert!((mood.confidence - 1.0).abs() < 1e-6);
}

#[test]
fn fast_analyzer_ignores_phrases() {
    // "so energized" only counts the "energized" keyword in the fast table.
    let fast = analyze_fast("so energized", 0.0);
    assert_eq!(fast.kind, MoodKind::Energetic);
    assert!((fast.intensity - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn fast_analyzer_counts_happy_under_creative() {
    let mood = analyze_fast("happy", 0.0);
    assert_eq!(mood.dominant, Some(Emotion::Creative));
    assert_eq!(mood.kind, MoodKind::Creative);
}

#[test]
fn recorded_emotions_list_the_hit_categories() {
    let mood = analyze("creative and thrilled", 0.0);
    assert!(mood.emotions.contains(&Emotion::Creative));
    assert!(mood.emotions.contains(&Emotion::Energetic));
}
