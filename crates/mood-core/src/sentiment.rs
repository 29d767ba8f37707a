//! Lexical mood inference.
//!
//! A fixed keyword table is scored against the tokenized input. [`analyze`]
//! is the full scorer with phrase bonuses and per-category intensity
//! modifiers; [`analyze_fast`] is the cheaper variant for performance mode.

use crate::mood::{Emotion, MoodKind, MoodState};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::sync::OnceLock;

/// Scoring order. Ties are broken by this declaration order, first wins.
/// That tie-break is load-bearing for callers and covered by tests.
const CATEGORIES: [Emotion; 4] = [
    Emotion::Creative,
    Emotion::Melancholy,
    Emotion::Energetic,
    Emotion::Happy,
];

struct Pattern {
    emotion: Emotion,
    keywords: &'static [&'static str],
    /// Scales the intensity of the winning category.
    intensity_modifier: f32,
}

const PATTERNS: [Pattern; 4] = [
    Pattern {
        emotion: Emotion::Creative,
        keywords: &[
            "create", "design", "imagine", "inspire", "art", "paint", "draw", "write", "compose",
            "innovate", "creative", "inspired",
        ],
        intensity_modifier: 1.2,
    },
    Pattern {
        emotion: Emotion::Melancholy,
        keywords: &[
            "sad", "calm", "peaceful", "quiet", "serene", "reflect", "memory", "nostalgia",
            "thoughtful", "contemplative", "melancholy", "blue",
        ],
        intensity_modifier: 0.8,
    },
    Pattern {
        emotion: Emotion::Energetic,
        keywords: &[
            "energy", "excite", "dynamic", "active", "vibrant", "alive", "power", "intense",
            "thrilled", "pumped", "energetic", "lively",
        ],
        intensity_modifier: 1.5,
    },
    Pattern {
        emotion: Emotion::Happy,
        keywords: &[
            "happy", "joy", "smile", "laugh", "fun", "great", "wonderful", "amazing", "delighted",
            "ecstatic", "joyful", "pleased",
        ],
        intensity_modifier: 1.3,
    },
];

/// Fixed multi-word phrases worth a +2 score bonus for their category.
const PHRASES: [(&str, Emotion); 8] = [
    ("feel creative", Emotion::Creative),
    ("so inspired", Emotion::Creative),
    ("feel calm", Emotion::Melancholy),
    ("bit sad", Emotion::Melancholy),
    ("so energized", Emotion::Energetic),
    ("full of energy", Emotion::Energetic),
    ("feel happy", Emotion::Happy),
    ("so excited", Emotion::Happy),
];

/// Smaller table for the fast analyzer. Note happy words appear under
/// creative here, so the fast path never emits a happy category at all.
const FAST_KEYWORDS: [(Emotion, &[&str]); 4] = [
    (
        Emotion::Creative,
        &[
            "creative", "happy", "inspired", "artistic", "imagine", "create", "design", "paint",
            "draw",
        ],
    ),
    (
        Emotion::Melancholy,
        &[
            "sad", "calm", "peaceful", "quiet", "reflective", "nostalgic", "memory", "thoughtful",
            "blue",
        ],
    ),
    (
        Emotion::Energetic,
        &[
            "energized", "excited", "dynamic", "alive", "powerful", "vibrant", "active", "lively",
            "thrilled",
        ],
    ),
    (
        Emotion::Happy,
        &["joy", "smile", "laugh", "fun", "great", "wonderful", "amazing", "delighted"],
    ),
];

fn lexicon() -> &'static FnvHashMap<&'static str, Emotion> {
    static LEXICON: OnceLock<FnvHashMap<&'static str, Emotion>> = OnceLock::new();
    LEXICON.get_or_init(|| {
        let mut map = FnvHashMap::default();
        for pattern in &PATTERNS {
            for &word in pattern.keywords {
                map.insert(word, pattern.emotion);
            }
        }
        map
    })
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
}

fn category_index(emotion: Emotion) -> usize {
    CATEGORIES
        .iter()
        .position(|&e| e == emotion)
        .unwrap_or(CATEGORIES.len() - 1)
}

/// First-declared category with the strictly greatest score, or `None` when
/// nothing scored at all.
fn winning_category(scores: &[u32; 4]) -> Option<(Emotion, u32)> {
    let mut best: Option<(Emotion, u32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, b)) if score <= b => {}
            _ if score == 0 => {}
            _ => best = Some((CATEGORIES[i], score)),
        }
    }
    best
}

/// Full analyzer: keyword counts plus phrase bonuses, per-category
/// intensity modifiers, confidence floor 0.8.
pub fn analyze(text: &str, now_sec: f64) -> MoodState {
    let lowered = text.to_lowercase();
    let map = lexicon();

    let mut scores = [0u32; 4];
    let mut hits: SmallVec<[Emotion; 4]> = SmallVec::new();
    for token in tokenize(&lowered) {
        if let Some(&emotion) = map.get(token) {
            scores[category_index(emotion)] += 1;
            if !hits.contains(&emotion) {
                hits.push(emotion);
            }
        }
    }
    for (phrase, emotion) in PHRASES {
        if lowered.contains(phrase) {
            scores[category_index(emotion)] += 2;
        }
    }

    let total: u32 = scores.iter().sum();
    if total == 0 {
        return MoodState::new(MoodKind::Neutral, 0.3, 0.7, now_sec);
    }

    // winning_category is Some here since total > 0
    let (winner, score) = winning_category(&scores).unwrap_or((Emotion::Creative, 0));
    let modifier = PATTERNS[category_index(winner)].intensity_modifier;
    let intensity = ((score as f32 / 5.0).min(1.0) * modifier).min(1.0);
    let confidence = (score as f32 / total as f32).max(0.8);

    let mut state = MoodState::new(winner.mood_kind(), intensity, confidence, now_sec)
        .with_dominant(winner);
    state.emotions = hits;
    state
}

/// Cheap analyzer for performance mode: smaller lexicon, coarser intensity
/// (`score/3`, no modifier), confidence floor 0.6, no phrase bonuses.
pub fn analyze_fast(text: &str, now_sec: f64) -> MoodState {
    let lowered = text.to_lowercase();

    let mut scores = [0u32; 4];
    for token in tokenize(&lowered) {
        for (i, (_, keywords)) in FAST_KEYWORDS.iter().enumerate() {
            if keywords.contains(&token) {
                scores[i] += 1;
            }
        }
    }

    let total: u32 = scores.iter().sum();
    if total == 0 {
        return MoodState::new(MoodKind::Neutral, 0.3, 0.7, now_sec);
    }

    let (winner, score) = winning_category(&scores).unwrap_or((Emotion::Creative, 0));
    let intensity = (score as f32 / 3.0).min(1.0);
    let confidence = (score as f32 / total as f32).max(0.6);

    MoodState::new(winner.mood_kind(), intensity, confidence, now_sec).with_dominant(winner)
}
