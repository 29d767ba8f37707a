//! Mood state types shared by every consumer of the inference output.
//!
//! A `MoodState` is an immutable snapshot: producers create a fresh value on
//! every inference and consumers receive it by value.

use smallvec::SmallVec;

/// Closed set of moods every downstream table is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MoodKind {
    Creative,
    Melancholy,
    Energetic,
    #[default]
    Neutral,
}

impl MoodKind {
    pub fn name(self) -> &'static str {
        match self {
            MoodKind::Creative => "creative",
            MoodKind::Melancholy => "melancholy",
            MoodKind::Energetic => "energetic",
            MoodKind::Neutral => "neutral",
        }
    }
}

/// Raw emotional category before the remap onto [`MoodKind`]. Happy
/// collapses into creative and calm into melancholy; the pre-remap value
/// survives in [`MoodState::dominant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Creative,
    Melancholy,
    Energetic,
    Happy,
    Calm,
}

impl Emotion {
    pub fn mood_kind(self) -> MoodKind {
        match self {
            Emotion::Creative | Emotion::Happy => MoodKind::Creative,
            Emotion::Melancholy | Emotion::Calm => MoodKind::Melancholy,
            Emotion::Energetic => MoodKind::Energetic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Creative => "creative",
            Emotion::Melancholy => "melancholy",
            Emotion::Energetic => "energetic",
            Emotion::Happy => "happy",
            Emotion::Calm => "calm",
        }
    }
}

/// Immutable mood snapshot consumed by the orchestrator, renderers, and audio.
///
/// `intensity` and `confidence` are clamped to \[0, 1\] at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MoodState {
    pub kind: MoodKind,
    pub intensity: f32,
    pub confidence: f32,
    /// Monotonic creation time in seconds. Display/debugging only.
    pub timestamp: f64,
    /// Raw lexical hits of the winning inference, strongest first.
    pub emotions: SmallVec<[Emotion; 4]>,
    /// Winning category before the remap onto `kind`.
    pub dominant: Option<Emotion>,
}

impl MoodState {
    pub fn new(kind: MoodKind, intensity: f32, confidence: f32, now_sec: f64) -> Self {
        Self {
            kind,
            intensity: intensity.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: now_sec,
            emotions: SmallVec::new(),
            dominant: None,
        }
    }

    pub fn with_dominant(mut self, emotion: Emotion) -> Self {
        self.dominant = Some(emotion);
        self
    }

    /// The state every session starts in, and the state `clear` resets to.
    pub fn initial(now_sec: f64) -> Self {
        Self::new(MoodKind::Neutral, 0.5, 1.0, now_sec)
    }
}

/// Map a normalized microphone loudness level in \[0, 1\] to a coarse mood.
/// The level itself becomes the intensity.
pub fn mood_from_level(level: f32, now_sec: f64) -> MoodState {
    let level = level.clamp(0.0, 1.0);
    if level > 0.7 {
        MoodState::new(MoodKind::Energetic, level, 0.8, now_sec).with_dominant(Emotion::Energetic)
    } else if level > 0.4 {
        MoodState::new(MoodKind::Creative, level, 0.8, now_sec).with_dominant(Emotion::Happy)
    } else if level > 0.1 {
        MoodState::new(MoodKind::Melancholy, level, 0.8, now_sec).with_dominant(Emotion::Calm)
    } else {
        MoodState::new(MoodKind::Neutral, level, 0.8, now_sec)
    }
}

/// Mean of a byte frequency spectrum normalized to \[0, 1\].
pub fn normalized_level(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    (sum as f32 / bins.len() as f32 / 255.0).min(1.0)
}
