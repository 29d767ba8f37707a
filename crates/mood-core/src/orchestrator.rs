//! Mood → scene parameter derivation.
//!
//! Pure lookup-and-scale: each mood kind owns a base parameter row and the
//! derived spawn rate and velocity are the base values multiplied by the
//! mood's intensity. Recomputed on every mood change.

use crate::mood::{MoodKind, MoodState};

/// Static per-mood row the orchestrator derives from.
#[derive(Clone, Debug)]
pub struct MoodPreset {
    /// CSS gradient the excluded shell paints behind the canvas.
    pub background: &'static str,
    pub spawn_rate: f32,
    pub velocity: f32,
    pub particle_types: &'static [&'static str],
    /// File name under the `soundscapes/` resource root.
    pub soundscape: &'static str,
    pub description: &'static str,
}

/// Intensity-scaled parameters handed to the renderer and audio layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Orchestration {
    pub background: &'static str,
    pub spawn_rate: f32,
    pub velocity: f32,
    pub particle_types: &'static [&'static str],
    pub soundscape: &'static str,
    pub description: String,
}

pub fn preset(kind: MoodKind) -> &'static MoodPreset {
    match kind {
        MoodKind::Creative => &CREATIVE,
        MoodKind::Melancholy => &MELANCHOLY,
        MoodKind::Energetic => &ENERGETIC,
        MoodKind::Neutral => &NEUTRAL,
    }
}

/// Derive the orchestration for a mood. `spawn_rate` and `velocity` are
/// multiplied by intensity.
pub fn derive(mood: &MoodState) -> Orchestration {
    let base = preset(mood.kind);
    Orchestration {
        background: base.background,
        spawn_rate: base.spawn_rate * mood.intensity,
        velocity: base.velocity * mood.intensity,
        particle_types: base.particle_types,
        soundscape: base.soundscape,
        description: format!(
            "{} ({}% intensity)",
            base.description,
            (mood.intensity * 100.0).round() as u32
        ),
    }
}

static CREATIVE: MoodPreset = MoodPreset {
    background: "radial-gradient(circle, #667eea 0%, #764ba2 100%)",
    spawn_rate: 0.1,
    velocity: 2.0,
    particle_types: &["sparkle", "flow"],
    soundscape: "ambient-creative.mp3",
    description: "Flowing with creative energy and inspiration",
};

static MELANCHOLY: MoodPreset = MoodPreset {
    background: "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    spawn_rate: 0.02,
    velocity: 0.5,
    particle_types: &["drift", "fade"],
    soundscape: "ambient-calm.mp3",
    description: "Calm and reflective waters of emotion",
};

static ENERGETIC: MoodPreset = MoodPreset {
    background: "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    spawn_rate: 0.3,
    velocity: 5.0,
    particle_types: &["burst", "pulse"],
    soundscape: "ambient-energetic.mp3",
    description: "Vibrant and dynamic energy flow",
};

static NEUTRAL: MoodPreset = MoodPreset {
    background: "linear-gradient(135deg, #868f96 0%, #596164 100%)",
    spawn_rate: 0.05,
    velocity: 1.0,
    particle_types: &["float"],
    soundscape: "ambient-neutral.mp3",
    description: "Balanced and centered state",
};
