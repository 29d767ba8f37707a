//! Force fields: spatial rules contributing additive velocity perturbations.

use crate::mood::MoodState;
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub enum ForceField {
    /// Pulls particles toward `center`, inverse-square falloff.
    Attractor { center: Vec2, strength: f32 },
    /// Pushes particles away from `center`, inverse-square falloff.
    Repeller { center: Vec2, strength: f32 },
    /// Rotates particles around `center` at a rate tied to mood intensity.
    Vortex { center: Vec2 },
}

const MIN_DISTANCE: f32 = 1.0;

impl ForceField {
    /// Force this field exerts at `pos` for the given mood.
    pub fn force_at(&self, pos: Vec2, mood: &MoodState) -> Vec2 {
        match *self {
            ForceField::Attractor { center, strength } => {
                let delta = center - pos;
                let distance = delta.length().max(MIN_DISTANCE);
                let magnitude = strength * mood.intensity / (distance * distance);
                delta / distance * magnitude
            }
            ForceField::Repeller { center, strength } => {
                let delta = pos - center;
                let distance = delta.length().max(MIN_DISTANCE);
                let magnitude = strength * mood.intensity / (distance * distance);
                delta / distance * magnitude
            }
            ForceField::Vortex { center } => {
                let delta = pos - center;
                let distance = delta.length().max(MIN_DISTANCE);
                Vec2::new(-delta.y, delta.x) / distance * mood.intensity * 0.1
            }
        }
    }
}
