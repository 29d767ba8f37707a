//! Fixed-population particle simulation for the 2-D canvas backend.
//!
//! Dead or escaped particles are recycled in place rather than removed, so
//! the population size only changes on a meaningful mood change, an
//! explicit clear, or a new particle budget.

use crate::fields::ForceField;
use crate::mood::{MoodKind, MoodState};
use glam::Vec2;
use rand::prelude::*;

/// Logical drawing surface for the 2-D backend.
pub const FIELD_WIDTH: f32 = 1000.0;
pub const FIELD_HEIGHT: f32 = 800.0;
/// Particles may drift this far past the edge before being recycled.
pub const RESPAWN_MARGIN: f32 = 50.0;

/// Intensity jitter below this does not reseed the population.
pub const RESEED_INTENSITY_DELTA: f32 = 0.1;

/// Per-mood visual style applied by the canvas backend.
#[derive(Clone, Copy, Debug)]
pub struct Brush {
    pub color: [u8; 3],
    pub size: f32,
    pub opacity: f32,
    pub flow: f32,
}

pub fn brush(kind: MoodKind) -> Brush {
    match kind {
        MoodKind::Creative => Brush {
            color: [0x8b, 0x5c, 0xf6],
            size: 4.0,
            opacity: 0.8,
            flow: 0.1,
        },
        MoodKind::Melancholy => Brush {
            color: [0x3b, 0x82, 0xf6],
            size: 2.0,
            opacity: 0.6,
            flow: 0.05,
        },
        MoodKind::Energetic => Brush {
            color: [0xec, 0x48, 0x99],
            size: 6.0,
            opacity: 0.9,
            flow: 0.2,
        },
        MoodKind::Neutral => Brush {
            color: [0x6b, 0x72, 0x80],
            size: 3.0,
            opacity: 0.7,
            flow: 0.08,
        },
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub max_age: f32,
    pub radius: f32,
}

impl Particle {
    /// Remaining-life fraction used for the draw alpha fade, 1 at birth.
    pub fn life_fraction(&self) -> f32 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    fields: Vec<ForceField>,
    rng: StdRng,
    last_mood: Option<(MoodKind, f32)>,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            fields: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            last_mood: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn add_force_field(&mut self, field: ForceField) {
        self.fields.push(field);
    }

    /// Replace the installed force fields without touching the population.
    pub fn set_force_fields(&mut self, fields: Vec<ForceField>) {
        self.fields = fields;
    }

    /// Population target for a mood, capped by the quality particle budget.
    pub fn population_for(mood: &MoodState, particle_budget: usize) -> usize {
        ((mood.intensity * 100.0 + 20.0).floor() as usize).min(particle_budget)
    }

    /// Reseed only when the mood changed meaningfully: the kind differs or
    /// the intensity moved by more than [`RESEED_INTENSITY_DELTA`]. Returns
    /// whether a reseed happened.
    pub fn observe_mood(&mut self, mood: &MoodState, particle_budget: usize) -> bool {
        let changed = match self.last_mood {
            None => true,
            Some((kind, intensity)) => {
                kind != mood.kind || (intensity - mood.intensity).abs() > RESEED_INTENSITY_DELTA
            }
        };
        if changed {
            self.reseed(mood, particle_budget);
        }
        changed
    }

    /// Rebuild the full population at the target size for this mood. Used
    /// directly when the particle budget itself changes.
    pub fn reseed(&mut self, mood: &MoodState, particle_budget: usize) {
        let count = Self::population_for(mood, particle_budget);
        self.particles.clear();
        for _ in 0..count {
            let p = self.spawn(mood.intensity);
            self.particles.push(p);
        }
        self.last_mood = Some((mood.kind, mood.intensity));
    }

    fn spawn(&mut self, intensity: f32) -> Particle {
        Particle {
            pos: Vec2::new(
                self.rng.gen::<f32>() * FIELD_WIDTH,
                self.rng.gen::<f32>() * FIELD_HEIGHT,
            ),
            vel: Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * intensity * 4.0,
                (self.rng.gen::<f32>() - 0.5) * intensity * 4.0,
            ),
            age: self.rng.gen::<f32>() * 100.0,
            max_age: 100.0 + self.rng.gen::<f32>() * 100.0,
            radius: self.rng.gen::<f32>() * 3.0 + 1.0,
        }
    }

    /// Advance one frame: apply force fields (when effects are on),
    /// integrate, age, and recycle expired or escaped particles in place.
    pub fn step(&mut self, mood: &MoodState, dt: f32, effects_enabled: bool) {
        if effects_enabled && !self.fields.is_empty() {
            for particle in &mut self.particles {
                let mut force = Vec2::ZERO;
                for field in &self.fields {
                    force += field.force_at(particle.pos, mood);
                }
                particle.vel += force * dt;
                particle.vel *= 0.99;
            }
        }

        let intensity = mood.intensity;
        for i in 0..self.particles.len() {
            let expired;
            {
                let p = &mut self.particles[i];
                p.pos += p.vel;
                p.age += 1.0;
                expired = p.age > p.max_age
                    || p.pos.x < -RESPAWN_MARGIN
                    || p.pos.x > FIELD_WIDTH + RESPAWN_MARGIN
                    || p.pos.y < -RESPAWN_MARGIN
                    || p.pos.y > FIELD_HEIGHT + RESPAWN_MARGIN;
            }
            if expired {
                let mut fresh = self.spawn(intensity);
                fresh.age = 0.0;
                self.particles[i] = fresh;
            }
        }
    }

    /// Top the population back up toward the budget at the orchestrated,
    /// intensity-scaled rate.
    pub fn auto_spawn(&mut self, mood: &MoodState, spawn_rate: f32, particle_budget: usize) {
        let target = Self::population_for(mood, particle_budget);
        if self.particles.len() >= target {
            return;
        }
        if self.rng.gen::<f32>() < spawn_rate {
            let p = self.spawn(mood.intensity);
            self.particles.push(p);
        }
    }

    /// Flush everything and forget the last-seen mood, so the next
    /// `observe_mood` reseeds unconditionally.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.fields.clear();
        self.last_mood = None;
    }
}
