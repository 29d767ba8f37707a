//! Point-cloud simulation for the GPU backend.
//!
//! The cloud is sized once from the quality tier's particle budget and the
//! mood's density factor; mood changes recolor the points but never resize
//! the population mid-session. Each movement archetype is its own
//! closed-form periodic offset.

use crate::color::{mix, rgb_from_hex};
use crate::mesh::MeshKind;
use crate::mood::{Emotion, MoodState};
use glam::Vec3;
use rand::prelude::*;

/// Movement archetypes for the per-frame point displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Explosive,
    Flowing,
    Bouncy,
    Gentle,
    Balanced,
}

/// Per-mood configuration for the GPU scene.
#[derive(Clone, Copy, Debug)]
pub struct VisualConfig {
    pub primary: u32,
    pub secondary: u32,
    pub mesh: MeshKind,
    pub movement: Movement,
    /// Multiplies the quality tier's particle budget.
    pub density: f32,
    pub camera_eye: [f32; 3],
}

/// Resolve the visual config for a mood. Keyed on the dominant emotion when
/// present so the happy and calm audio moods keep their own looks; falls
/// back to the remapped mood kind otherwise.
pub fn visual_config(mood: &MoodState) -> &'static VisualConfig {
    let emotion = mood.dominant.unwrap_or(match mood.kind {
        crate::mood::MoodKind::Creative => Emotion::Creative,
        crate::mood::MoodKind::Melancholy => Emotion::Melancholy,
        crate::mood::MoodKind::Energetic => Emotion::Energetic,
        crate::mood::MoodKind::Neutral => return &NEUTRAL_VISUAL,
    });
    match emotion {
        Emotion::Creative => &CREATIVE_VISUAL,
        Emotion::Melancholy => &MELANCHOLY_VISUAL,
        Emotion::Energetic => &ENERGETIC_VISUAL,
        Emotion::Happy => &HAPPY_VISUAL,
        Emotion::Calm => &CALM_VISUAL,
    }
}

static CREATIVE_VISUAL: VisualConfig = VisualConfig {
    primary: 0x8b5cf6,
    secondary: 0xec4899,
    mesh: MeshKind::Torus,
    movement: Movement::Flowing,
    density: 1.2,
    camera_eye: [5.0, 2.0, 8.0],
};

static MELANCHOLY_VISUAL: VisualConfig = VisualConfig {
    primary: 0x3b82f6,
    secondary: 0x60a5fa,
    mesh: MeshKind::Icosahedron,
    movement: Movement::Gentle,
    density: 0.8,
    camera_eye: [0.0, -2.0, 10.0],
};

static ENERGETIC_VISUAL: VisualConfig = VisualConfig {
    primary: 0xef4444,
    secondary: 0xf59e0b,
    mesh: MeshKind::Sphere,
    movement: Movement::Explosive,
    density: 1.5,
    camera_eye: [0.0, 0.0, 6.0],
};

static HAPPY_VISUAL: VisualConfig = VisualConfig {
    primary: 0x10b981,
    secondary: 0xfbbf24,
    mesh: MeshKind::Dodecahedron,
    movement: Movement::Bouncy,
    density: 1.1,
    camera_eye: [4.0, 3.0, 7.0],
};

static CALM_VISUAL: VisualConfig = VisualConfig {
    primary: 0x06b6d4,
    secondary: 0x8b5cf6,
    mesh: MeshKind::Plane,
    movement: Movement::Balanced,
    density: 0.7,
    camera_eye: [0.0, 0.0, 12.0],
};

static NEUTRAL_VISUAL: VisualConfig = VisualConfig {
    primary: 0x6b7280,
    secondary: 0x9ca3af,
    mesh: MeshKind::Octahedron,
    movement: Movement::Balanced,
    density: 1.0,
    camera_eye: [0.0, 0.0, 10.0],
};

/// Renderer-ready point layout, matching the instanced vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    rng: StdRng,
}

pub const SHELL_RADIUS_MIN: f32 = 4.0;
pub const SHELL_RADIUS_SPAN: f32 = 2.0;

impl PointCloud {
    /// Build a cloud of `particle_budget * density` points on a sphere
    /// shell, colored between the config's two colors.
    pub fn new(particle_budget: usize, config: &VisualConfig, seed: u64) -> Self {
        let count = (particle_budget as f32 * config.density).floor() as usize;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let primary = rgb_from_hex(config.primary);
        let secondary = rgb_from_hex(config.secondary);
        for _ in 0..count {
            let radius = SHELL_RADIUS_MIN + rng.gen::<f32>() * SHELL_RADIUS_SPAN;
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
            colors.push(mix(primary, secondary, rng.gen::<f32>()));
            sizes.push(rng.gen::<f32>() * 0.5 + 0.1);
        }
        Self {
            positions,
            colors,
            sizes,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Reassign point colors for a new mood. Positions are untouched; the
    /// population never resizes outside a full backend re-initialization.
    pub fn recolor(&mut self, config: &VisualConfig) {
        let primary = rgb_from_hex(config.primary);
        let secondary = rgb_from_hex(config.secondary);
        for color in &mut self.colors {
            *color = mix(primary, secondary, self.rng.gen::<f32>());
        }
    }

    /// Displace every point by the archetype's periodic offset. Offsets
    /// accumulate frame over frame, exactly like the reference motion.
    pub fn update(&mut self, movement: Movement, time_sec: f32, intensity: f32) {
        let t = time_sec;
        for p in &mut self.positions {
            let (x, y, z) = (p.x, p.y, p.z);
            match movement {
                Movement::Explosive => {
                    p.x += (t * 2.0 + x).sin() * intensity * 0.05;
                    p.y += (t * 2.0 + y).cos() * intensity * 0.05;
                    p.z += (t + z).sin() * intensity * 0.03;
                }
                Movement::Flowing => {
                    p.x += (t * 0.8 + y).sin() * intensity * 0.02;
                    p.y += (t * 0.8 + x).cos() * intensity * 0.02;
                    p.z += (t * 0.5 + z).sin() * intensity * 0.01;
                }
                Movement::Bouncy => {
                    p.x += (t * 1.5 + x).sin() * intensity * 0.03;
                    p.y += (t * 1.2 + y).cos() * intensity * 0.03;
                }
                Movement::Gentle => {
                    p.x += (t * 0.5 + x).sin() * intensity * 0.01;
                    p.y += (t * 0.5 + y).cos() * intensity * 0.01;
                }
                Movement::Balanced => {
                    p.x += (t + x).sin() * intensity * 0.015;
                    p.y += (t + y).cos() * intensity * 0.015;
                }
            }
        }
    }

    /// Pack the cloud into the instanced layout the GPU pass consumes.
    pub fn write_instances(&self, out: &mut Vec<PointInstance>) {
        out.clear();
        out.reserve(self.positions.len());
        for i in 0..self.positions.len() {
            out.push(PointInstance {
                pos: self.positions[i].to_array(),
                size: self.sizes[i],
                color: [self.colors[i].x, self.colors[i].y, self.colors[i].z, 0.8],
            });
        }
    }
}

/// Primary-mesh animation state: rotation accumulates with intensity and
/// the scale pulses around 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshMotion {
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl MeshMotion {
    pub fn tick(&mut self, intensity: f32) {
        self.rotation_x += 0.01 * intensity;
        self.rotation_y += 0.005 * intensity;
    }

    pub fn pulse_scale(time_sec: f32, intensity: f32) -> f32 {
        1.0 + (time_sec * 1.5).sin() * 0.1 * intensity
    }

    pub fn model_matrix(&self, time_sec: f32, intensity: f32) -> glam::Mat4 {
        let scale = Self::pulse_scale(time_sec, intensity);
        glam::Mat4::from_scale(Vec3::splat(scale))
            * glam::Mat4::from_rotation_y(self.rotation_y)
            * glam::Mat4::from_rotation_x(self.rotation_x)
    }
}
