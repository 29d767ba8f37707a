//! Immediate-mode 2-D canvas backend.
//!
//! Owns the particle population for its lifetime and redraws once per
//! animation frame: a low-alpha dark fill fades the previous frame into
//! motion trails, then every particle is drawn as a filled disc whose alpha
//! fades linearly over its life.

use mood_core::color::css_rgba;
use mood_core::fields::ForceField;
use mood_core::mood::{MoodKind, MoodState};
use mood_core::particles::{brush, Brush, ParticleField, FIELD_HEIGHT, FIELD_WIDTH};
use mood_core::quality::QualitySettings;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

const BACKGROUND: &str = "#0f172a";
const TRAIL_FILL: &str = "rgba(15, 23, 42, 0.05)";

pub struct Canvas2dScene {
    ctx: web::CanvasRenderingContext2d,
    field: ParticleField,
    brush: Brush,
}

impl Canvas2dScene {
    pub fn new(canvas: &web::HtmlCanvasElement, seed: u64) -> anyhow::Result<Self> {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("2d context: {:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
        Ok(Self {
            ctx,
            field: ParticleField::new(seed),
            brush: brush(MoodKind::Neutral),
        })
    }

    /// Reseeds only on a meaningful mood change; intensity jitter keeps the
    /// current population.
    pub fn update_mood(&mut self, mood: &MoodState, settings: &QualitySettings) {
        if self.field.observe_mood(mood, settings.particle_budget) {
            log::debug!(
                "[canvas2d] reseeded {} particles for {}",
                self.field.len(),
                mood.kind.name()
            );
        }
        self.brush = brush(mood.kind);
    }

    /// Budget changes take effect through a full reseed at the new cap.
    pub fn update_quality(&mut self, mood: &MoodState, settings: &QualitySettings) {
        self.field.reseed(mood, settings.particle_budget);
        self.brush = brush(mood.kind);
    }

    pub fn set_advanced_fields(&mut self, enabled: bool) {
        if enabled {
            self.field.set_force_fields(vec![
                ForceField::Attractor {
                    center: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
                    strength: 50.0,
                },
                ForceField::Repeller {
                    center: Vec2::new(FIELD_WIDTH / 4.0, FIELD_HEIGHT / 4.0),
                    strength: 30.0,
                },
                ForceField::Vortex {
                    center: Vec2::new(FIELD_WIDTH * 0.75, FIELD_HEIGHT * 0.75),
                },
            ]);
        } else {
            self.field.set_force_fields(Vec::new());
        }
    }

    pub fn tick(
        &mut self,
        mood: &MoodState,
        settings: &QualitySettings,
        spawn_rate: f32,
        dt_sec: f32,
    ) {
        self.field.step(mood, dt_sec, settings.effects_enabled);
        self.field
            .auto_spawn(mood, spawn_rate, settings.particle_budget);

        self.ctx.set_fill_style_str(TRAIL_FILL);
        self.ctx
            .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        let size_scale = self.brush.size / 3.0;
        for p in self.field.particles() {
            let alpha = self.brush.opacity * p.life_fraction();
            self.ctx
                .set_fill_style_str(&css_rgba(self.brush.color, alpha));
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                (p.radius * size_scale) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
    }

    /// Flush the population, paint the background solid, and forget the last
    /// mood so the next update reseeds unconditionally.
    pub fn clear(&mut self) {
        self.field.clear();
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx
            .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }
}
