//! Renderer backend selection.
//!
//! Both backends sit behind one tagged variant; which one is live is decided
//! at the boundary via the `gpu` feature flag. A swap tears the old
//! population down before the new backend is created.

use crate::canvas2d::Canvas2dScene;
use crate::render::GpuScene;
use crate::{dom, frame};
use mood_core::error::CapabilityError;
use mood_core::mood::MoodState;
use mood_core::quality::QualityTier;

pub const CANVAS_2D_ID: &str = "scene-canvas";
pub const CANVAS_GPU_ID: &str = "scene-canvas-gpu";

const FIELD_SEED: u64 = 11;

pub enum SceneBackend {
    Canvas(Canvas2dScene),
    Gpu(Box<GpuScene>),
}

/// Device-pixel-ratio cap for the GPU surface, per tier.
pub fn dpr_cap(tier: QualityTier) -> f64 {
    if tier == QualityTier::High {
        2.0
    } else {
        1.0
    }
}

pub fn init_canvas(mood: &MoodState, tier: QualityTier) -> anyhow::Result<SceneBackend> {
    let canvas = dom::canvas_by_id(CANVAS_2D_ID)?;
    let mut scene = Canvas2dScene::new(&canvas, FIELD_SEED)?;
    scene.update_mood(mood, &tier.settings());
    Ok(SceneBackend::Canvas(scene))
}

/// Initialize the GPU backend. A missing adapter or device is a capability
/// failure the caller answers with a 2-D fallback.
pub async fn init_gpu(
    mood: &MoodState,
    tier: QualityTier,
) -> Result<SceneBackend, CapabilityError> {
    let canvas = dom::canvas_by_id(CANVAS_GPU_ID)
        .map_err(|e| CapabilityError::GpuUnavailable(e.to_string()))?;
    dom::sync_canvas_backing_size(&canvas, dpr_cap(tier));
    let scene = GpuScene::new(&canvas, mood, tier)
        .await
        .map_err(|e| CapabilityError::GpuUnavailable(e.to_string()))?;
    Ok(SceneBackend::Gpu(Box::new(scene)))
}

impl SceneBackend {
    pub fn update_mood(&mut self, mood: &MoodState, tier: QualityTier) {
        match self {
            SceneBackend::Canvas(scene) => scene.update_mood(mood, &tier.settings()),
            SceneBackend::Gpu(scene) => scene.update_mood(mood),
        }
    }

    pub fn update_quality(&mut self, tier: QualityTier, mood: &MoodState) {
        match self {
            SceneBackend::Canvas(scene) => scene.update_quality(mood, &tier.settings()),
            SceneBackend::Gpu(scene) => {
                if let Ok(canvas) = dom::canvas_by_id(CANVAS_GPU_ID) {
                    dom::sync_canvas_backing_size(&canvas, dpr_cap(tier));
                    scene.resize_if_needed(canvas.width(), canvas.height());
                }
                scene.update_quality(tier, mood);
            }
        }
    }

    pub fn tick(&mut self, ctx: &frame::TickContext<'_>) {
        match self {
            SceneBackend::Canvas(scene) => {
                scene.tick(ctx.mood, &ctx.tier.settings(), ctx.spawn_rate, ctx.dt_sec)
            }
            SceneBackend::Gpu(scene) => {
                // Keep the surface sized to the canvas backing size.
                if let Ok(canvas) = dom::canvas_by_id(CANVAS_GPU_ID) {
                    dom::sync_canvas_backing_size(&canvas, dpr_cap(ctx.tier));
                    scene.resize_if_needed(canvas.width(), canvas.height());
                }
                if let Err(e) = scene.render(ctx.elapsed_sec) {
                    log::error!("[gpu] render error: {:?}", e);
                }
            }
        }
    }

    pub fn set_advanced_fields(&mut self, enabled: bool) {
        if let SceneBackend::Canvas(scene) = self {
            scene.set_advanced_fields(enabled);
        }
    }

    pub fn clear(&mut self) {
        if let SceneBackend::Canvas(scene) = self {
            scene.clear();
        }
    }

    pub fn particle_count(&self) -> usize {
        match self {
            SceneBackend::Canvas(scene) => scene.particle_count(),
            SceneBackend::Gpu(scene) => scene.particle_count(),
        }
    }

    /// Release backend resources before a swap. Dropping the GPU scene frees
    /// the surface and buffers; the 2-D canvas is painted back to solid.
    pub fn teardown(&mut self) {
        if let SceneBackend::Canvas(scene) = self {
            scene.clear();
        }
    }
}
