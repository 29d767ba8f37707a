//! Frame-rate sampling and the adaptive quality state machine.
//!
//! [`FrameStats`] turns raw per-frame timestamps into ~1 Hz fps samples;
//! [`QualityController`] consumes those samples and decides the tier.

/// Discrete fidelity setting. Each tier is bound 1:1 to a fixed budget
/// tuple, see [`QualityTier::settings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

/// Budget tuple derived from a tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualitySettings {
    pub particle_budget: usize,
    pub resolution_scale: f32,
    pub effects_enabled: bool,
}

impl QualityTier {
    pub fn settings(self) -> QualitySettings {
        match self {
            QualityTier::High => QualitySettings {
                particle_budget: 2000,
                resolution_scale: 1.0,
                effects_enabled: true,
            },
            QualityTier::Medium => QualitySettings {
                particle_budget: 1000,
                resolution_scale: 0.75,
                effects_enabled: true,
            },
            QualityTier::Low => QualitySettings {
                particle_budget: 500,
                resolution_scale: 0.5,
                effects_enabled: false,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }
}

/// Samples are only evaluated when they differ from the fps recorded at the
/// last applied transition by more than this.
pub const FPS_DEAD_BAND: f32 = 5.0;

const FPS_FORCE_LOW: f32 = 30.0;
const FPS_MEDIUM: f32 = 45.0;
const FPS_HIGH: f32 = 60.0;

/// State machine over {high, medium, low}. Degrade is fast: `fps < 30`
/// forces low in one step from any tier. Upgrade is rule-ordered: 45..60
/// targets medium, >=60 targets high.
pub struct QualityController {
    tier: QualityTier,
    /// Fps recorded when the last transition was applied; the dead-band is
    /// measured against this, not against every raw sample.
    anchor_fps: f32,
}

impl Default for QualityController {
    fn default() -> Self {
        Self::new(QualityTier::High)
    }
}

impl QualityController {
    pub fn new(initial: QualityTier) -> Self {
        Self {
            tier: initial,
            anchor_fps: 0.0,
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Feed one fps sample. Returns the new tier only when it changed.
    pub fn observe(&mut self, fps: f32) -> Option<QualityTier> {
        if (fps - self.anchor_fps).abs() <= FPS_DEAD_BAND {
            return None;
        }
        let target = if fps < FPS_FORCE_LOW {
            Some(QualityTier::Low)
        } else if fps >= FPS_HIGH {
            Some(QualityTier::High)
        } else if fps >= FPS_MEDIUM {
            Some(QualityTier::Medium)
        } else {
            // 30..45: hold the current tier
            None
        };
        match target {
            Some(t) if t != self.tier => {
                log::debug!("quality {} -> {} at {:.0} fps", self.tier.name(), t.name(), fps);
                self.tier = t;
                self.anchor_fps = fps;
                Some(t)
            }
            _ => None,
        }
    }
}

/// One aggregated performance sample, emitted roughly once per second.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerformanceSample {
    pub fps: f32,
    /// Wall time of the most recent frame in milliseconds.
    pub render_time_ms: f64,
}

/// Accumulates per-frame timestamps into 1 Hz fps samples.
pub struct FrameStats {
    frames: u32,
    window_start_ms: f64,
    last_frame_ms: f64,
}

const SAMPLE_WINDOW_MS: f64 = 1000.0;

impl FrameStats {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frames: 0,
            window_start_ms: now_ms,
            last_frame_ms: now_ms,
        }
    }

    /// Record a frame. Returns a sample once a full window has elapsed.
    pub fn on_frame(&mut self, now_ms: f64) -> Option<PerformanceSample> {
        self.frames += 1;
        let render_time_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        let elapsed = now_ms - self.window_start_ms;
        if elapsed < SAMPLE_WINDOW_MS {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed).round() as f32;
        self.frames = 0;
        self.window_start_ms = now_ms;
        Some(PerformanceSample {
            fps,
            render_time_ms,
        })
    }
}
