//! WASM entry points and application state.
//!
//! The excluded UI shell talks to the scene exclusively through the exported
//! functions below: text submission, feature toggles, clear, volume, and the
//! read-only state getters. Everything else runs inside the frame loop.

#![cfg(target_arch = "wasm32")]

pub mod audio;
pub mod backend;
pub mod canvas2d;
pub mod dom;
pub mod frame;
pub mod mic;
pub mod perf;
pub mod render;

use audio::AudioOrchestrator;
use backend::SceneBackend;
use frame::TickContext;
use mic::AudioLevelSampler;
use mood_core::mood::{mood_from_level, MoodState};
use mood_core::orchestrator::{self, Orchestration};
use mood_core::quality::{QualityController, QualityTier};
use mood_core::sentiment;
use perf::PerformanceMonitor;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Default, Clone, Copy)]
struct Features {
    audio_input: bool,
    gpu: bool,
    performance_mode: bool,
    background_audio: bool,
    advanced_particles: bool,
}

struct App {
    mood: MoodState,
    orchestration: Orchestration,
    controller: QualityController,
    monitor: PerformanceMonitor,
    backend: SceneBackend,
    audio: AudioOrchestrator,
    mic: Option<AudioLevelSampler>,
    flags: Features,
    frame: Option<frame::FrameHandle>,
}

impl App {
    /// Install a fresh mood snapshot and fan it out: orchestration is
    /// re-derived, the backend observes the change, and the audio gate is
    /// applied (play above 0.1 intensity, stop at or below).
    fn apply_mood(&mut self, mood: MoodState) {
        self.orchestration = orchestrator::derive(&mood);
        self.backend.update_mood(&mood, self.controller.tier());
        if self.flags.background_audio && mood.intensity > 0.1 {
            self.audio.play_mood(mood.kind);
        } else {
            self.audio.stop();
        }
        log::info!(
            "[mood] {} intensity {:.2} confidence {:.2}",
            mood.kind.name(),
            mood.intensity,
            mood.confidence
        );
        self.mood = mood;
    }

    fn on_frame(&mut self, dt_sec: f32, elapsed_sec: f32) {
        if self.flags.audio_input {
            if let Some(level) = self.mic.as_ref().and_then(AudioLevelSampler::take_level) {
                let mood = mood_from_level(level, self.monitor.now_sec());
                self.apply_mood(mood);
            }
        }

        if let Some(sample) = self.monitor.on_frame() {
            if let Some(tier) = self.controller.observe(sample.fps) {
                log::info!("[quality] tier -> {} at {:.0} fps", tier.name(), sample.fps);
                self.backend.update_quality(tier, &self.mood);
            }
        }

        self.backend.tick(&TickContext {
            mood: &self.mood,
            tier: self.controller.tier(),
            spawn_rate: self.orchestration.spawn_rate,
            dt_sec,
            elapsed_sec,
        });
    }
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

fn app_rc() -> Option<Rc<RefCell<App>>> {
    APP.with(|slot| slot.borrow().clone())
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    app_rc().map(|rc| f(&mut rc.borrow_mut()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mood-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let monitor = PerformanceMonitor::new()?;
    let controller = QualityController::default();
    let mood = MoodState::initial(monitor.now_sec());
    let backend = backend::init_canvas(&mood, controller.tier())?;
    let orchestration = orchestrator::derive(&mood);
    let audio = AudioOrchestrator::new()?;

    let app = Rc::new(RefCell::new(App {
        mood,
        orchestration,
        controller,
        monitor,
        backend,
        audio,
        mic: None,
        flags: Features::default(),
        frame: None,
    }));
    let handle = frame::start_loop({
        let app = app.clone();
        move |dt_sec, elapsed_sec| app.borrow_mut().on_frame(dt_sec, elapsed_sec)
    });
    app.borrow_mut().frame = Some(handle);
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Infer a mood from free text and drive the scene with it. The fast
/// analyzer is used while performance mode is on.
#[wasm_bindgen]
pub fn submit_text(text: &str) {
    with_app(|app| {
        let now = app.monitor.now_sec();
        let mood = if app.flags.performance_mode {
            sentiment::analyze_fast(text, now)
        } else {
            sentiment::analyze(text, now)
        };
        app.apply_mood(mood);
    });
}

/// Flip a feature flag; returns the new state. Unknown names are ignored
/// and report `false`.
#[wasm_bindgen]
pub fn toggle_feature(name: &str) -> bool {
    let Some(rc) = app_rc() else {
        return false;
    };
    match name {
        "performance-mode" => {
            let mut app = rc.borrow_mut();
            app.flags.performance_mode = !app.flags.performance_mode;
            app.flags.performance_mode
        }
        "advanced-particles" => {
            let mut app = rc.borrow_mut();
            app.flags.advanced_particles = !app.flags.advanced_particles;
            let enabled = app.flags.advanced_particles;
            app.backend.set_advanced_fields(enabled);
            enabled
        }
        "background-audio" => {
            let mut app = rc.borrow_mut();
            app.flags.background_audio = !app.flags.background_audio;
            if app.flags.background_audio {
                if app.mood.intensity > 0.1 {
                    let kind = app.mood.kind;
                    app.audio.play_mood(kind);
                }
            } else {
                app.audio.stop();
            }
            app.flags.background_audio
        }
        "audio-input" => toggle_audio_input(&rc),
        "gpu" => toggle_gpu(&rc),
        other => {
            log::warn!("unknown feature flag: {other}");
            false
        }
    }
}

fn toggle_audio_input(rc: &Rc<RefCell<App>>) -> bool {
    let mut app = rc.borrow_mut();
    if app.flags.audio_input {
        app.flags.audio_input = false;
        if let Some(sampler) = app.mic.take() {
            sampler.stop();
        }
        return false;
    }
    app.flags.audio_input = true;
    drop(app);
    let rc = rc.clone();
    spawn_local(async move {
        match AudioLevelSampler::start().await {
            Ok(sampler) => rc.borrow_mut().mic = Some(sampler),
            Err(e) => {
                // Recoverable: report not-listening and carry on.
                log::warn!("{e}");
                rc.borrow_mut().flags.audio_input = false;
            }
        }
    });
    true
}

fn toggle_gpu(rc: &Rc<RefCell<App>>) -> bool {
    let mut app = rc.borrow_mut();
    if app.flags.gpu {
        // Back to the 2-D canvas; dropping the GPU scene frees its surface.
        app.flags.gpu = false;
        let mood = app.mood.clone();
        let tier = app.controller.tier();
        match backend::init_canvas(&mood, tier) {
            Ok(scene) => app.backend = scene,
            Err(e) => log::error!("canvas re-init failed: {e}"),
        }
        let advanced = app.flags.advanced_particles;
        app.backend.set_advanced_fields(advanced);
        return false;
    }
    app.flags.gpu = true;
    let mood = app.mood.clone();
    let tier = app.controller.tier();
    // Old population is torn down before the GPU backend is created.
    app.backend.teardown();
    drop(app);
    let rc = rc.clone();
    spawn_local(async move {
        match backend::init_gpu(&mood, tier).await {
            Ok(scene) => rc.borrow_mut().backend = scene,
            Err(e) => {
                log::warn!("{e}; staying on the 2-D backend");
                let mut app = rc.borrow_mut();
                app.flags.gpu = false;
                let mood = app.mood.clone();
                app.backend.update_mood(&mood, tier);
            }
        }
    });
    true
}

/// Clear the scene and reset the mood to its initial state. The reset mood
/// fans out like any other: the field reseeds for neutral, the GPU mesh and
/// palette rebuild, and the audio gate re-applies.
#[wasm_bindgen]
pub fn clear_canvas() {
    with_app(|app| {
        app.backend.clear();
        let advanced = app.flags.advanced_particles;
        app.backend.set_advanced_fields(advanced);
        let initial = MoodState::initial(app.monitor.now_sec());
        app.apply_mood(initial);
    });
}

/// Tear the scene down: cancel the queued frame so no stale callback fires,
/// release the microphone, and stop audio. For the shell's page-hide path.
#[wasm_bindgen]
pub fn shutdown() {
    let Some(rc) = APP.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    let mut app = rc.borrow_mut();
    if let Some(handle) = app.frame.take() {
        handle.cancel();
    }
    if let Some(sampler) = app.mic.take() {
        sampler.stop();
    }
    app.audio.stop();
}

#[wasm_bindgen]
pub fn set_volume(volume: f64) {
    with_app(|app| app.audio.set_volume(volume));
}

#[wasm_bindgen]
pub fn mood_kind() -> String {
    with_app(|app| app.mood.kind.name().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn mood_intensity() -> f32 {
    with_app(|app| app.mood.intensity).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn mood_confidence() -> f32 {
    with_app(|app| app.mood.confidence).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn scene_description() -> String {
    with_app(|app| app.orchestration.description.clone()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn quality_tier() -> String {
    with_app(|app| app.controller.tier().name().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn current_fps() -> f32 {
    with_app(|app| app.monitor.last_sample().fps).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn render_time_ms() -> f64 {
    with_app(|app| app.monitor.last_sample().render_time_ms).unwrap_or(0.0)
}

/// Used JS heap in MB, or -1 where the browser does not expose it.
#[wasm_bindgen]
pub fn used_heap_mb() -> f64 {
    with_app(|app| app.monitor.used_heap_mb())
        .flatten()
        .unwrap_or(-1.0)
}

#[wasm_bindgen]
pub fn particle_count() -> u32 {
    with_app(|app| app.backend.particle_count() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_audio_playing() -> bool {
    with_app(|app| app.audio.is_playing()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn is_listening() -> bool {
    with_app(|app| app.mic.is_some()).unwrap_or(false)
}
