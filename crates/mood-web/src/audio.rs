//! Ambient soundscape playback over a single `HtmlAudioElement`.
//!
//! The element is created once and owned for the process lifetime, so at
//! most one track is ever active. The intensity <= 0.1 stop gate is the
//! frame loop's policy, not enforced here.

use mood_core::mood::MoodKind;
use mood_core::orchestrator;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct AudioOrchestrator {
    element: web::HtmlAudioElement,
    volume: f64,
    current: Option<&'static str>,
}

impl AudioOrchestrator {
    pub fn new() -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new()
            .map_err(|e| anyhow::anyhow!(format!("audio element: {:?}", e)))?;
        element.set_loop(true);
        for event in ["play", "pause", "error"] {
            let closure = Closure::wrap(Box::new(move || {
                log::debug!("[audio] element event: {event}");
            }) as Box<dyn FnMut()>);
            let _ = element
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        Ok(Self {
            element,
            volume: 0.5,
            current: None,
        })
    }

    /// Start (or retarget) the looping soundscape for a mood. Swapping to a
    /// different track pauses and rewinds before the source changes.
    pub fn play_mood(&mut self, kind: MoodKind) {
        let file = orchestrator::preset(kind).soundscape;
        if self.current != Some(file) {
            let _ = self.element.pause();
            self.element.set_current_time(0.0);
            self.element.set_src(&format!("soundscapes/{file}"));
            self.current = Some(file);
            log::info!("[audio] soundscape -> {file}");
        }
        self.element.set_volume(self.volume);
        match self.element.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] playback failed: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[audio] play rejected: {:?}", e),
        }
    }

    /// Halt playback, rewind, and detach the source entirely. Resuming after
    /// this requires a fresh load through `play_mood`.
    pub fn stop(&mut self) {
        if self.current.is_none() {
            return;
        }
        let _ = self.element.pause();
        self.element.set_current_time(0.0);
        let _ = self.element.remove_attribute("src");
        self.element.load();
        self.current = None;
        log::info!("[audio] stopped");
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.element.set_volume(self.volume);
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some() && !self.element.paused()
    }
}
