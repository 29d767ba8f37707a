//! Self-rescheduling requestAnimationFrame loop.
//!
//! The closure re-queues itself every frame and checks a shared cancellation
//! flag first, so a queued tick does no work after teardown.

use instant::Instant;
use mood_core::mood::MoodState;
use mood_core::quality::QualityTier;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame snapshot handed to the active backend.
pub struct TickContext<'a> {
    pub mood: &'a MoodState,
    pub tier: QualityTier,
    /// Intensity-scaled spawn rate from the current orchestration.
    pub spawn_rate: f32,
    pub dt_sec: f32,
    pub elapsed_sec: f32,
}

#[derive(Clone)]
pub struct FrameHandle {
    cancelled: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

/// Drive `step(dt_sec, elapsed_sec)` once per animation frame until the
/// returned handle is cancelled.
pub fn start_loop(mut step: impl FnMut(f32, f32) + 'static) -> FrameHandle {
    let cancelled = Rc::new(Cell::new(false));
    let handle = FrameHandle {
        cancelled: cancelled.clone(),
    };

    let start = Instant::now();
    let mut last = start;
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancelled.get() {
            return;
        }
        let now = Instant::now();
        let dt_sec = (now - last).as_secs_f32();
        last = now;
        step(dt_sec, (now - start).as_secs_f32());

        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
    handle
}
