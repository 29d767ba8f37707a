//! Wall-clock frame timing on top of `performance.now()`.

use js_sys::Reflect;
use mood_core::quality::{FrameStats, PerformanceSample};
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct PerformanceMonitor {
    perf: web::Performance,
    stats: FrameStats,
    last: PerformanceSample,
}

impl PerformanceMonitor {
    pub fn new() -> anyhow::Result<Self> {
        let perf = web::window()
            .and_then(|w| w.performance())
            .ok_or_else(|| anyhow::anyhow!("no performance API"))?;
        let now = perf.now();
        Ok(Self {
            perf,
            stats: FrameStats::new(now),
            last: PerformanceSample::default(),
        })
    }

    pub fn now_ms(&self) -> f64 {
        self.perf.now()
    }

    pub fn now_sec(&self) -> f64 {
        self.perf.now() / 1000.0
    }

    /// Record one frame; a fresh sample comes back roughly once per second.
    pub fn on_frame(&mut self) -> Option<PerformanceSample> {
        let sample = self.stats.on_frame(self.perf.now())?;
        self.last = sample;
        Some(sample)
    }

    pub fn last_sample(&self) -> PerformanceSample {
        self.last
    }

    /// Used JS heap in MB. Chrome-only `performance.memory`; `None` elsewhere.
    pub fn used_heap_mb(&self) -> Option<f64> {
        let memory = Reflect::get(self.perf.as_ref(), &JsValue::from_str("memory")).ok()?;
        if memory.is_undefined() {
            return None;
        }
        let used = Reflect::get(&memory, &JsValue::from_str("usedJSHeapSize")).ok()?;
        used.as_f64().map(|b| b / (1024.0 * 1024.0))
    }
}
