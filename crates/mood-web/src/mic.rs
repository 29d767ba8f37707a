//! Microphone capture and loudness sampling.
//!
//! A one-second interval timer averages the analyser's byte frequency
//! spectrum into a normalized level and parks it in a shared cell; the frame
//! loop picks the level up on its own tick. The timer never touches mood or
//! renderer state directly.

use mood_core::error::CapabilityError;
use mood_core::mood::normalized_level;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const FFT_SIZE: u32 = 256;
const SAMPLE_INTERVAL_MS: i32 = 1000;

pub struct AudioLevelSampler {
    level: Rc<Cell<Option<f32>>>,
    interval_id: i32,
    audio_ctx: web::AudioContext,
    stream: web::MediaStream,
    // Keeps the interval callback alive until `stop`.
    _tick: Closure<dyn FnMut()>,
}

impl AudioLevelSampler {
    /// Acquire the microphone and start the 1 Hz level timer. Denial or
    /// absence of a capture device is recoverable: the caller logs and
    /// reports not-listening, the frame loop never sees the failure.
    pub async fn start() -> Result<Self, CapabilityError> {
        let unavailable = |e: JsValue| CapabilityError::MicrophoneUnavailable(format!("{e:?}"));

        let window =
            web::window().ok_or_else(|| CapabilityError::MicrophoneUnavailable("no window".into()))?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(unavailable)?;

        let track = web::MediaTrackConstraints::new();
        track.set_echo_cancellation(&JsValue::TRUE);
        track.set_noise_suppression(&JsValue::TRUE);
        track.set_auto_gain_control(&JsValue::TRUE);
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::from(track));

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(unavailable)?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(unavailable)?
            .dyn_into()
            .map_err(|_| CapabilityError::MicrophoneUnavailable("not a MediaStream".into()))?;

        let audio_ctx = web::AudioContext::new().map_err(unavailable)?;
        let analyser = audio_ctx.create_analyser().map_err(unavailable)?;
        analyser.set_fft_size(FFT_SIZE);
        let source = audio_ctx
            .create_media_stream_source(&stream)
            .map_err(unavailable)?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(unavailable)?;

        let level = Rc::new(Cell::new(None));
        let mut bins = vec![0u8; analyser.frequency_bin_count() as usize];
        let tick = {
            let level = level.clone();
            let analyser = analyser.clone();
            Closure::wrap(Box::new(move || {
                analyser.get_byte_frequency_data(&mut bins);
                level.set(Some(normalized_level(&bins)));
            }) as Box<dyn FnMut()>)
        };
        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                SAMPLE_INTERVAL_MS,
            )
            .map_err(unavailable)?;

        log::info!("[mic] listening, fft {FFT_SIZE}, {SAMPLE_INTERVAL_MS} ms interval");
        Ok(Self {
            level,
            interval_id,
            audio_ctx,
            stream,
            _tick: tick,
        })
    }

    /// Latest level since the previous take, if the timer fired.
    pub fn take_level(&self) -> Option<f32> {
        self.level.take()
    }

    /// Cancel the timer and release the capture device.
    pub fn stop(&self) {
        if let Some(window) = web::window() {
            window.clear_interval_with_handle(self.interval_id);
        }
        for track in self.stream.get_tracks().iter() {
            track.unchecked_into::<web::MediaStreamTrack>().stop();
        }
        let _ = self.audio_ctx.close();
        log::info!("[mic] stopped");
    }
}
