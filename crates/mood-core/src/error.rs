//! Recoverable capability failures; each one selects a fallback.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("GPU context unavailable: {0}")]
    GpuUnavailable(String),
    #[error("microphone unavailable: {0}")]
    MicrophoneUnavailable(String),
}
