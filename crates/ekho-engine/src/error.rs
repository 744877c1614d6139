use std::time::Duration;

use thiserror::Error;

/// Controller failures. Every variant reaches the caller only after
/// teardown has been attempted.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Content failed to settle within the configured budget.
    #[error("content failed to settle within {timeout:?}")]
    Timeout { timeout: Duration },

    /// Process launch or content load failed for a non-timeout reason.
    #[error("rendering engine failed during {phase}: {message}")]
    Crash { phase: &'static str, message: String },

    /// Extraction failed after a successful load.
    #[error("capture failed: {0}")]
    Capture(String),
}

impl EngineError {
    /// The pipeline phase that failed, for diagnostics.
    pub fn phase(&self) -> &'static str {
        match self {
            EngineError::Timeout { .. } => "load",
            EngineError::Crash { phase, .. } => phase,
            EngineError::Capture(_) => "capture",
        }
    }
}
