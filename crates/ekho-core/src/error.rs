use thiserror::Error;

/// Adapter failures. These are client faults: the payload could not be
/// resolved into a canonical report even after legacy-alias fallback.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("request payload has no data field")]
    MissingRoot,

    #[error("report payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("payload contains no recognizable report fields")]
    Unrecognizable,
}
