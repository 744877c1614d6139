use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use ekho_render::Branding;

/// Shared application state, injected into route handlers via Axum state.
/// Everything here is resolved once at startup and immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub branding: Arc<Branding>,
    pub default_theme: String,
    pub render_timeout: Duration,
    /// Admission control: bounds concurrent engine processes. Requests
    /// beyond the limit queue for a permit.
    pub render_slots: Arc<Semaphore>,
}
