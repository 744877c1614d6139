//! ekho-engine
//!
//! Headless-engine control: one isolated Chromium process per request,
//! driven through launch → load → measure → capture → teardown with the
//! release step guaranteed on every exit path.

pub mod browser;
pub mod capture;
pub mod error;
pub mod sizer;

pub use browser::{with_engine, EngineSession};
pub use capture::filename_stem;
pub use error::EngineError;

use ekho_core::config::{OutputKind, PageMode, RenderConfig};
use ekho_core::models::document::RenderedDocument;

/// Run the full measure/resize/capture pipeline for one request.
///
/// Single-continuous PDF output measures the content extent and pins the
/// surface to it first; fixed-page and image output capture directly.
pub async fn render_document(
    markup: &str,
    stem: &str,
    config: &RenderConfig,
) -> Result<RenderedDocument, EngineError> {
    with_engine(markup, config, |session| async move {
        let surface_height = match config.output {
            OutputKind::Pdf {
                page: PageMode::SingleContinuous,
            } => {
                let height = sizer::content_height(&session).await?;
                sizer::resize_surface(&session, config.viewport_width, height).await?;
                height
            }
            _ => config.viewport_height,
        };

        capture::capture(&session, config, stem, surface_height).await
    })
    .await
}
