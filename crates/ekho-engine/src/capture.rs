//! Output extraction: final byte buffer plus transport metadata.

use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::page::ScreenshotParams;

use ekho_core::config::{OutputKind, PageMode, RenderConfig};
use ekho_core::models::document::RenderedDocument;

use crate::browser::EngineSession;
use crate::error::EngineError;

const CSS_PX_PER_INCH: f64 = 96.0;

/// Extract the final document from a loaded session.
///
/// `surface_height` is the (possibly resized) capture surface height; it
/// sizes the PDF paper for single-continuous output.
pub(crate) async fn capture(
    session: &EngineSession,
    config: &RenderConfig,
    stem: &str,
    surface_height: u32,
) -> Result<RenderedDocument, EngineError> {
    let bytes = match config.output {
        OutputKind::Pdf { page } => {
            let params = match page {
                // Zero margins: the sizer already pinned the surface to the
                // content extent.
                PageMode::SingleContinuous => PrintToPdfParams::builder()
                    .paper_width(config.viewport_width as f64 / CSS_PX_PER_INCH)
                    .paper_height(surface_height as f64 / CSS_PX_PER_INCH)
                    .margin_top(0.0)
                    .margin_bottom(0.0)
                    .margin_left(0.0)
                    .margin_right(0.0)
                    .print_background(true)
                    .build(),
                PageMode::Fixed(paper) => PrintToPdfParams::builder()
                    .paper_width(paper.width_in())
                    .paper_height(paper.height_in())
                    .print_background(true)
                    .build(),
            };
            session
                .page()
                .pdf(params)
                .await
                .map_err(|e| EngineError::Capture(e.to_string()))?
        }
        // Fixed pixel scale; no supersampling, to bound memory use.
        OutputKind::Image => session
            .page()
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(|e| EngineError::Capture(e.to_string()))?,
    };

    tracing::debug!(bytes = bytes.len(), "document captured");

    Ok(RenderedDocument {
        bytes,
        content_type: config.output.content_type(),
        filename: format!("{stem}.{}", config.output.extension()),
    })
}

/// Derive the transport filename stem: explicit override first, then the
/// site identifier with non-alphanumeric runs collapsed to `-`, then a
/// generic fallback.
pub fn filename_stem(site: &str, override_name: Option<&str>) -> String {
    let source = override_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(site);

    let mut stem = String::with_capacity(source.len());
    let mut pending_dash = false;
    for c in source.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !stem.is_empty() {
                stem.push('-');
            }
            pending_dash = false;
            stem.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if stem.is_empty() {
        "report".to_string()
    } else {
        stem
    }
}
