//! Capture-surface sizing for single-continuous output: read the rendered
//! content's natural extent, then pin the surface to it so no page-break
//! logic ever triggers.

use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;

use crate::browser::EngineSession;
use crate::error::EngineError;

/// Fixed margin added below the measured extent so descenders and box
/// shadows are not clipped.
const EXTENT_MARGIN_PX: u32 = 16;

/// Measure the rendered content height in CSS pixels, margin included.
pub(crate) async fn content_height(session: &EngineSession) -> Result<u32, EngineError> {
    let extent: f64 = session
        .page()
        .evaluate("document.documentElement.scrollHeight")
        .await
        .map_err(|e| EngineError::Capture(format!("extent measurement failed: {e}")))?
        .into_value()
        .map_err(|e| EngineError::Capture(format!("extent was not numeric: {e}")))?;

    Ok(extent.ceil() as u32 + EXTENT_MARGIN_PX)
}

/// Resize the capture surface to exactly the given dimensions.
pub(crate) async fn resize_surface(
    session: &EngineSession,
    width: u32,
    height: u32,
) -> Result<(), EngineError> {
    let params = SetDeviceMetricsOverrideParams::builder()
        .width(width as i64)
        .height(height as i64)
        .device_scale_factor(1.0)
        .mobile(false)
        .build()
        .map_err(EngineError::Capture)?;

    session
        .page()
        .execute(params)
        .await
        .map_err(|e| EngineError::Capture(format!("surface resize failed: {e}")))?;

    tracing::debug!(width, height, "capture surface resized");
    Ok(())
}
