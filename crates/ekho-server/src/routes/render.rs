use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use ekho_core::config::{OutputKind, PageMode, PaperSize, RenderConfig, WaitStrategy};
use ekho_core::normalize::normalize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Raw report payload; absence fails validation before any engine
    /// is launched.
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub output_kind: OutputKindParam,
    pub theme: Option<String>,
    pub page: Option<PageParam>,
    pub wait: Option<WaitStrategy>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKindParam {
    #[default]
    Pdf,
    Image,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageParam {
    Single,
    A4,
    Letter,
}

/// Render a report to PDF or PNG and stream it back as an attachment.
pub async fn render_report(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    let report = normalize(req.data.as_ref())?;

    let output = match req.output_kind {
        OutputKindParam::Pdf => OutputKind::Pdf {
            page: match req.page {
                None | Some(PageParam::Single) => PageMode::SingleContinuous,
                Some(PageParam::A4) => PageMode::Fixed(PaperSize::A4),
                Some(PageParam::Letter) => PageMode::Fixed(PaperSize::Letter),
            },
        },
        OutputKindParam::Image => OutputKind::Image,
    };

    let theme = req.theme.as_deref().unwrap_or(&state.default_theme);
    let mut config = RenderConfig::for_request(output, theme, &report.locale, state.render_timeout);
    if let Some(wait) = req.wait {
        config.wait = wait;
    }

    let markup = ekho_render::render(&report, &config, &state.branding, jiff::Timestamp::now())?;
    let stem = ekho_engine::filename_stem(&report.site, report.filename.as_deref());

    let _permit = state
        .render_slots
        .acquire()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let doc = ekho_engine::render_document(&markup, &stem, &config)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                phase = e.phase(),
                error = %e,
                "render failed"
            );
            ApiError::Internal(e.to_string())
        })?;

    tracing::info!(
        request_id = %request_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        bytes = doc.bytes.len(),
        filename = %doc.filename,
        "render complete"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, doc.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.filename),
        )
        .body(Body::from(doc.bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
