use std::time::Duration;

use serde::Deserialize;

/// What the capture step extracts from the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Pdf { page: PageMode },
    Image,
}

impl OutputKind {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputKind::Pdf { .. } => "application/pdf",
            OutputKind::Image => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Pdf { .. } => "pdf",
            OutputKind::Image => "png",
        }
    }
}

/// Page geometry for PDF capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// One un-paginated page sized to the measured content extent.
    SingleContinuous,
    /// Standard paper format; the engine paginates as needed.
    Fixed(PaperSize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    /// Width in inches.
    pub fn width_in(self) -> f64 {
        match self {
            PaperSize::A4 => 8.27,
            PaperSize::Letter => 8.5,
        }
    }

    /// Height in inches.
    pub fn height_in(self) -> f64 {
        match self {
            PaperSize::A4 => 11.69,
            PaperSize::Letter => 11.0,
        }
    }
}

/// How long the content-load step waits before capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitStrategy {
    /// Markup parsed. Fast, but may precede external font/asset fetches.
    ContentParsed,
    /// No in-flight network activity. Needed when templates reference
    /// external fonts.
    NetworkIdle,
}

/// Immutable per-request rendering parameters.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub theme: String,
    pub locale: String,
    pub output: OutputKind,
    /// Capture surface width in CSS pixels.
    pub viewport_width: u32,
    /// Initial capture surface height; the sizer replaces it for
    /// single-continuous output.
    pub viewport_height: u32,
    pub wait: WaitStrategy,
    pub timeout: Duration,
}

impl RenderConfig {
    /// Request defaults: PDFs render as one continuous 800px-wide page,
    /// images as the 1200x630 card surface the templates are designed for.
    pub fn for_request(output: OutputKind, theme: &str, locale: &str, timeout: Duration) -> Self {
        let (width, height) = match output {
            OutputKind::Image => (1200, 630),
            OutputKind::Pdf { .. } => (800, 1120),
        };
        RenderConfig {
            theme: theme.to_string(),
            locale: locale.to_string(),
            output,
            viewport_width: width,
            viewport_height: height,
            wait: WaitStrategy::ContentParsed,
            timeout,
        }
    }
}
