use serde::{Deserialize, Serialize};

/// Default overview text when neither `overview` nor a legacy alias is present.
pub const NO_DATA: &str = "No data available";

/// Default narrative for a cluster that arrived without one.
pub const PENDING: &str = "Analysis pending...";

/// The canonical report every downstream component consumes.
///
/// Produced exclusively by [`crate::normalize::normalize`]; the renderer
/// never sees raw legacy field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Site identifier (domain or company name). Drives the output filename.
    pub site: String,
    /// Report date as formatted upstream for its locale; passed through verbatim.
    pub date: Option<String>,
    pub locale: String,
    pub overview: String,
    /// Named aspects with their raw scores, in stable (alphabetical) order.
    pub scores: Vec<AspectScore>,
    pub findings: Vec<Finding>,
    pub opportunities: Vec<String>,
    /// Domain-authority-style summary metric, 0–100.
    pub da_score: Option<i64>,
    /// Estimated organic traffic, preformatted upstream (e.g. "12.4K").
    pub traffic: Option<String>,
    pub clusters: Vec<Cluster>,
    /// Explicit output filename override, if the payload carried one.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectScore {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub issue: String,
    pub impact: Impact,
    pub recommendation: String,
}

/// Presentation classification for a finding. Unknown labels fall back to
/// Medium rather than failing the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Parse an impact label, accepting the English and Spanish variants
    /// the legacy payloads use.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" | "alto" | "alta" | "critical" | "crítico" => Impact::High,
            "low" | "bajo" | "baja" => Impact::Low,
            _ => Impact::Medium,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Impact::High => "impact-high",
            Impact::Medium => "impact-medium",
            Impact::Low => "impact-low",
        }
    }
}

/// A named grouping of related scored findings (technical, visibility, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub score: i64,
    pub narrative: String,
    pub details: Vec<Detail>,
}

/// A free-text detail line with its presentation tone.
///
/// Tone drives CSS class selection only, never control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detail {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Negative,
    Positive,
    Data,
}
