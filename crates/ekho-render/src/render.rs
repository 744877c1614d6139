use jiff::Timestamp;
use serde::Serialize;
use tera::{Context, Tera};

use ekho_core::config::RenderConfig;
use ekho_core::models::report::{AuditReport, Cluster};

use crate::error::RenderError;
use crate::theme::{self, Theme};

/// Process-wide branding resolved once at startup and injected here,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Branding {
    /// Startup-loaded logo as a data URI, if configured.
    pub logo_data_uri: Option<String>,
    pub product_name: String,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            logo_data_uri: None,
            product_name: "Ekho Engine".to_string(),
        }
    }
}

/// Render the canonical report to HTML.
///
/// Deterministic: identical report + config yields byte-identical markup
/// for the same `generated_at`. Free text passes through Tera's HTML
/// auto-escaping; the only value marked safe is the operator-configured
/// branding URI, nothing user-originated ever is.
pub fn render(
    report: &AuditReport,
    config: &RenderConfig,
    branding: &Branding,
    generated_at: Timestamp,
) -> Result<String, RenderError> {
    let theme = theme::lookup(&config.theme)
        .ok_or_else(|| RenderError::UnknownTheme(config.theme.clone()))?;

    let view = build_view(report, theme, branding, generated_at);

    let mut tera = Tera::default();
    // Template names keep the .html suffix so auto-escaping stays on.
    let name = format!("{}.html", theme.id);
    tera.add_raw_template(&name, theme.template)
        .map_err(|e| RenderError::TemplateParse(e.to_string()))?;

    let context = Context::from_value(serde_json::to_value(&view)?)
        .map_err(|e| RenderError::TemplateRender(e.to_string()))?;

    Ok(tera.render(&name, &context)?)
}

#[derive(Serialize)]
struct ReportView<'a> {
    site: &'a str,
    date: Option<&'a str>,
    locale: &'a str,
    overview: &'a str,
    generated_at: String,
    scores: Vec<ScoreView<'a>>,
    findings: Vec<FindingView<'a>>,
    opportunities: &'a [String],
    da: Option<BandView>,
    /// Accent/glow for the whole document: the DA band when present,
    /// otherwise the least favorable band of the theme.
    accent: &'static str,
    glow: &'static str,
    traffic: Option<&'a str>,
    clusters: Vec<ClusterView<'a>>,
    brand: &'a Branding,
}

#[derive(Serialize)]
struct ScoreView<'a> {
    name: &'a str,
    score: i64,
    token: &'static str,
    accent: &'static str,
}

#[derive(Serialize)]
struct FindingView<'a> {
    category: &'a str,
    issue: &'a str,
    impact: &'a str,
    impact_class: &'static str,
    recommendation: &'a str,
}

#[derive(Serialize)]
struct BandView {
    score: i64,
    token: &'static str,
    accent: &'static str,
    glow: &'static str,
}

#[derive(Serialize)]
struct ClusterView<'a> {
    name: &'a str,
    score: i64,
    token: &'static str,
    accent: &'static str,
    narrative: &'a str,
    details: Vec<DetailView<'a>>,
}

#[derive(Serialize)]
struct DetailView<'a> {
    text: &'a str,
    tone: &'static str,
}

fn build_view<'a>(
    report: &'a AuditReport,
    theme: &Theme,
    branding: &'a Branding,
    generated_at: Timestamp,
) -> ReportView<'a> {
    let scores = report
        .scores
        .iter()
        .map(|s| {
            let band = theme::classify(theme, s.score);
            ScoreView {
                name: &s.name,
                score: s.score.clamp(0, theme.scale_max),
                token: band.token,
                accent: band.accent,
            }
        })
        .collect();

    let findings = report
        .findings
        .iter()
        .map(|f| FindingView {
            category: &f.category,
            issue: &f.issue,
            impact: impact_label(f.impact, &report.locale),
            impact_class: f.impact.css_class(),
            recommendation: &f.recommendation,
        })
        .collect();

    let da = report.da_score.map(|score| {
        let band = theme::classify(theme, score);
        BandView {
            score: score.clamp(0, theme.scale_max),
            token: band.token,
            accent: band.accent,
            glow: band.glow,
        }
    });

    let doc_band = theme::classify(theme, report.da_score.unwrap_or(0));

    ReportView {
        site: &report.site,
        date: report.date.as_deref(),
        locale: &report.locale,
        overview: &report.overview,
        generated_at: generated_at.strftime("%Y-%m-%d %H:%M UTC").to_string(),
        scores,
        findings,
        opportunities: &report.opportunities,
        da,
        accent: doc_band.accent,
        glow: doc_band.glow,
        traffic: report.traffic.as_deref(),
        clusters: ordered_clusters(&report.clusters, theme),
        brand: branding,
    }
}

/// Clusters follow the theme's declared sequence, not input order, so
/// output is stable regardless of upstream ordering. Unknown clusters
/// append in name order.
fn ordered_clusters<'a>(clusters: &'a [Cluster], theme: &Theme) -> Vec<ClusterView<'a>> {
    let mut known = Vec::new();
    for wanted in theme.cluster_order {
        if let Some(c) = clusters.iter().find(|c| c.name.eq_ignore_ascii_case(wanted)) {
            known.push(c);
        }
    }

    let mut rest: Vec<&Cluster> = clusters
        .iter()
        .filter(|c| {
            !theme
                .cluster_order
                .iter()
                .any(|wanted| c.name.eq_ignore_ascii_case(wanted))
        })
        .collect();
    rest.sort_by(|a, b| a.name.cmp(&b.name));
    known.extend(rest);

    known
        .into_iter()
        .map(|c| {
            let band = theme::classify(theme, c.score);
            ClusterView {
                name: &c.name,
                score: c.score.clamp(0, theme.scale_max),
                token: band.token,
                accent: band.accent,
                narrative: &c.narrative,
                details: c
                    .details
                    .iter()
                    .map(|d| DetailView {
                        text: &d.text,
                        tone: match d.tone {
                            ekho_core::models::report::Tone::Negative => "negative",
                            ekho_core::models::report::Tone::Positive => "positive",
                            ekho_core::models::report::Tone::Data => "data",
                        },
                    })
                    .collect(),
            }
        })
        .collect()
}

fn impact_label(impact: ekho_core::models::report::Impact, locale: &str) -> &'static str {
    use ekho_core::models::report::Impact;
    if locale.starts_with("es") {
        match impact {
            Impact::High => "Alto",
            Impact::Medium => "Medio",
            Impact::Low => "Bajo",
        }
    } else {
        match impact {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}
