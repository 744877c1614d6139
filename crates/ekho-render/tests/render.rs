use std::time::Duration;

use jiff::Timestamp;
use serde_json::json;

use ekho_core::config::{OutputKind, PageMode, RenderConfig};
use ekho_core::models::report::{AspectScore, AuditReport, NO_DATA};
use ekho_core::normalize::normalize;
use ekho_render::{render, Branding};

fn config(theme: &str) -> RenderConfig {
    RenderConfig::for_request(
        OutputKind::Pdf {
            page: PageMode::SingleContinuous,
        },
        theme,
        "en",
        Duration::from_secs(30),
    )
}

fn fixed_now() -> Timestamp {
    "2026-08-27T12:00:00Z".parse().unwrap()
}

fn empty_report(site: &str) -> AuditReport {
    AuditReport {
        site: site.to_string(),
        date: None,
        locale: "en".to_string(),
        overview: NO_DATA.to_string(),
        scores: Vec::new(),
        findings: Vec::new(),
        opportunities: Vec::new(),
        da_score: None,
        traffic: None,
        clusters: Vec::new(),
        filename: None,
    }
}

#[test]
fn render_is_deterministic_for_fixed_timestamp() {
    let payload = json!({
        "site": "example.com",
        "overview": "Solid baseline.",
        "da_score": 62,
        "scores": { "seo": 71, "content": 88 },
        "findings": [
            { "category": "Speed", "issue": "Slow TTFB", "impact": "High", "recommendation": "Add caching" }
        ],
        "opportunities": ["Publish case studies"]
    });
    let report = normalize(Some(&payload)).unwrap();
    let branding = Branding::default();

    let a = render(&report, &config("classic"), &branding, fixed_now()).unwrap();
    let b = render(&report, &config("classic"), &branding, fixed_now()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn score_87_maps_to_good_exactly_once_per_occurrence() {
    // classic thresholds: >80 good, 50-80 fair, <50 poor
    let mut report = empty_report("example.com");
    report.da_score = Some(87);

    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert_eq!(markup.matches("band-good").count(), 1);
    assert_eq!(markup.matches("band-fair").count(), 0);
    assert!(markup.contains(">87<"));
}

#[test]
fn out_of_range_scores_are_clamped() {
    let mut report = empty_report("example.com");
    report.scores = vec![
        AspectScore {
            name: "seo".to_string(),
            score: 150,
        },
        AspectScore {
            name: "trust".to_string(),
            score: -5,
        },
    ];

    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert!(markup.contains(">100<"));
    assert!(markup.contains(">0<"));
    assert!(!markup.contains("150"));
    assert!(!markup.contains("-5"));
}

#[test]
fn classification_is_monotonic_and_total() {
    let theme = ekho_render::theme::lookup("classic").unwrap();
    let declared: Vec<&str> = theme.bands.iter().map(|b| b.token).collect();

    let mut last_rank = 0usize;
    for score in 0..=100 {
        let band = ekho_render::classify(theme, score);
        let rank = declared.len()
            - 1
            - declared.iter().position(|t| *t == band.token).unwrap();
        assert!(
            rank >= last_rank || score == 0,
            "favorability regressed at score {score}"
        );
        last_rank = rank;
        assert!(declared.contains(&band.token));
    }
}

#[test]
fn free_text_is_html_escaped() {
    let mut report = empty_report("example.com");
    report.overview = "<script>alert('x')</script> & more".to_string();

    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert!(!markup.contains("<script>alert"));
    assert!(markup.contains("&lt;script&gt;"));
    assert!(markup.contains("&amp; more"));
}

#[test]
fn legacy_executive_summary_flows_through_to_markup() {
    let payload = json!({
        "site": "example.com",
        "executive_summary": "Legacy overview text"
    });
    let report = normalize(Some(&payload)).unwrap();
    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert!(markup.contains("Legacy overview text"));
}

#[test]
fn missing_overview_renders_placeholder_verbatim() {
    let payload = json!({ "site": "example.com" });
    let report = normalize(Some(&payload)).unwrap();
    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert!(markup.contains("No data available"));
}

#[test]
fn empty_findings_render_placeholder_row() {
    let payload = json!({ "site": "example.com", "findings": [] });
    let report = normalize(Some(&payload)).unwrap();
    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();
    assert!(markup.contains("No findings reported"));
    assert!(markup.contains("No opportunities identified"));
}

#[test]
fn cluster_order_is_declared_not_input_order() {
    let payload = json!({
        "site": "example.com",
        "clusters": {
            "trust": { "score": 40, "narrative": "t" },
            "technical": { "score": 70, "narrative": "a" },
            "visibility": { "score": 55, "narrative": "v" }
        }
    });
    let report = normalize(Some(&payload)).unwrap();
    let markup = render(&report, &config("classic"), &Branding::default(), fixed_now()).unwrap();

    let technical = markup.find("technical").unwrap();
    let visibility = markup.find("visibility").unwrap();
    let trust = markup.find("trust").unwrap();
    assert!(technical < visibility);
    assert!(visibility < trust);
}

#[test]
fn every_theme_renders() {
    let payload = json!({
        "site": "example.com",
        "overview": "Fine.",
        "da": 45,
        "traffic": "12.4K",
        "findings": [],
        "clusters": {
            "technical": { "score": 60, "narrative": "ok", "details": ["✅ Strong setup"] }
        }
    });
    let report = normalize(Some(&payload)).unwrap();
    for id in ekho_render::theme::theme_ids() {
        let markup = render(&report, &config(id), &Branding::default(), fixed_now()).unwrap();
        assert!(markup.contains("example.com"), "theme {id}");
        assert!(markup.contains("2026-08-27"), "theme {id}");
    }
}

#[test]
fn unknown_theme_is_rejected() {
    let report = empty_report("example.com");
    let err = render(&report, &config("vaporwave"), &Branding::default(), fixed_now());
    assert!(err.is_err());
}

#[test]
fn logo_data_uri_is_embedded_when_present() {
    let report = empty_report("example.com");
    let branding = Branding {
        logo_data_uri: Some("data:image/svg+xml;base64,PHN2Zz4=".to_string()),
        product_name: "Ekho Engine".to_string(),
    };
    let markup = render(&report, &config("classic"), &branding, fixed_now()).unwrap();
    assert!(markup.contains("data:image/svg+xml;base64,PHN2Zz4="));
    // The URI must reach the src attribute verbatim, not entity-encoded.
    assert!(!markup.contains("image&#x2F;svg"));
}
