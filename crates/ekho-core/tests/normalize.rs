use serde_json::json;

use ekho_core::error::ValidationError;
use ekho_core::models::report::{Impact, Tone, NO_DATA};
use ekho_core::normalize::{classify_detail, normalize};

#[test]
fn missing_root_fails() {
    let err = normalize(None).unwrap_err();
    assert!(matches!(err, ValidationError::MissingRoot));
}

#[test]
fn non_object_root_fails() {
    let payload = json!([1, 2, 3]);
    let err = normalize(Some(&payload)).unwrap_err();
    assert!(matches!(err, ValidationError::NotAnObject("an array")));
}

#[test]
fn unrecognizable_payload_fails() {
    let payload = json!({ "foo": 1, "bar": "baz" });
    let err = normalize(Some(&payload)).unwrap_err();
    assert!(matches!(err, ValidationError::Unrecognizable));
}

#[test]
fn new_schema_name_wins_over_legacy() {
    let payload = json!({
        "site": "example.com",
        "overview": "current text",
        "executive_summary": "legacy text"
    });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(report.overview, "current text");
}

#[test]
fn legacy_executive_summary_resolves_overview() {
    let payload = json!({
        "site": "example.com",
        "executive_summary": "legacy summary"
    });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(report.overview, "legacy summary");
}

#[test]
fn missing_overview_gets_placeholder() {
    let payload = json!({ "site": "example.com" });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(report.overview, NO_DATA);
}

#[test]
fn top_issues_alias_maps_to_findings() {
    let payload = json!({
        "domain": "example.com",
        "top_issues": [
            {
                "category": "Speed",
                "issue": "Large images",
                "severity": "Alto",
                "fix": "Compress images"
            }
        ]
    });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(report.site, "example.com");
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].category, "Speed");
    assert_eq!(report.findings[0].impact, Impact::High);
    assert_eq!(report.findings[0].recommendation, "Compress images");
}

#[test]
fn growth_plan_alias_maps_to_opportunities() {
    let payload = json!({
        "company": "Acme",
        "growth_plan": ["✅ Publish weekly content", "• Build backlinks"]
    });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(
        report.opportunities,
        vec!["Publish weekly content", "Build backlinks"]
    );
}

#[test]
fn da_aliases_resolve_in_priority_order() {
    let payload = json!({ "site": "a.com", "da": 42 });
    assert_eq!(normalize(Some(&payload)).unwrap().da_score, Some(42));

    let payload = json!({ "site": "a.com", "da_score": 60, "da": 42 });
    assert_eq!(normalize(Some(&payload)).unwrap().da_score, Some(60));
}

#[test]
fn scores_coerced_from_strings_and_floats() {
    let payload = json!({
        "site": "a.com",
        "scores": { "seo": "7", "content": 8.6 }
    });
    let report = normalize(Some(&payload)).unwrap();
    let by_name: Vec<(&str, i64)> = report
        .scores
        .iter()
        .map(|s| (s.name.as_str(), s.score))
        .collect();
    assert_eq!(by_name, vec![("content", 9), ("seo", 7)]);
}

#[test]
fn clusters_parse_with_detail_classification() {
    let payload = json!({
        "site": "a.com",
        "clusters": {
            "technical": {
                "score": 55,
                "narrative": "Mixed results.",
                "details": ["❌ Missing sitemap", "✅ Strong HTTPS setup", "📊 42 indexed pages"]
            }
        }
    });
    let report = normalize(Some(&payload)).unwrap();
    assert_eq!(report.clusters.len(), 1);
    let cluster = &report.clusters[0];
    assert_eq!(cluster.score, 55);
    assert_eq!(cluster.details[0].tone, Tone::Negative);
    assert_eq!(cluster.details[0].text, "Missing sitemap");
    assert_eq!(cluster.details[1].tone, Tone::Positive);
    assert_eq!(cluster.details[2].tone, Tone::Data);
}

#[test]
fn impact_parses_locale_variants() {
    assert_eq!(Impact::parse("High"), Impact::High);
    assert_eq!(Impact::parse("alto"), Impact::High);
    assert_eq!(Impact::parse("Bajo"), Impact::Low);
    assert_eq!(Impact::parse("medio"), Impact::Medium);
    assert_eq!(Impact::parse("???"), Impact::Medium);
}

#[test]
fn classify_strips_marker_glyphs() {
    let detail = classify_detail("  ⚠️ Slow server response  ");
    assert_eq!(detail.text, "Slow server response");
    assert_eq!(detail.tone, Tone::Negative);
}

#[test]
fn classify_defaults_unmatched_text_to_neutral() {
    assert_eq!(classify_detail("Schema markup present").tone, Tone::Data);
    assert_eq!(classify_detail("42 indexed pages").tone, Tone::Data);
}
