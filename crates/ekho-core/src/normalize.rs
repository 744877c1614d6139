//! Input adapter: maps arbitrary/legacy payload shapes onto [`AuditReport`].
//!
//! Alias resolution is priority-ordered: the current schema name wins, then
//! legacy fallbacks, then a human-readable default. Pure transformation,
//! no side effects.

use serde_json::Value;

use crate::error::ValidationError;
use crate::models::report::{
    AspectScore, AuditReport, Cluster, Detail, Finding, Impact, Tone, NO_DATA, PENDING,
};

/// Field groups that make a payload recognizable as a report at all.
const RECOGNIZED: &[&str] = &[
    "site",
    "domain",
    "company",
    "overview",
    "executive_summary",
    "findings",
    "top_issues",
    "opportunities",
    "growth_plan",
    "scores",
    "aspect_scores",
    "da_score",
    "da",
    "domain_authority",
    "clusters",
    "pillars",
];

/// Normalize a raw payload into the canonical report.
///
/// Fails when the root payload is missing, is not an object, or carries
/// none of the recognized field groups under any alias.
pub fn normalize(raw: Option<&Value>) -> Result<AuditReport, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingRoot)?;
    let obj = raw
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_kind(raw)))?;

    if !RECOGNIZED.iter().any(|k| obj.contains_key(*k)) {
        return Err(ValidationError::Unrecognizable);
    }

    let site = string_alias(obj, &["site", "domain", "company"]).unwrap_or_default();
    let overview =
        string_alias(obj, &["overview", "executive_summary"]).unwrap_or_else(|| NO_DATA.to_string());

    Ok(AuditReport {
        site,
        date: string_alias(obj, &["date", "report_date"]),
        locale: string_alias(obj, &["locale", "lang"]).unwrap_or_else(|| "en".to_string()),
        overview,
        scores: scores(obj),
        findings: findings(obj),
        opportunities: opportunities(obj),
        da_score: int_alias(obj, &["da_score", "da", "domain_authority"]),
        traffic: string_alias(obj, &["traffic", "organic_traffic"]),
        clusters: clusters(obj),
        filename: string_alias(obj, &["filename", "file_name"]),
    })
}

/// Classify a free-text detail line and strip its presentation glyphs.
pub fn classify_detail(raw: &str) -> Detail {
    let text = strip_markers(raw);
    let lower = text.to_lowercase();

    const NEGATIVE: &[&str] = &[
        "missing", "slow", "error", "broken", "weak", "poor", "lack", "no ", "not ", "falta",
        "lento", "débil", "sin ",
    ];
    const POSITIVE: &[&str] = &[
        "good", "strong", "excellent", "solid", "fast", "well", "optimized", "bueno", "fuerte",
        "excelente", "rápido",
    ];

    // Unmatched text stays neutral rather than being presented as a win.
    let tone = if NEGATIVE.iter().any(|k| lower.contains(k)) {
        Tone::Negative
    } else if POSITIVE.iter().any(|k| lower.contains(k)) {
        Tone::Positive
    } else {
        Tone::Data
    };

    Detail { text, tone }
}

/// Strip leading marker glyphs (checkmarks, warning signs, bullets) that
/// upstream embeds for presentation.
fn strip_markers(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['✅', '⚠', '❌', '📊', '•', '-', '*', '\u{fe0f}', ' '])
        .trim()
        .to_string()
}

fn string_alias(obj: &serde_json::Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        obj.get(*name).and_then(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    })
}

fn int_alias(obj: &serde_json::Map<String, Value>, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|name| obj.get(*name).and_then(coerce_int))
}

/// Coerce a numeric score out of a number or numeric string.
fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

fn scores(obj: &serde_json::Map<String, Value>) -> Vec<AspectScore> {
    let map = ["scores", "aspect_scores"]
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_object));

    // serde_json maps iterate in key order, so aspect order is stable
    // regardless of upstream ordering.
    map.map(|m| {
        m.iter()
            .filter_map(|(name, v)| {
                coerce_int(v).map(|score| AspectScore {
                    name: name.clone(),
                    score,
                })
            })
            .collect()
    })
    .unwrap_or_default()
}

fn findings(obj: &serde_json::Map<String, Value>) -> Vec<Finding> {
    let arr = ["findings", "top_issues"]
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_array));

    arr.map(|items| {
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|f| Finding {
                category: string_alias(f, &["category", "area"]).unwrap_or_else(|| "General".to_string()),
                issue: string_alias(f, &["issue", "problem"]).unwrap_or_else(|| NO_DATA.to_string()),
                impact: string_alias(f, &["impact", "severity"])
                    .map(|s| Impact::parse(&s))
                    .unwrap_or(Impact::Medium),
                recommendation: string_alias(f, &["recommendation", "fix"])
                    .unwrap_or_else(|| PENDING.to_string()),
            })
            .collect()
    })
    .unwrap_or_default()
}

fn opportunities(obj: &serde_json::Map<String, Value>) -> Vec<String> {
    let arr = ["opportunities", "growth_plan"]
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_array));

    arr.map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| strip_markers(s))
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn clusters(obj: &serde_json::Map<String, Value>) -> Vec<Cluster> {
    let map = ["clusters", "pillars"]
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_object));

    map.map(|m| {
        m.iter()
            .filter_map(|(name, v)| v.as_object().map(|c| (name, c)))
            .map(|(name, c)| Cluster {
                name: name.clone(),
                score: c.get("score").and_then(coerce_int).unwrap_or(0),
                narrative: string_alias(c, &["narrative", "summary"])
                    .unwrap_or_else(|| PENDING.to_string()),
                details: c
                    .get("details")
                    .or_else(|| c.get("items"))
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(classify_detail)
                            .filter(|d| !d.text.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    })
    .unwrap_or_default()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
