//! Theme configuration: per-theme color thresholds, tokens, and section
//! ordering. Near-duplicate template variants collapse into one renderer
//! parameterized by these values.

/// One step of the score-to-color function. Bands are declared in
/// descending `min` order; the last band always has `min == 0`.
pub struct ScoreBand {
    pub min: i64,
    /// Stable token emitted into markup (`band-good` etc.), used by tests
    /// and downstream tooling.
    pub token: &'static str,
    /// Accent color for the band.
    pub accent: &'static str,
    /// Translucent glow variant of the accent, for card-style themes.
    pub glow: &'static str,
}

pub struct Theme {
    pub id: &'static str,
    pub template: &'static str,
    /// Upper bound of the score scale (10 or 100); scores are clamped to
    /// `0..=scale_max` before classification.
    pub scale_max: i64,
    pub bands: &'static [ScoreBand],
    /// Declared cluster sequence; rendering follows this order, not input
    /// order. Clusters outside the list render afterwards in name order.
    pub cluster_order: &'static [&'static str],
}

/// Thresholds used by the report-style themes: >80 good, 50-80 fair, <50 poor.
const REPORT_BANDS: &[ScoreBand] = &[
    ScoreBand {
        min: 81,
        token: "good",
        accent: "#10b981",
        glow: "rgba(16, 185, 129, 0.4)",
    },
    ScoreBand {
        min: 50,
        token: "fair",
        accent: "#fbbf24",
        glow: "rgba(251, 191, 36, 0.4)",
    },
    ScoreBand {
        min: 0,
        token: "poor",
        accent: "#ef4444",
        glow: "rgba(239, 68, 68, 0.4)",
    },
];

/// Domain-authority thresholds from the card themes: >=50 good, 30-49 fair.
const CARD_BANDS: &[ScoreBand] = &[
    ScoreBand {
        min: 50,
        token: "good",
        accent: "#10b981",
        glow: "rgba(16, 185, 129, 0.4)",
    },
    ScoreBand {
        min: 30,
        token: "fair",
        accent: "#fbbf24",
        glow: "rgba(251, 191, 36, 0.4)",
    },
    ScoreBand {
        min: 0,
        token: "poor",
        accent: "#ef4444",
        glow: "rgba(239, 68, 68, 0.4)",
    },
];

const CLUSTER_ORDER: &[&str] = &["technical", "visibility", "authority", "trust"];

const THEMES: &[Theme] = &[
    Theme {
        id: "classic",
        template: include_str!("../templates/classic.html"),
        scale_max: 100,
        bands: REPORT_BANDS,
        cluster_order: CLUSTER_ORDER,
    },
    Theme {
        id: "dark-minimal",
        template: include_str!("../templates/dark_minimal.html"),
        scale_max: 100,
        bands: REPORT_BANDS,
        cluster_order: CLUSTER_ORDER,
    },
    Theme {
        id: "glassmorphic",
        template: include_str!("../templates/glassmorphic.html"),
        scale_max: 100,
        bands: CARD_BANDS,
        cluster_order: CLUSTER_ORDER,
    },
    Theme {
        id: "growth-audit",
        template: include_str!("../templates/growth_audit.html"),
        scale_max: 100,
        bands: CARD_BANDS,
        cluster_order: CLUSTER_ORDER,
    },
];

pub fn lookup(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

pub fn theme_ids() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.id)
}

/// Clamp a score to the theme scale and classify it. Monotonic: a higher
/// score never maps to a less favorable band.
pub fn classify(theme: &Theme, score: i64) -> &'static ScoreBand {
    let clamped = score.clamp(0, theme.scale_max);
    theme
        .bands
        .iter()
        .find(|band| clamped >= band.min)
        .unwrap_or_else(|| {
            // Declared band lists always end at min 0, so this is unreachable
            // for any input after clamping.
            &theme.bands[theme.bands.len() - 1]
        })
}
