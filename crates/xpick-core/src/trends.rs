use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source id assumed when an observation arrives without one.
pub const DEFAULT_SOURCE_ID: &str = "tiktok_trends";

/// One keyword/country/category/window data point collected from an external
/// trend source, normalized for ingestion into the shared time-series table.
///
/// The logical identity key is
/// `(source_id, country, category_key, window_period, keyword)`; two
/// observations with the same key describe the same logical fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendObservation {
    /// Registry id of the producing source (e.g. `"google_trends"`).
    #[serde(default = "default_source_id")]
    pub source_id: String,
    /// Two-letter market code as used by the spreadsheets (`US`, `UK`, ...).
    pub country: String,
    /// Category registry key, e.g. `"tech_electronics"`.
    pub category_key: String,
    /// Collection window, e.g. `"1d"`, `"7d"`, `"30d"`.
    pub window_period: String,
    pub keyword: String,
    #[serde(default)]
    pub rank: Option<i32>,
    #[serde(default)]
    pub raw_score: Option<f64>,
    /// Free-form collection metadata, persisted as JSONB.
    #[serde(default = "empty_meta")]
    pub meta: serde_json::Value,
    /// Collection timestamp; `None` lets the store default to `NOW()`.
    #[serde(default)]
    pub collected_at: Option<DateTime<Utc>>,
    /// Caller-supplied geo override for the search-trends mapping column.
    #[serde(default)]
    pub search_geo: Option<String>,
    /// Caller-supplied region override for the social-trends mapping column.
    #[serde(default)]
    pub social_region: Option<String>,
}

fn default_source_id() -> String {
    DEFAULT_SOURCE_ID.to_string()
}

fn empty_meta() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl TrendObservation {
    /// Effective `(search_geo, social_region)` pair: caller overrides win,
    /// otherwise the built-in per-country defaults apply.
    #[must_use]
    pub fn region(&self) -> (String, String) {
        let (geo, region) = region_defaults(&self.country);
        (
            self.search_geo.clone().unwrap_or(geo),
            self.social_region.clone().unwrap_or(region),
        )
    }
}

/// Default `(search_geo, social_region)` mapping for a market code.
///
/// Covers the launch markets explicitly (`UK` maps to ISO `GB` on the search
/// side); any other code passes through unchanged for both columns.
#[must_use]
pub fn region_defaults(country: &str) -> (String, String) {
    match country {
        "UK" => ("GB".to_string(), "GB".to_string()),
        "US" | "FR" | "DE" => (country.to_string(), country.to_string()),
        other => (other.to_string(), other.to_string()),
    }
}

/// Human-readable display name for a source id.
///
/// Known sources get their product names; anything else is title-cased from
/// its underscore-separated id.
#[must_use]
pub fn source_display_name(source_id: &str) -> String {
    match source_id {
        "google_trends" => "Google Trends".to_string(),
        "tiktok_trends" => "TikTok Trends".to_string(),
        other => {
            let mut out = String::with_capacity(other.len());
            for (i, part) in other.split('_').enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            out
        }
    }
}

/// What to do when an incoming fact collides with an existing row on the
/// logical identity key.
///
/// Re-collection jobs refresh stale values with [`ConflictMode::Replace`];
/// append-once feeds use [`ConflictMode::InsertOrIgnore`] so replays are
/// harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictMode {
    /// Keep the first collected value; duplicate keys are a successful no-op.
    #[default]
    InsertOrIgnore,
    /// Drop any previous rows for the key, then insert the fresh value.
    Replace,
}
