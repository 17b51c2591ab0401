use crate::constants::BASELINE_CURRENCY_ID;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, SystemTime};

/// One currency of the exchange overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyLine {
    pub id: String,
    /// Value in divines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_value: Option<f64>,
    /// Fields we don't interpret are kept so the cache file mirrors the response.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// poe.ninja exchange overview response, also the cache file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyOverview {
    #[serde(default)]
    pub lines: Vec<CurrencyLine>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrencyOverview {
    /// Usable only if the baseline currency is present.
    pub fn is_valid(&self) -> bool {
        self.line(BASELINE_CURRENCY_ID).is_some()
    }

    pub fn line(&self, id: &str) -> Option<&CurrencyLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Value of `id` in divines, if present and positive.
    pub fn value_of(&self, id: &str) -> Option<f64> {
        self.line(id)
            .and_then(|l| l.primary_value)
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Cache,
    Network,
}

/// Exchange rates for one league, with when they were last refreshed.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub overview: CurrencyOverview,
    pub updated_at: SystemTime,
    pub source: SnapshotSource,
}

impl RateSnapshot {
    pub fn age(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.updated_at)
            .unwrap_or_default()
    }
}
