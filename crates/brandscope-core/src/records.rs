//! Input record model: the normalized shapes the engine consumes.
//!
//! All records arrive pre-deduplicated by id from the upstream fetch layer;
//! nothing here is mutated after construction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::BrandReport;

/// Buyer-journey phase a prompt or response is classified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelStage {
    Awareness,
    Consideration,
    Decision,
    Retention,
}

impl std::fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunnelStage::Awareness => write!(f, "awareness"),
            FunnelStage::Consideration => write!(f, "consideration"),
            FunnelStage::Decision => write!(f, "decision"),
            FunnelStage::Retention => write!(f, "retention"),
        }
    }
}

/// Pre-classified sentiment toward the brand within one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Unknown => write!(f, "unknown"),
        }
    }
}

/// A reference/link included within a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: Option<String>,
}

/// A question posed to the answer engines, with its classification tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: Uuid,
    pub text: String,
    pub stage: Option<FunnelStage>,
    /// Ordered topic tags; the first tag doubles as the prompt's category.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Platforms the prompt is scheduled on.
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// One answer-engine response to a prompt.
///
/// `brand_present` is `Option<bool>` because upstream payloads carry
/// `null`/absent for unclassified responses; only `Some(true)` counts as
/// presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub platform: String,
    pub stage: Option<FunnelStage>,
    #[serde(default)]
    pub brand_present: Option<bool>,
    pub brand_sentiment: Sentiment,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub competitors_present: Vec<String>,
    pub country: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// One external campaign/property record, pre-filtered by brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalMetricRow {
    pub source_id: String,
    pub url: String,
    pub display_name: String,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

/// Operator-created link from an external row to this brand.
///
/// Accepted as-is by the linker; never re-validated or demoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualLink {
    pub source_id: String,
}

/// Everything the engine needs to build one report.
///
/// Constructed fresh per report request by the upstream fetch layer; the
/// engine never caches or mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandDataset {
    pub brand_id: Uuid,
    pub brand_url: String,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub external_rows: Vec<ExternalMetricRow>,
    #[serde(default)]
    pub manual_links: Vec<ManualLink>,
    pub prior_period_snapshot: Option<BrandReport>,
}
