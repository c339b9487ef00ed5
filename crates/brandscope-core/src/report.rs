//! Report model: everything the engine emits for one brand and period.
//!
//! Every field a visibility mask can hide is an `Option` serialized with
//! `skip_serializing_if`, so a hidden KPI is absent from the output rather
//! than zeroed. Map-shaped fields use `BTreeMap` so repeated runs over
//! identical input serialize byte-identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A delta-bearing KPI of the report.
///
/// Declaration order is the canonical ordering for KPI-keyed maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Kpi {
    Presence,
    Responses,
    Citations,
    Competitors,
}

impl Kpi {
    /// All KPIs in canonical order.
    pub const ALL: [Kpi; 4] = [
        Kpi::Presence,
        Kpi::Responses,
        Kpi::Citations,
        Kpi::Competitors,
    ];
}

impl std::fmt::Display for Kpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kpi::Presence => write!(f, "presence"),
            Kpi::Responses => write!(f, "responses"),
            Kpi::Citations => write!(f, "citations"),
            Kpi::Competitors => write!(f, "competitors"),
        }
    }
}

/// Movement of a KPI against the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
    /// No baseline existed; the delta carries no information.
    Unknown,
}

/// Current-vs-previous-period movement for one KPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub absolute: f64,
    pub percent: f64,
    pub direction: Direction,
}

impl Delta {
    /// The delta emitted when the dataset carries no prior snapshot.
    #[must_use]
    pub fn no_baseline() -> Self {
        Delta {
            absolute: 0.0,
            percent: 0.0,
            direction: Direction::Unknown,
        }
    }
}

/// One entry of the top-prompts ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPrompt {
    pub rank: u32,
    pub prompt_id: Uuid,
    pub text: String,
    pub category: String,
    pub response_count: u64,
}

/// One entry of a labeled ranking (competitors, topics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub rank: u32,
    pub label: String,
    pub count: u64,
}

/// How an external row was matched to the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Normalized,
    Manual,
}

/// Qualitative certainty of an entity match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    Exact,
    High,
    Low,
    Manual,
}

/// An external row resolved to this brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedEntity {
    pub external_row_id: String,
    pub brand_id: Uuid,
    pub match_method: MatchMethod,
    pub match_confidence: MatchConfidence,
}

/// Brand-level counters. A `None` means the KPI owning that field was
/// filtered out, not that it was zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_rate: Option<f64>,
    /// Responses whose prompt reference did not resolve in the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unattributed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_competitors: Option<u64>,
}

/// Label → response-count breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<BTreeMap<String, u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<BTreeMap<String, u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<BTreeMap<String, u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<BTreeMap<String, u64>>,
}

/// The consolidated per-brand report.
///
/// Created fresh per `assemble` call and immutable afterwards; either a
/// complete report is returned or the call fails, never something partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandReport {
    pub brand_id: Uuid,
    pub totals: ReportTotals,
    pub distributions: Distributions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_prompts: Option<Vec<RankedPrompt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_competitors: Option<Vec<RankedEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_topics: Option<Vec<RankedEntity>>,
    pub deltas: BTreeMap<Kpi, Delta>,
    pub linked_external_entities: Vec<LinkedEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_display_matches_serde() {
        for kpi in Kpi::ALL {
            let json = serde_json::to_string(&kpi).unwrap();
            assert_eq!(json, format!("\"{kpi}\""));
        }
    }

    #[test]
    fn kpi_canonical_order() {
        let mut sorted = Kpi::ALL;
        sorted.sort();
        assert_eq!(sorted, Kpi::ALL);
    }

    #[test]
    fn no_baseline_delta_is_unknown() {
        let delta = Delta::no_baseline();
        assert_eq!(delta.direction, Direction::Unknown);
        assert_eq!(delta.absolute, 0.0);
        assert_eq!(delta.percent, 0.0);
    }

    #[test]
    fn hidden_totals_fields_absent_from_json() {
        let totals = ReportTotals {
            present_count: Some(4),
            presence_rate: Some(0.5),
            ..ReportTotals::default()
        };
        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.contains("present_count"), "got: {json}");
        assert!(!json.contains("citations_total"), "got: {json}");
        assert!(!json.contains("responses"), "got: {json}");
    }

    #[test]
    fn deltas_map_serializes_with_kpi_keys() {
        let mut deltas = BTreeMap::new();
        deltas.insert(Kpi::Presence, Delta::no_baseline());
        let json = serde_json::to_string(&deltas).unwrap();
        assert_eq!(
            json,
            "{\"presence\":{\"absolute\":0.0,\"percent\":0.0,\"direction\":\"unknown\"}}"
        );
    }
}
