//! Per-prompt and brand-level rollups over a response set.
//!
//! Pure computation: the only side effect is a `tracing::warn!` per response
//! whose prompt reference does not resolve within the dataset.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use uuid::Uuid;

use brandscope_core::records::{Prompt, Response};

/// Label used in distributions for responses without a stage or country.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Rollup of all responses attributed to one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRollup {
    pub prompt_id: Uuid,
    pub response_count: u64,
    pub presence_count: u64,
    /// Distinct platforms the prompt was answered on.
    pub variant_platforms: BTreeSet<String>,
    pub citation_count: u64,
    /// Distinct competitors across the prompt's responses (union, not sum).
    pub competitor_set: BTreeSet<String>,
}

impl PromptRollup {
    fn new(prompt_id: Uuid) -> Self {
        PromptRollup {
            prompt_id,
            response_count: 0,
            presence_count: 0,
            variant_platforms: BTreeSet::new(),
            citation_count: 0,
            competitor_set: BTreeSet::new(),
        }
    }
}

/// Brand-level counters across every response, attributed or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandTotals {
    pub responses: u64,
    pub present_count: u64,
    pub citations_total: u64,
    pub distinct_competitors: u64,
    /// Responses whose `prompt_id` resolved to no prompt in the dataset.
    pub unattributed: u64,
}

impl BrandTotals {
    /// Share of responses where the brand was present.
    ///
    /// Defined as `0.0` (not NaN) for an empty response set.
    #[must_use]
    pub fn presence_rate(&self) -> f64 {
        if self.responses == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.present_count as f64 / self.responses as f64;
        rate
    }
}

/// Everything the aggregator derives from one dataset.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub prompt_rollups: BTreeMap<Uuid, PromptRollup>,
    pub totals: BrandTotals,
    pub platform_counts: BTreeMap<String, u64>,
    pub stage_counts: BTreeMap<String, u64>,
    pub sentiment_counts: BTreeMap<String, u64>,
    pub country_counts: BTreeMap<String, u64>,
    /// Competitor label → responses mentioning it (each response counts a
    /// competitor once, however often it repeats in the response).
    pub competitor_counts: BTreeMap<String, u64>,
    /// Topic tag → attributed responses whose prompt carries the tag.
    pub topic_counts: BTreeMap<String, u64>,
}

/// Group responses by prompt and compute per-prompt and brand-level rollups.
///
/// Every prompt gets a rollup, including prompts with zero responses. A
/// response referencing an unknown prompt is excluded from per-prompt
/// rollups but still counts toward brand totals and distributions.
#[must_use]
pub fn aggregate(prompts: &[Prompt], responses: &[Response]) -> Aggregation {
    let mut agg = Aggregation {
        prompt_rollups: prompts
            .iter()
            .map(|p| (p.id, PromptRollup::new(p.id)))
            .collect(),
        ..Aggregation::default()
    };

    let prompts_by_id: HashMap<Uuid, &Prompt> = prompts.iter().map(|p| (p.id, p)).collect();

    for response in responses {
        agg.totals.responses += 1;

        // Strict check: only an explicit `true` counts as presence.
        let present = response.brand_present == Some(true);
        if present {
            agg.totals.present_count += 1;
        }

        let citations = response.citations.len() as u64;
        agg.totals.citations_total += citations;

        // Dedupe within the response so a repeated mention counts once.
        let response_competitors: BTreeSet<&str> = response
            .competitors_present
            .iter()
            .map(String::as_str)
            .collect();
        for competitor in &response_competitors {
            *agg.competitor_counts
                .entry((*competitor).to_owned())
                .or_insert(0) += 1;
        }

        *agg.platform_counts
            .entry(response.platform.clone())
            .or_insert(0) += 1;
        let stage_label = response
            .stage
            .map_or_else(|| UNKNOWN_LABEL.to_owned(), |s| s.to_string());
        *agg.stage_counts.entry(stage_label).or_insert(0) += 1;
        *agg.sentiment_counts
            .entry(response.brand_sentiment.to_string())
            .or_insert(0) += 1;
        let country_label = response
            .country
            .clone()
            .unwrap_or_else(|| UNKNOWN_LABEL.to_owned());
        *agg.country_counts.entry(country_label).or_insert(0) += 1;

        let Some(rollup) = agg.prompt_rollups.get_mut(&response.prompt_id) else {
            agg.totals.unattributed += 1;
            tracing::warn!(
                response_id = %response.id,
                prompt_id = %response.prompt_id,
                "response references unknown prompt; counted as unattributed"
            );
            continue;
        };

        rollup.response_count += 1;
        if present {
            rollup.presence_count += 1;
        }
        rollup.citation_count += citations;
        rollup.variant_platforms.insert(response.platform.clone());
        rollup
            .competitor_set
            .extend(response_competitors.iter().map(|c| (*c).to_owned()));

        if let Some(prompt) = prompts_by_id.get(&response.prompt_id) {
            for topic in &prompt.topics {
                *agg.topic_counts.entry(topic.clone()).or_insert(0) += 1;
            }
        }
    }

    agg.totals.distinct_competitors = agg.competitor_counts.len() as u64;

    agg
}
