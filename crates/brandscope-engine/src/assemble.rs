//! Report assembly: one dataset in, one complete report out.
//!
//! 1. Aggregate responses into per-prompt rollups and brand totals.
//! 2. Derive the three rankings (prompts, competitors, topics).
//! 3. Compute per-KPI deltas against the prior-period snapshot.
//! 4. Resolve external rows through the entity linker.
//! 5. Apply the KPI visibility mask and emit the report.
//!
//! The report is fully computed before it is returned; a failure in any
//! sub-computation aborts the whole call and nothing partial escapes.

use std::collections::{BTreeMap, BTreeSet};

use brandscope_core::app_config::EngineConfig;
use brandscope_core::records::BrandDataset;
use brandscope_core::report::{BrandReport, Delta, Distributions, Kpi, ReportTotals};
use brandscope_linker::link_rows;

use crate::aggregate::{aggregate, Aggregation, BrandTotals};
use crate::delta::delta;
use crate::error::EngineError;
use crate::ranking::{build_top_entities, build_top_prompts};

/// Assemble a `BrandReport` from one dataset.
///
/// `visible_kpis` of `None` emits the full internal report; `Some(set)` is
/// the public/whitelabeled mode, where every field owned by an unlisted KPI
/// is absent from the output (not zeroed — consumers must be able to tell
/// "hidden" from "zero"). Structural fields (brand id, linked external
/// entities) are always emitted.
///
/// # Errors
///
/// Returns [`EngineError::MetricComputation`] when a KPI input — its
/// current value or the prior snapshot's value — is non-finite.
pub fn assemble(
    config: &EngineConfig,
    dataset: &BrandDataset,
    visible_kpis: Option<&BTreeSet<Kpi>>,
) -> Result<BrandReport, EngineError> {
    // Step 1: aggregate.
    let aggregation = aggregate(&dataset.prompts, &dataset.responses);

    // Step 2: rankings.
    let top_prompts = build_top_prompts(
        &dataset.prompts,
        &aggregation.prompt_rollups,
        config.top_prompts_limit,
    );
    let top_competitors =
        build_top_entities(&aggregation.competitor_counts, config.top_competitors_limit);
    let top_topics = build_top_entities(&aggregation.topic_counts, config.top_topics_limit);

    // Step 3: deltas, one per visible KPI, each independent of the others.
    let mut deltas = BTreeMap::new();
    for kpi in Kpi::ALL {
        if !kpi_visible(visible_kpis, kpi) {
            continue;
        }
        let entry = match dataset.prior_period_snapshot.as_ref() {
            None => Delta::no_baseline(),
            Some(prior) => delta(
                kpi,
                current_value(kpi, &aggregation.totals),
                prior_value(kpi, prior),
            )?,
        };
        deltas.insert(kpi, entry);
    }

    // Step 4: entity linking.
    let manual: BTreeSet<String> = dataset
        .manual_links
        .iter()
        .map(|link| link.source_id.clone())
        .collect();
    let linked_external_entities = link_rows(
        dataset.brand_id,
        &dataset.brand_url,
        &dataset.external_rows,
        &manual,
    );

    // Step 5: visibility mask.
    let presence = kpi_visible(visible_kpis, Kpi::Presence);
    let responses = kpi_visible(visible_kpis, Kpi::Responses);
    let citations = kpi_visible(visible_kpis, Kpi::Citations);
    let competitors = kpi_visible(visible_kpis, Kpi::Competitors);

    let Aggregation {
        totals,
        platform_counts,
        stage_counts,
        sentiment_counts,
        country_counts,
        ..
    } = aggregation;

    let report_totals = ReportTotals {
        responses: responses.then_some(totals.responses),
        present_count: presence.then_some(totals.present_count),
        presence_rate: presence.then(|| totals.presence_rate()),
        unattributed: responses.then_some(totals.unattributed),
        citations_total: citations.then_some(totals.citations_total),
        distinct_competitors: competitors.then_some(totals.distinct_competitors),
    };

    let distributions = Distributions {
        platform: responses.then_some(platform_counts),
        stage: responses.then_some(stage_counts),
        // Sentiment describes responses where the brand appeared, so it
        // rides with the presence KPI.
        sentiment: presence.then_some(sentiment_counts),
        country: responses.then_some(country_counts),
    };

    Ok(BrandReport {
        brand_id: dataset.brand_id,
        totals: report_totals,
        distributions,
        top_prompts: responses.then_some(top_prompts),
        top_competitors: competitors.then_some(top_competitors),
        top_topics: responses.then_some(top_topics),
        deltas,
        linked_external_entities,
    })
}

fn kpi_visible(visible_kpis: Option<&BTreeSet<Kpi>>, kpi: Kpi) -> bool {
    visible_kpis.is_none_or(|set| set.contains(&kpi))
}

#[allow(clippy::cast_precision_loss)]
fn current_value(kpi: Kpi, totals: &BrandTotals) -> f64 {
    match kpi {
        Kpi::Presence => totals.presence_rate(),
        Kpi::Responses => totals.responses as f64,
        Kpi::Citations => totals.citations_total as f64,
        Kpi::Competitors => totals.distinct_competitors as f64,
    }
}

#[allow(clippy::cast_precision_loss)]
fn prior_value(kpi: Kpi, prior: &BrandReport) -> Option<f64> {
    match kpi {
        Kpi::Presence => prior.totals.presence_rate,
        Kpi::Responses => prior.totals.responses.map(|v| v as f64),
        Kpi::Citations => prior.totals.citations_total.map(|v| v as f64),
        Kpi::Competitors => prior.totals.distinct_competitors.map(|v| v as f64),
    }
}
