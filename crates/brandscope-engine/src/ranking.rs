//! Top-N rankings with deterministic tie-breaks.
//!
//! Naive sorts on equal keys are unstable across environments; every ranking
//! here sorts on an explicit `(Reverse(metric), natural id)` key so identical
//! input always yields identical order.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use brandscope_core::records::Prompt;
use brandscope_core::report::{RankedEntity, RankedPrompt};

use crate::aggregate::PromptRollup;

/// Sort candidates descending by `metric`, tie-broken ascending by
/// `tie_key`, and truncate to the top `n`.
///
/// Fewer than `n` candidates returns all of them; `n == 0` returns an empty
/// list.
pub fn top_n<T, K>(
    mut candidates: Vec<T>,
    n: usize,
    metric: impl Fn(&T) -> u64,
    tie_key: impl Fn(&T) -> K,
) -> Vec<T>
where
    K: Ord,
{
    candidates.sort_by_cached_key(|item| (Reverse(metric(item)), tie_key(item)));
    candidates.truncate(n);
    candidates
}

/// Rank prompts by response count.
///
/// Rank numbers are assigned 1..k after sorting.
#[must_use]
pub fn build_top_prompts(
    prompts: &[Prompt],
    rollups: &BTreeMap<Uuid, PromptRollup>,
    n: usize,
) -> Vec<RankedPrompt> {
    let prompts_by_id: HashMap<Uuid, &Prompt> = prompts.iter().map(|p| (p.id, p)).collect();

    let top = top_n(
        rollups.values().collect(),
        n,
        |rollup| rollup.response_count,
        |rollup| rollup.prompt_id,
    );

    top.into_iter()
        .zip(1u32..)
        .filter_map(|(rollup, rank)| {
            // Rollups are keyed off the prompt list, so the lookup always
            // succeeds; filter_map keeps the composition total regardless.
            prompts_by_id.get(&rollup.prompt_id).map(|prompt| RankedPrompt {
                rank,
                prompt_id: prompt.id,
                text: prompt.text.clone(),
                category: prompt_category(prompt),
                response_count: rollup.response_count,
            })
        })
        .collect()
}

/// Rank labeled counts (competitors, topics) descending, ties alphabetical.
#[must_use]
pub fn build_top_entities(counts: &BTreeMap<String, u64>, n: usize) -> Vec<RankedEntity> {
    let candidates: Vec<(&str, u64)> = counts.iter().map(|(l, c)| (l.as_str(), *c)).collect();

    let top = top_n(
        candidates,
        n,
        |(_, count)| *count,
        |(label, _)| (*label).to_owned(),
    );

    top.into_iter()
        .zip(1u32..)
        .map(|((label, count), rank)| RankedEntity {
            rank,
            label: label.to_owned(),
            count,
        })
        .collect()
}

/// Category label for a prompt, used by insight rendering.
///
/// Fixed fallback chain: first non-empty topic tag, else the first three
/// words of the prompt text, else the funnel stage, else `"General"`.
#[must_use]
pub fn prompt_category(prompt: &Prompt) -> String {
    if let Some(topic) = prompt.topics.iter().find(|t| !t.trim().is_empty()) {
        return topic.clone();
    }

    let words: Vec<&str> = prompt.text.split_whitespace().take(3).collect();
    if !words.is_empty() {
        return words.join(" ");
    }

    if let Some(stage) = prompt.stage {
        return stage.to_string();
    }

    "General".to_owned()
}
