use std::path::PathBuf;

/// Engine-level tunables, sourced from the environment.
///
/// Only presentation-neutral knobs live here; per-brand KPI visibility is a
/// separate YAML file (see [`crate::kpis`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Entries emitted in the top-prompts ranking.
    pub top_prompts_limit: usize,
    /// Entries emitted in the top-competitors ranking.
    pub top_competitors_limit: usize,
    /// Entries emitted in the top-topics ranking.
    pub top_topics_limit: usize,
    /// Location of the per-brand KPI visibility file.
    pub kpi_visibility_path: PathBuf,
}
