//! Shared data model and configuration for the brand visibility engine.
//!
//! Record shapes (prompts, responses, external metric rows), the emitted
//! report model, per-brand KPI visibility configuration, and engine-level
//! env configuration. All computation lives in `brandscope-engine` and
//! `brandscope-linker`; this crate only defines the shapes they exchange.

pub mod app_config;
pub mod config;
pub mod kpis;
pub mod records;
pub mod report;

pub use app_config::EngineConfig;
pub use config::{load_engine_config, load_engine_config_from_env};
pub use kpis::{load_kpi_visibility, KpiVisibility, KpiVisibilityFile};
pub use records::{
    BrandDataset, Citation, ExternalMetricRow, FunnelStage, ManualLink, Prompt, Response,
    Sentiment,
};
pub use report::{
    BrandReport, Delta, Direction, Distributions, Kpi, LinkedEntity, MatchConfidence,
    MatchMethod, RankedEntity, RankedPrompt, ReportTotals,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read KPI visibility file at {path}: {source}")]
    VisibilityFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse KPI visibility file: {0}")]
    VisibilityFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
