use thiserror::Error;

use brandscope_core::report::Kpi;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A KPI input was non-finite or otherwise malformed. Fatal to the
    /// current assembly: bad input must stay distinguishable from a
    /// legitimate zero, so this is never defaulted away.
    #[error("non-finite value {value} for KPI '{kpi}'")]
    MetricComputation { kpi: Kpi, value: f64 },
}
