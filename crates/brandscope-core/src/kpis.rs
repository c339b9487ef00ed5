//! Per-brand KPI visibility configuration.
//!
//! Public and whitelabeled report consumers only see the KPIs an operator
//! selected for the brand. The selection is persisted as a YAML file by the
//! KPI-selection feature and consumed read-only here.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::report::Kpi;
use crate::ConfigError;

/// Visible-KPI selection for one brand.
#[derive(Debug, Clone, Deserialize)]
pub struct KpiVisibility {
    pub brand_id: Uuid,
    /// Ordered as the operator selected them; order has no effect on
    /// filtering, only on how selection UIs re-render the list.
    pub visible_kpis: Vec<Kpi>,
}

impl KpiVisibility {
    /// The set consumed by report assembly.
    #[must_use]
    pub fn as_set(&self) -> BTreeSet<Kpi> {
        self.visible_kpis.iter().copied().collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct KpiVisibilityFile {
    pub brands: Vec<KpiVisibility>,
}

impl KpiVisibilityFile {
    /// Look up the visible-KPI set for a brand, if one was configured.
    #[must_use]
    pub fn for_brand(&self, brand_id: Uuid) -> Option<BTreeSet<Kpi>> {
        self.brands
            .iter()
            .find(|entry| entry.brand_id == brand_id)
            .map(KpiVisibility::as_set)
    }
}

/// Load and validate the KPI visibility configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_kpi_visibility(path: &Path) -> Result<KpiVisibilityFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VisibilityFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KpiVisibilityFile =
        serde_yaml::from_str(&content).map_err(ConfigError::VisibilityFileParse)?;

    validate_kpi_visibility(&file)?;

    Ok(file)
}

fn validate_kpi_visibility(file: &KpiVisibilityFile) -> Result<(), ConfigError> {
    let mut seen_brands = HashSet::new();

    for entry in &file.brands {
        if !seen_brands.insert(entry.brand_id) {
            return Err(ConfigError::Validation(format!(
                "duplicate KPI visibility entry for brand {}",
                entry.brand_id
            )));
        }

        if entry.visible_kpis.is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand {} has an empty visible_kpis list; a public report with every KPI hidden renders nothing",
                entry.brand_id
            )));
        }

        let mut seen_kpis = HashSet::new();
        for kpi in &entry.visible_kpis {
            if !seen_kpis.insert(*kpi) {
                return Err(ConfigError::Validation(format!(
                    "brand {} lists KPI '{kpi}' more than once",
                    entry.brand_id
                )));
            }
        }
    }

    Ok(())
}
