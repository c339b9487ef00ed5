use crate::app_config::EngineConfig;
use crate::ConfigError;

/// Load engine configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_engine_config() -> Result<EngineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_engine_config_from_env()
}

/// Load engine configuration from environment variables already in the process.
///
/// Unlike [`load_engine_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_engine_config_from_env() -> Result<EngineConfig, ConfigError> {
    build_engine_config(|key| std::env::var(key))
}

/// Build engine configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_engine_config<F>(lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let top_prompts_limit = parse_usize("BRANDSCOPE_TOP_PROMPTS", "10")?;
    let top_competitors_limit = parse_usize("BRANDSCOPE_TOP_COMPETITORS", "10")?;
    let top_topics_limit = parse_usize("BRANDSCOPE_TOP_TOPICS", "10")?;
    let kpi_visibility_path = PathBuf::from(or_default(
        "BRANDSCOPE_KPI_VISIBILITY_PATH",
        "./config/kpi_visibility.yaml",
    ));

    Ok(EngineConfig {
        top_prompts_limit,
        top_competitors_limit,
        top_topics_limit,
        kpi_visibility_path,
    })
}
