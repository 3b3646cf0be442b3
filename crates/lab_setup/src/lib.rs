//! Filesystem loading for the lab: reaction config and saved worksheets.

use anyhow::{bail, Context, Result};
use lab_core::{ReactionConfig, WorksheetAnswers};
use std::path::Path;

/// Shipped classroom setup, relative to the workspace root. The binaries
/// load it when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./content/reaction.json";

/// Load a reaction config. Absent fields take the classroom defaults.
pub fn load_config(path: &Path) -> Result<ReactionConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file: {}", path.display()))?;
    let config: ReactionConfig = serde_json::from_str(&json)
        .with_context(|| format!("parsing config file: {}", path.display()))?;
    validate_config(&config).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(config)
}

pub fn validate_config(config: &ReactionConfig) -> Result<()> {
    if !config.initial_temperature.is_finite() {
        bail!("'initial_temperature' must be finite");
    }
    if !config.max_temperature_rise.is_finite() || config.max_temperature_rise < 0.0 {
        bail!("'max_temperature_rise' must be finite and >= 0");
    }
    if !config.rate_constant.is_finite() || config.rate_constant <= 0.0 {
        bail!("'rate_constant' must be finite and > 0");
    }
    if config.duration == 0 {
        bail!("'duration' must be > 0");
    }
    if config.tick_interval_ms == 0 {
        bail!("'tick_interval_ms' must be > 0");
    }
    Ok(())
}

/// Load a worksheet saved as a flat `{fieldId: answer}` object.
pub fn load_answers(path: &Path) -> Result<WorksheetAnswers> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading worksheet file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing worksheet file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::WorksheetField;
    use std::io::Write;

    fn write_temp(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_temp(
            r#"{
            "initial_temperature": 18.5,
            "max_temperature_rise": 7.0,
            "duration": 120,
            "rate_constant": 0.03,
            "tick_interval_ms": 50
        }"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.duration, 120);
        assert_eq!(config.tick_interval_ms, 50);
        assert!((config.peak_temperature() - 25.5).abs() < 1e-12);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = write_temp(r#"{"duration": 60}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.duration, 60);
        assert_eq!(config.tick_interval_ms, 100);
        assert!((config.rate_constant - 0.015).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let file = write_temp(r#"{"duration": 0}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duration"));
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let file = write_temp(r#"{"rate_constant": -0.1}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("rate_constant"));
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let file = write_temp(r#"{"tick_interval_ms": 0}"#);
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_errors_with_path() {
        let err = load_config(Path::new("/nonexistent/reaction.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/reaction.json"));
    }

    #[test]
    fn test_malformed_json_errors() {
        let file = write_temp("{ not json");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_answers() {
        let file = write_temp(r#"{"analysisQ4": "Lost electrons", "tempFinal": "24.9"}"#);
        let answers = load_answers(file.path()).unwrap();
        assert_eq!(answers.get(WorksheetField::AnalysisQ4), "Lost electrons");
        assert_eq!(answers.get(WorksheetField::TempFinal), "24.9");
        assert_eq!(answers.get(WorksheetField::SolutionInitial), "");
    }

    #[test]
    fn test_answers_with_unknown_field_rejected() {
        let file = write_temp(r#"{"analysisQ99": "?"}"#);
        assert!(load_answers(file.path()).is_err());
    }
}
