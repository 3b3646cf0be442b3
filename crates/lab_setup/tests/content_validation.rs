//! Validation of the shipped `content/reaction.json`.
//!
//! The shipped file must load, pass validation, and describe the
//! classroom reaction the worksheet questions are written for.

use lab_core::{ReactionConfig, ReactionEngine};
use lab_setup::{load_config, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

/// The binaries resolve the default path from the workspace root;
/// integration tests run from the crate directory, so go up two levels.
fn content_path() -> PathBuf {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    PathBuf::from(manifest).join("../..").join(DEFAULT_CONFIG_PATH)
}

#[test]
fn shipped_config_loads() {
    load_config(&content_path()).expect("shipped reaction.json should load");
}

#[test]
fn shipped_config_matches_classroom_defaults() {
    let config = load_config(&content_path()).unwrap();
    assert_eq!(config, ReactionConfig::default());
}

#[test]
fn shipped_config_runs_at_ten_times_speed() {
    let config = load_config(&content_path()).unwrap();
    assert!((config.playback_speed() - 10.0).abs() < 1e-12);
}

#[test]
fn shipped_reaction_is_exothermic_and_mostly_complete() {
    let config = load_config(&content_path()).unwrap();
    let mut engine = ReactionEngine::new(config.clone());
    engine.start();
    while engine.is_running() {
        engine.tick();
    }
    let last = engine.series().latest().unwrap();
    assert!(last.temperature > config.initial_temperature);
    assert!(last.concentration_oxidizer < 0.05);
}
