//! Shared test fixtures for `lab_core` and downstream crates.
//!
//! `classroom_config()` is the default zinc / copper sulfate setup.
//! `short_config()` compresses the reaction so full runs stay cheap.

use crate::{ReactionConfig, ReactionEngine};

pub fn classroom_config() -> ReactionConfig {
    ReactionConfig::default()
}

/// Classroom kinetics with a shortened duration and a 10ms tick.
pub fn short_config(duration: u32) -> ReactionConfig {
    ReactionConfig {
        duration,
        tick_interval_ms: 10,
        ..ReactionConfig::default()
    }
}

/// A started engine advanced by `ticks` simulated seconds.
pub fn running_engine(config: ReactionConfig, ticks: u32) -> ReactionEngine {
    let mut engine = ReactionEngine::new(config);
    engine.start();
    for _ in 0..ticks {
        engine.tick();
    }
    engine
}

/// Tick a started engine until it stops running. Returns ticks taken.
pub fn run_to_completion(engine: &mut ReactionEngine) -> u32 {
    engine.start();
    let mut ticks = 0;
    while engine.is_running() {
        engine.tick();
        ticks += 1;
    }
    ticks
}
