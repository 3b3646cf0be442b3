//! Type definitions for `lab_core`.
//!
//! Configuration, engine state snapshots, samples and the sample series.

use serde::{Deserialize, Serialize};

use crate::kinetics::{round_to, Observables};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed reaction parameters. Missing fields in a config file fall back to
/// the classroom defaults: 20 °C rising towards 25 °C over five simulated
/// minutes, played back at 10× real time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    /// Starting temperature (°C) of both the state and the series.
    pub initial_temperature: f64,
    /// Ceiling offset (°C) the temperature approaches asymptotically.
    pub max_temperature_rise: f64,
    /// Simulated seconds until the reaction is forced complete.
    pub duration: u32,
    /// First-order rate constant (1/s).
    pub rate_constant: f64,
    /// Wall-clock milliseconds between simulated seconds.
    pub tick_interval_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 20.0,
            max_temperature_rise: 5.0,
            duration: 300,
            rate_constant: 0.015,
            tick_interval_ms: 100,
        }
    }
}

impl ReactionConfig {
    pub fn peak_temperature(&self) -> f64 {
        self.initial_temperature + self.max_temperature_rise
    }

    /// Simulated seconds per wall-clock second.
    pub fn playback_speed(&self) -> f64 {
        if self.tick_interval_ms == 0 {
            return 0.0;
        }
        1000.0 / self.tick_interval_ms as f64
    }
}

// ---------------------------------------------------------------------------
// Engine state
// ---------------------------------------------------------------------------

/// Run state of the engine. `Complete` is terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Complete,
}

/// Read-only snapshot of the engine handed to renderers and the tutor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub is_running: bool,
    pub is_complete: bool,
    pub elapsed_time: u32,
    pub temperature: f64,
}

impl SimulationState {
    pub fn initial(config: &ReactionConfig) -> Self {
        Self {
            is_running: false,
            is_complete: false,
            elapsed_time: 0,
            temperature: config.initial_temperature,
        }
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// One chart point. Temperature is rounded to 2 decimals, concentrations
/// to 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: u32,
    pub temperature: f64,
    /// Relative [Cu²⁺], the ion being consumed.
    pub concentration_oxidizer: f64,
    /// Relative [Zn²⁺], the ion being produced.
    pub concentration_reduced_product: f64,
}

impl Sample {
    pub fn initial(config: &ReactionConfig) -> Self {
        Self {
            time: 0,
            temperature: config.initial_temperature,
            concentration_oxidizer: 1.0,
            concentration_reduced_product: 0.0,
        }
    }

    pub fn from_observables(obs: &Observables) -> Self {
        Self {
            time: obs.time,
            temperature: round_to(obs.temperature, 2),
            concentration_oxidizer: round_to(obs.concentration_oxidizer, 3),
            concentration_reduced_product: round_to(obs.concentration_reduced_product, 3),
        }
    }
}

/// Append-only sample history, ordered by strictly increasing `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(initial: Sample) -> Self {
        Self {
            samples: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.samples.last().is_none_or(|last| sample.time > last.time),
            "series time must strictly increase, got {} after {:?}",
            sample.time,
            self.samples.last().map(|s| s.time)
        );
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Samples strictly after `time`, for clients refreshing incrementally.
    pub fn since(&self, time: u32) -> &[Sample] {
        let start = self.samples.partition_point(|s| s.time <= time);
        &self.samples[start..]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
