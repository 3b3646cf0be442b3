use crate::kinetics::observe;
use crate::{Phase, ReactionConfig, Sample, Series, SimulationState};

/// Owns elapsed simulated time, the derived temperature and the sample
/// series. All operations are total: misuse (ticking while paused,
/// starting after completion) is a no-op.
///
/// Transitions:
/// - `Idle | Paused --start--> Running`
/// - `Running --pause--> Paused`
/// - `Running --tick--> Running`, or `Complete` once `duration` is reached
/// - `any --reset--> Idle`
#[derive(Debug, Clone)]
pub struct ReactionEngine {
    config: ReactionConfig,
    phase: Phase,
    elapsed_time: u32,
    temperature: f64,
    series: Series,
}

impl ReactionEngine {
    pub fn new(config: ReactionConfig) -> Self {
        let series = Series::new(Sample::initial(&config));
        Self {
            phase: Phase::Idle,
            elapsed_time: 0,
            temperature: config.initial_temperature,
            series,
            config,
        }
    }

    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            is_running: self.is_running(),
            is_complete: self.is_complete(),
            elapsed_time: self.elapsed_time,
            temperature: self.temperature,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Paused) {
            self.phase = Phase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Single start/pause control. Rejected once complete.
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance one simulated second.
    ///
    /// Returns the appended sample, or `None` when not running. The tick
    /// that reaches `duration` appends the sample at `time == duration`
    /// and completes the reaction; nothing is appended past it.
    pub fn tick(&mut self) -> Option<Sample> {
        if self.phase != Phase::Running {
            return None;
        }
        let duration = self.config.duration;
        if self.elapsed_time >= duration {
            self.phase = Phase::Complete;
            return None;
        }

        let t = self.elapsed_time + 1;
        let obs = observe(&self.config, t);
        let sample = Sample::from_observables(&obs);
        self.elapsed_time = t;
        self.temperature = obs.temperature;
        self.series.push(sample);

        if t >= duration {
            self.phase = Phase::Complete;
        }
        Some(sample)
    }

    /// Back to `Idle` with the single initial sample, from any phase.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.elapsed_time = 0;
        self.temperature = self.config.initial_temperature;
        self.series = Series::new(Sample::initial(&self.config));
    }
}
