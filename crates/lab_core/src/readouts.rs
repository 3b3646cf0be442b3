//! Presentation values derived from engine output.
//!
//! Renderers (web client, terminal) draw from these; nothing here feeds
//! back into the engine.

use serde::Serialize;

use crate::{ReactionConfig, Series, SimulationState};

/// Thermometer scale top, °C.
const THERMOMETER_MAX_C: f64 = 50.0;
/// Fraction of the zinc strip the copper deposit covers at completion.
const MAX_DEPOSIT_COVERAGE: f64 = 0.5;
const SOLUTION_RGB: (u8, u8, u8) = (59, 130, 246);
const SOLUTION_OPACITY_START: f64 = 0.8;
const SOLUTION_OPACITY_FADE: f64 = 0.6;

/// Fixed y-axis of the temperature chart.
pub const TEMPERATURE_AXIS_C: (f64, f64) = (15.0, 35.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readouts {
    pub clock: String,
    pub temperature: String,
    pub status: &'static str,
    pub control_label: &'static str,
    pub beaker: BeakerView,
    pub chart: ChartView,
}

/// Beaker and thermometer drawing parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeakerView {
    /// Linear elapsed fraction, not the kinetic progress.
    pub visual_progress: f64,
    pub solution_rgba: (u8, u8, u8, f64),
    /// Percent of the strip height covered by copper.
    pub copper_deposit_pct: f64,
    pub thermometer_fill_pct: f64,
    pub bubbling: bool,
}

/// Chart series plus the fixed temperature axis they are drawn against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub temperature_axis: (f64, f64),
    pub temperature: Vec<(u32, f64)>,
    pub concentration: Vec<(u32, f64, f64)>,
}

pub fn readouts(state: &SimulationState, config: &ReactionConfig, series: &Series) -> Readouts {
    Readouts {
        clock: format_clock(state.elapsed_time),
        temperature: format!("{:.1}°C", state.temperature),
        status: status_label(state),
        control_label: control_label(state),
        beaker: beaker_view(state, config),
        chart: chart_view(series),
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_clock(elapsed_secs: u32) -> String {
    format!("{}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}

pub fn status_label(state: &SimulationState) -> &'static str {
    if state.is_complete {
        "Complete"
    } else if state.is_running {
        "Reacting..."
    } else {
        "Ready"
    }
}

pub fn control_label(state: &SimulationState) -> &'static str {
    if state.is_running {
        "Pause"
    } else if state.is_complete {
        "Reaction Complete"
    } else {
        "Start Reaction"
    }
}

pub fn beaker_view(state: &SimulationState, config: &ReactionConfig) -> BeakerView {
    let visual_progress = if config.duration == 0 {
        1.0
    } else {
        (f64::from(state.elapsed_time) / f64::from(config.duration)).min(1.0)
    };
    let (r, g, b) = SOLUTION_RGB;
    BeakerView {
        visual_progress,
        solution_rgba: (
            r,
            g,
            b,
            SOLUTION_OPACITY_START - SOLUTION_OPACITY_FADE * visual_progress,
        ),
        copper_deposit_pct: visual_progress * MAX_DEPOSIT_COVERAGE * 100.0,
        thermometer_fill_pct: (state.temperature / THERMOMETER_MAX_C * 100.0).clamp(0.0, 100.0),
        bubbling: state.is_running,
    }
}

pub fn chart_view(series: &Series) -> ChartView {
    ChartView {
        temperature_axis: TEMPERATURE_AXIS_C,
        temperature: temperature_points(series),
        concentration: concentration_points(series),
    }
}

/// `(time, temperature)` points for the temperature chart.
pub fn temperature_points(series: &Series) -> Vec<(u32, f64)> {
    series.iter().map(|s| (s.time, s.temperature)).collect()
}

/// `(time, [Cu²⁺], [Zn²⁺])` points for the concentration chart.
pub fn concentration_points(series: &Series) -> Vec<(u32, f64, f64)> {
    series
        .iter()
        .map(|s| {
            (
                s.time,
                s.concentration_oxidizer,
                s.concentration_reduced_product,
            )
        })
        .collect()
}
