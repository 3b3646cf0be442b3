//! Exponential-saturation kinetics.
//!
//! A single `progress` value drives both the thermal and the chemical
//! observables, so temperature and concentrations for a given `t` always
//! agree. Nothing here depends on history or wall-clock time.

use crate::ReactionConfig;

/// Reaction completion fraction in `[0, 1)`.
///
/// `1 − exp(−k·t)`, computed with `exp_m1` so small `k·t` keeps precision.
#[inline]
pub fn progress(rate_constant: f64, t: u32) -> f64 {
    -(-rate_constant * f64::from(t)).exp_m1()
}

/// Unrounded observables at one simulated second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observables {
    pub time: u32,
    pub progress: f64,
    pub temperature: f64,
    pub concentration_oxidizer: f64,
    pub concentration_reduced_product: f64,
}

pub fn observe(config: &ReactionConfig, t: u32) -> Observables {
    let p = progress(config.rate_constant, t);
    Observables {
        time: t,
        progress: p,
        temperature: config.initial_temperature + config.max_temperature_rise * p,
        concentration_oxidizer: 1.0 - p,
        concentration_reduced_product: p,
    }
}

/// Round half away from zero to `decimals` places.
#[inline]
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_at_zero_is_zero() {
        assert!(progress(0.015, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_strictly_increases_over_reaction() {
        let config = ReactionConfig::default();
        let mut previous = progress(config.rate_constant, 0);
        for t in 1..=config.duration {
            let current = progress(config.rate_constant, t);
            assert!(current > previous, "progress stalled at t={t}");
            assert!(current < 1.0);
            previous = current;
        }
    }

    #[test]
    fn observables_share_one_progress_value() {
        let config = ReactionConfig::default();
        for t in [0, 1, 10, 150, 300] {
            let obs = observe(&config, t);
            let from_temp = (obs.temperature - config.initial_temperature)
                / config.max_temperature_rise;
            assert!((from_temp - obs.progress).abs() < 1e-12);
            assert!((obs.concentration_reduced_product - obs.progress).abs() < f64::EPSILON);
            assert!((obs.concentration_oxidizer + obs.progress - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn observe_is_reproducible() {
        let config = ReactionConfig::default();
        let a = observe(&config, 42);
        let b = observe(&config, 42);
        assert_eq!(a.temperature.to_bits(), b.temperature.to_bits());
        assert_eq!(a.progress.to_bits(), b.progress.to_bits());
    }

    #[test]
    fn round_to_places() {
        assert!((round_to(20.696_46, 2) - 20.70).abs() < 1e-9);
        assert!((round_to(0.139_292, 3) - 0.139).abs() < 1e-9);
        assert!((round_to(0.860_708, 3) - 0.861).abs() < 1e-9);
    }
}
