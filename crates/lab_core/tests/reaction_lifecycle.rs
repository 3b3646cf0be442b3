//! End-to-end reaction lifecycle through the public API: start, pause
//! midway, resume, complete, export, reset.

use lab_core::readouts::{readouts, temperature_points};
use lab_core::test_fixtures::{classroom_config, run_to_completion};
use lab_core::{write_series_csv, Phase, ReactionEngine};

#[test]
fn classroom_run_with_pause_midway() {
    let config = classroom_config();
    let mut engine = ReactionEngine::new(config.clone());

    engine.toggle();
    for _ in 0..120 {
        engine.tick();
    }
    engine.toggle();
    assert_eq!(engine.phase(), Phase::Paused);
    assert_eq!(readouts(&engine.state(), &config, engine.series()).clock, "2:00");

    // Timer firing late after the pause must not move anything.
    assert!(engine.tick().is_none());
    assert_eq!(engine.elapsed_time(), 120);

    let remaining = run_to_completion(&mut engine);
    assert_eq!(remaining, config.duration - 120);
    assert_eq!(engine.phase(), Phase::Complete);

    let view = readouts(&engine.state(), &config, engine.series());
    assert_eq!(view.chart.temperature.len(), config.duration as usize + 1);
    assert_eq!(view.clock, "5:00");
    assert_eq!(view.status, "Complete");
    assert!((view.beaker.copper_deposit_pct - 50.0).abs() < 1e-9);

    // Final temperature approaches but never reaches the peak.
    let final_temp = engine.state().temperature;
    assert!(final_temp > 24.9 && final_temp < config.peak_temperature());

    let points = temperature_points(engine.series());
    assert_eq!(points.len(), config.duration as usize + 1);
    assert!(points.windows(2).all(|w| w[1].1 >= w[0].1));
}

#[test]
fn export_then_reset_starts_a_fresh_run() {
    let mut engine = ReactionEngine::new(classroom_config());
    run_to_completion(&mut engine);

    let mut csv = Vec::new();
    write_series_csv(&mut csv, engine.series()).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), 302);
    assert!(text.lines().last().unwrap().starts_with("300,"));

    engine.reset();
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.series().len(), 1);
    engine.start();
    assert!(engine.is_running());
}
