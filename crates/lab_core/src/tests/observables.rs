use super::*;

#[test]
fn concentrations_sum_to_one_across_run() {
    let mut engine = ReactionEngine::new(classroom_config());
    run_to_completion(&mut engine);
    for sample in engine.series() {
        let sum = sample.concentration_oxidizer + sample.concentration_reduced_product;
        assert!(
            (sum - 1.0).abs() <= 0.001 + 1e-9,
            "sum {sum} at t={}",
            sample.time
        );
        assert!((0.0..=1.0).contains(&sample.concentration_oxidizer));
        assert!((0.0..=1.0).contains(&sample.concentration_reduced_product));
    }
}

#[test]
fn series_times_strictly_increase_from_zero() {
    let mut engine = ReactionEngine::new(classroom_config());
    run_to_completion(&mut engine);
    let times: Vec<u32> = engine.series().iter().map(|s| s.time).collect();
    assert_eq!(times[0], 0);
    assert!(times.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn temperature_stays_within_bounds() {
    let config = classroom_config();
    let mut engine = ReactionEngine::new(config.clone());
    engine.start();
    while engine.is_running() {
        engine.tick();
        let t = engine.state().temperature;
        assert!(t >= config.initial_temperature);
        assert!(t <= config.peak_temperature());
    }
}

#[test]
fn classroom_scenario_at_ten_seconds() {
    let engine = running_engine(classroom_config(), 10);
    let sample = *engine.series().latest().unwrap();
    assert_eq!(sample.time, 10);

    let expected_progress = 1.0 - (-0.15f64).exp();
    assert!((expected_progress - 0.1393).abs() < 1e-4);
    assert!((sample.temperature - 20.70).abs() < 1e-9);
    assert!((sample.concentration_oxidizer - 0.861).abs() < 1e-9);
    assert!((sample.concentration_reduced_product - 0.139).abs() < 1e-9);
    assert!((engine.state().temperature - (20.0 + 5.0 * expected_progress)).abs() < 1e-12);
}

#[test]
fn observables_depend_only_on_elapsed_time() {
    let config = classroom_config();
    let engine = running_engine(config.clone(), 25);
    let direct = Sample::from_observables(&observe(&config, 25));
    assert_eq!(*engine.series().latest().unwrap(), direct);
}

#[test]
fn two_fresh_runs_are_byte_identical() {
    let mut first = ReactionEngine::new(classroom_config());
    let mut second = ReactionEngine::new(classroom_config());
    run_to_completion(&mut first);
    run_to_completion(&mut second);
    assert_eq!(serialized(first.series()), serialized(second.series()));
}

#[test]
fn run_after_reset_reproduces_series() {
    let mut engine = ReactionEngine::new(short_config(50));
    run_to_completion(&mut engine);
    let first = serialized(engine.series());
    engine.reset();
    run_to_completion(&mut engine);
    assert_eq!(serialized(engine.series()), first);
}
