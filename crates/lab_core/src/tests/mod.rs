use super::*;
use crate::test_fixtures::{classroom_config, run_to_completion, running_engine, short_config};

mod observables;

// --- Shared test helpers ------------------------------------------------

fn assert_initial(engine: &ReactionEngine) {
    let config = engine.config();
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.state(), SimulationState::initial(config));
    assert_eq!(engine.series().len(), 1);
    assert_eq!(engine.series().samples()[0], Sample::initial(config));
}

fn serialized(series: &Series) -> String {
    serde_json::to_string(series).unwrap()
}
