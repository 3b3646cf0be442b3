//! Commands from the student (start/pause toggle, reset) applied to the
//! shared session, keeping the tick driver in step with the engine.

use crate::state::{AppState, LabEvent};
use lab_core::{ReactionEngine, SimulationState};
use std::sync::Arc;
use std::time::Duration;

pub fn toggle(app: &AppState) -> SimulationState {
    apply(app, ReactionEngine::toggle)
}

pub fn start(app: &AppState) -> SimulationState {
    apply(app, ReactionEngine::start)
}

pub fn pause(app: &AppState) -> SimulationState {
    apply(app, ReactionEngine::pause)
}

pub fn reset(app: &AppState) -> SimulationState {
    apply(app, ReactionEngine::reset)
}

/// Stop the timer ahead of process exit.
pub fn shutdown(app: &AppState) {
    app.lab.lock().driver.stop();
}

/// Run `command` under the session lock. The timer is acquired when the
/// engine starts running and released whenever it is not running. The
/// resulting state is broadcast before the lock is released.
fn apply(app: &AppState, command: impl FnOnce(&mut ReactionEngine)) -> SimulationState {
    let mut session = app.lab.lock();
    let was_running = session.engine.is_running();
    command(&mut session.engine);

    if session.engine.is_running() {
        if !was_running {
            let period = Duration::from_millis(session.engine.config().tick_interval_ms);
            session
                .driver
                .start(Arc::downgrade(&app.lab), app.event_tx.clone(), period);
        }
    } else {
        session.driver.stop();
    }

    let state = session.engine.state();
    let _ = app.event_tx.send(LabEvent::State { state });
    drop(session);
    tracing::info!(
        running = state.is_running,
        complete = state.is_complete,
        elapsed = state.elapsed_time,
        "lab command applied"
    );
    state
}
