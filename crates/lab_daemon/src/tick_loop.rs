use crate::state::{EventTx, LabEvent, LabSession};
use parking_lot::Mutex;
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Scoped timer handle for one lab session.
///
/// `start` acquires a tick task; `stop`, `release` and `Drop` give it up.
/// Every acquisition bumps the epoch, and a task only ticks while its
/// epoch is current, so a callback that races a pause or reset is inert.
#[derive(Default)]
pub struct TickDriver {
    handle: Option<JoinHandle<()>>,
    epoch: u64,
}

impl TickDriver {
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn start(&mut self, lab: Weak<Mutex<LabSession>>, event_tx: EventTx, period: Duration) {
        self.stop();
        let epoch = self.epoch;
        self.handle = Some(tokio::spawn(run_tick_loop(lab, event_tx, period, epoch)));
        tracing::debug!(epoch, ?period, "tick driver started");
    }

    pub fn stop(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(epoch = self.epoch, "tick driver stopped");
        }
    }

    /// Called by the tick task itself when the reaction completes.
    fn release(&mut self) {
        self.epoch += 1;
        self.handle = None;
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Tick the session's engine once per `period` until it stops running.
///
/// Holds only a weak reference so the task never keeps a dropped session
/// alive. The first tick fires one period after start.
pub async fn run_tick_loop(
    lab: Weak<Mutex<LabSession>>,
    event_tx: EventTx,
    period: Duration,
    epoch: u64,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;

        let Some(shared) = lab.upgrade() else {
            return;
        };
        // Events go out under the lock so they interleave with control
        // commands in the order the engine saw them.
        let done = {
            let mut session = shared.lock();
            if session.driver.epoch() != epoch {
                return;
            }
            let Some(sample) = session.engine.tick() else {
                session.driver.release();
                return;
            };
            let _ = event_tx.send(LabEvent::Sample { sample });
            let done = !session.engine.is_running();
            if done {
                session.driver.release();
                let _ = event_tx.send(LabEvent::State {
                    state: session.engine.state(),
                });
            }
            done
        };

        if done {
            tracing::info!("reaction complete");
            break;
        }
    }
}
