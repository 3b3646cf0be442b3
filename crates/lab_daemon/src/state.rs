use crate::tick_loop::TickDriver;
use lab_assistant::LabAssistant;
use lab_core::{ReactionConfig, ReactionEngine, Sample, SimulationState, WorksheetAnswers};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything one student session owns. The tick driver lives here so
/// that dropping the session cancels the timer.
pub struct LabSession {
    pub engine: ReactionEngine,
    pub answers: WorksheetAnswers,
    pub driver: TickDriver,
}

impl LabSession {
    pub fn new(config: ReactionConfig) -> Self {
        Self {
            engine: ReactionEngine::new(config),
            answers: WorksheetAnswers::new(),
            driver: TickDriver::default(),
        }
    }
}

pub type SharedLab = Arc<Mutex<LabSession>>;
pub type EventTx = broadcast::Sender<LabEvent>;

/// Pushed to `/stream` subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabEvent {
    Sample { sample: Sample },
    State { state: SimulationState },
}

#[derive(Clone)]
pub struct AppState {
    pub lab: SharedLab,
    pub event_tx: EventTx,
    pub assistant: LabAssistant,
    pub grading_busy: Arc<AtomicBool>,
    pub tutor_busy: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: ReactionConfig, assistant: LabAssistant) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            lab: Arc::new(Mutex::new(LabSession::new(config))),
            event_tx,
            assistant,
            grading_busy: Arc::new(AtomicBool::new(false)),
            tutor_busy: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Marks one assistant channel as busy until dropped.
pub struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    /// `None` if a request on this channel is already outstanding.
    pub fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
