//! `lab_core`: deterministic zinc / copper(II) sulfate displacement model.
//!
//! No IO, no network, no clocks. Every observable is a pure function of
//! elapsed simulated seconds; the caller decides when to `tick`.

mod engine;
pub mod export;
mod kinetics;
pub mod readouts;
mod types;
pub mod worksheet;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use engine::ReactionEngine;
pub use export::write_series_csv;
pub use kinetics::{observe, progress, Observables};
pub use types::*;
pub use worksheet::{WorksheetAnswers, WorksheetField, WorksheetSection};

#[cfg(test)]
mod tests;
