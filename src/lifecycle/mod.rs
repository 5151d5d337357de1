//! Match lifecycle: the state machine that builds and finalizes one record.

pub mod engine;
pub mod tracker;
pub mod types;

pub use engine::{MatchEngine, MIN_MATCH_NUMBER};
pub use tracker::{AutoPhaseReminder, ChangeTracker, AUTO_PHASE_BUDGET, CHANGE_DISPLAY_WINDOW};
pub use types::{ComparisonOutcome, Counter, LifecycleError, PregameInput, Stage};
