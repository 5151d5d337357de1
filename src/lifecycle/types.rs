//! Lifecycle types and errors.

use thiserror::Error;

use crate::record::types::RecordError;
use crate::storage::store::StorageError;

/// Stage of the match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// No record in flight
    #[default]
    Idle,
    /// In-match scoring, counters and text mutable
    Scoring,
    /// Row written and carried forward, comparison still possible
    Submitted,
    /// Finalized; read-only handoff view
    Exported,
}

/// The four in-match scoring counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    AutoFuel,
    AutoPasses,
    TeleopFuel,
    TeleopPasses,
}

impl Counter {
    /// All counters, in storage order.
    pub const ALL: [Counter; 4] = [
        Counter::AutoFuel,
        Counter::AutoPasses,
        Counter::TeleopFuel,
        Counter::TeleopPasses,
    ];

    /// Whether this counter belongs to the autonomous phase.
    pub fn is_auto(self) -> bool {
        matches!(self, Counter::AutoFuel | Counter::AutoPasses)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Counter::AutoFuel => 0,
            Counter::AutoPasses => 1,
            Counter::TeleopFuel => 2,
            Counter::TeleopPasses => 3,
        }
    }
}

/// Everything the pregame stage needs to write a fresh record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PregameInput {
    /// Team being scouted
    pub team_number: u32,
    /// Match number within the event
    pub match_number: u32,
    /// Station code, e.g. "R1"; its first character is the alliance
    pub driver_station: String,
    /// Scout's display name
    pub scout_name: String,
    /// Pre-match comment, may be empty
    pub comment: String,
}

impl PregameInput {
    /// Build an input from device settings plus the per-match values.
    pub fn from_settings(
        settings: &crate::storage::settings::ScoutSettings,
        team_number: u32,
        match_number: u32,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            team_number,
            match_number,
            driver_station: settings.driver_station.clone(),
            scout_name: settings.scout_name.clone(),
            comment: comment.into(),
        }
    }
}

/// How the current team compared to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    WayBetter,
    Better,
    AboutTheSame,
    Worse,
    WayWorse,
    /// The scout declined to compare
    Skipped,
}

impl ComparisonOutcome {
    /// The value stored into the comparison-result field.
    pub fn as_field(self) -> &'static str {
        match self {
            ComparisonOutcome::WayBetter => "2",
            ComparisonOutcome::Better => "1",
            ComparisonOutcome::AboutTheSame => "0",
            ComparisonOutcome::Worse => "-1",
            ComparisonOutcome::WayWorse => "-2",
            ComparisonOutcome::Skipped => "skipped",
        }
    }

    /// Display label for the option.
    pub fn label(self) -> &'static str {
        match self {
            ComparisonOutcome::WayBetter => "Way Better",
            ComparisonOutcome::Better => "Better",
            ComparisonOutcome::AboutTheSame => "About the Same",
            ComparisonOutcome::Worse => "Worse",
            ComparisonOutcome::WayWorse => "Way Worse",
            ComparisonOutcome::Skipped => "Skipped",
        }
    }
}

impl std::fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from the match lifecycle.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Match number outside the event's schedule
    #[error("match number {number} outside valid range {min}-{max}")]
    MatchOutOfRange { number: u32, min: u32, max: u32 },

    /// Save was invoked with no record on disk to rebuild from
    #[error("no saved record for match {0}")]
    NoBaseRecord(u32),

    /// Operation not valid in the current stage
    #[error("operation not valid in stage {0:?}")]
    WrongStage(Stage),

    /// The stored row could not be interpreted
    #[error("stored record is malformed: {0}")]
    Record(#[from] RecordError),

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Export formatting failure
    #[error(transparent)]
    Export(#[from] crate::export::ExportError),
}
