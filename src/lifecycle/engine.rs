//! Match lifecycle engine.
//!
//! Drives one record through pregame creation, in-match scoring, the
//! optional team comparison and the read-only export view. Each persisting
//! step re-reads the stored row, mutates its own fields and rewrites the full
//! row, so fields owned by earlier stages survive verbatim.

use std::time::Instant;

use crate::csv::codec::escape_field;
use crate::export::{self, ExportView};
use crate::lifecycle::tracker::{AutoPhaseReminder, ChangeTracker};
use crate::lifecycle::types::{
    ComparisonOutcome, Counter, LifecycleError, PregameInput, Stage,
};
use crate::record::schema::{Field, V2_FIELD_COUNT};
use crate::record::types::{MatchRecord, RecordError};
use crate::storage::history::ScoutHistory;
use crate::storage::settings::ScoutSettings;
use crate::storage::store::{record_key, BlobStore, StorageError};

/// Lowest valid match number.
pub const MIN_MATCH_NUMBER: u32 = 1;

/// The match-record state machine.
///
/// Generic over the blob store so the whole lifecycle runs against an
/// in-memory store in tests.
pub struct MatchEngine<S: BlobStore> {
    store: S,
    settings: ScoutSettings,
    schedule_len: usize,
    stage: Stage,
    match_number: Option<u32>,
    comment: String,
    questions: String,
    counters: [u32; 4],
    trackers: [ChangeTracker; 4],
    reminder: AutoPhaseReminder,
    submitted_row: Option<String>,
}

impl<S: BlobStore> MatchEngine<S> {
    /// Create an engine over a store, with the device settings and the
    /// number of scheduled matches (which bounds valid match numbers).
    pub fn new(store: S, settings: ScoutSettings, schedule_len: usize) -> Self {
        Self {
            store,
            settings,
            schedule_len,
            stage: Stage::Idle,
            match_number: None,
            comment: String::new(),
            questions: String::new(),
            counters: [0; 4],
            trackers: Default::default(),
            reminder: AutoPhaseReminder::default(),
            submitted_row: None,
        }
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Match number of the record in flight.
    pub fn match_number(&self) -> Option<u32> {
        self.match_number
    }

    /// The shared comment in working state.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replace the shared comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// The questions/clarifications text in working state.
    pub fn questions(&self) -> &str {
        &self.questions
    }

    /// Replace the questions/clarifications text.
    pub fn set_questions(&mut self, questions: impl Into<String>) {
        self.questions = questions.into();
    }

    /// Current value of a scoring counter.
    pub fn counter_value(&self, counter: Counter) -> u32 {
        self.counters[counter.index()]
    }

    /// Pregame submit: validate, write a fresh 7-field row, enter scoring.
    ///
    /// The match number must fall within `1..=schedule_len`; out-of-range
    /// numbers fail without writing anything.
    pub fn create(&mut self, input: &PregameInput) -> Result<String, LifecycleError> {
        let max = self.schedule_len as u32;
        if input.match_number < MIN_MATCH_NUMBER || input.match_number > max {
            tracing::warn!(
                match_number = input.match_number,
                max,
                "pregame rejected: match number out of range"
            );
            return Err(LifecycleError::MatchOutOfRange {
                number: input.match_number,
                min: MIN_MATCH_NUMBER,
                max,
            });
        }

        let alliance = alliance_of(&input.driver_station);
        let tma_key = format!("{}-{}{}", input.team_number, alliance, input.match_number);

        let row = [
            input.team_number.to_string(),
            input.match_number.to_string(),
            tma_key,
            input.driver_station.clone(),
            alliance,
            input.scout_name.clone(),
            escape_field(Some(&input.comment)),
        ]
        .join(",");

        self.store.write(&record_key(input.match_number), &row)?;
        tracing::info!(
            match_number = input.match_number,
            team_number = input.team_number,
            "pregame record created"
        );

        self.reset_working(input.match_number);
        self.comment = input.comment.clone();
        self.stage = Stage::Scoring;
        Ok(row)
    }

    /// Enter scoring for a match, loading any stored row into working state.
    ///
    /// A missing or unparseable row is not an error; scoring starts from
    /// zeroed counters and a later save will report the missing base.
    pub fn resume(&mut self, match_number: u32) -> Result<(), LifecycleError> {
        self.reset_working(match_number);

        match self.store.read(&record_key(match_number)) {
            Ok(text) => match MatchRecord::from_csv(&text) {
                Ok(record) => {
                    self.counters = [
                        record.counter(Field::AutoFuel),
                        record.counter(Field::AutoPasses),
                        record.counter(Field::TeleopFuel),
                        record.counter(Field::TeleopPasses),
                    ];
                    self.comment = record.get(Field::Comment);
                    self.questions = record.get(Field::Questions);
                    tracing::info!(match_number, version = ?record.version, "resumed stored record");
                }
                Err(e) => {
                    tracing::warn!(match_number, "stored record is malformed: {e}");
                }
            },
            Err(StorageError::NotFound(_)) => {
                tracing::info!(match_number, "no stored record, starting fresh");
            }
            Err(e) => return Err(e.into()),
        }

        self.stage = Stage::Scoring;
        Ok(())
    }

    /// Apply a counter delta, rejecting any update that would go negative.
    ///
    /// Returns whether the update was accepted. Rejected updates leave the
    /// change tracker untouched. Accepted auto-counter updates arm the
    /// auto-phase reminder; teleop updates silence it.
    pub fn update_counter(&mut self, counter: Counter, delta: i32, now: Instant) -> bool {
        if self.stage != Stage::Scoring {
            return false;
        }

        let current = self.counters[counter.index()];
        let next = i64::from(current) + i64::from(delta);
        if next < 0 {
            return false;
        }

        self.counters[counter.index()] = u32::try_from(next).unwrap_or(u32::MAX);
        self.trackers[counter.index()].record(delta, now);

        if counter.is_auto() {
            self.reminder.touch_auto(now);
        } else {
            self.reminder.touch_teleop();
        }
        true
    }

    /// The accumulated change currently displayed for a counter.
    pub fn recent_change(&self, counter: Counter, now: Instant) -> Option<i32> {
        self.trackers[counter.index()].current(now)
    }

    /// Whether the auto-phase reminder should fire right now.
    pub fn auto_reminder_due(&self, now: Instant) -> bool {
        self.reminder.is_due(now)
    }

    /// The auto section was collapsed; silences the reminder.
    pub fn collapse_auto_section(&mut self) {
        self.reminder.collapse();
    }

    /// Rewrite the stored row from working state.
    ///
    /// Re-reads the row fresh so external edits to the pregame fields are
    /// preserved verbatim, then overwrites the comment, the four counters and
    /// the questions field. Fails without writing when there is no parseable
    /// base row; callers treat that as non-fatal.
    pub fn save(&mut self) -> Result<String, LifecycleError> {
        let match_number = self
            .match_number
            .ok_or(LifecycleError::WrongStage(self.stage))?;
        let key = record_key(match_number);

        let text = match self.store.read(&key) {
            Ok(text) => text,
            Err(StorageError::NotFound(_)) => {
                tracing::warn!(match_number, "save skipped: no base record");
                return Err(LifecycleError::NoBaseRecord(match_number));
            }
            Err(e) => return Err(e.into()),
        };

        let base = match MatchRecord::from_csv(&text) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(match_number, "save skipped: {e}");
                return Err(e.into());
            }
        };

        let mut fields: Vec<String> = base.fields.iter().take(6).cloned().collect();
        fields.push(escape_field(Some(&self.comment)));
        fields.push(self.counter_value(Counter::AutoFuel).to_string());
        fields.push(self.counter_value(Counter::AutoPasses).to_string());
        fields.push(self.counter_value(Counter::TeleopFuel).to_string());
        fields.push(self.counter_value(Counter::TeleopPasses).to_string());
        fields.push(escape_field(Some(&self.questions)));

        let row = fields.join(",");
        self.store.write(&key, &row)?;
        tracing::info!(match_number, "match record saved");
        Ok(row)
    }

    /// Save and carry the freshly written row into the submitted stage.
    pub fn submit(&mut self) -> Result<String, LifecycleError> {
        let row = self.save()?;
        self.submitted_row = Some(row.clone());
        self.stage = Stage::Submitted;
        tracing::info!(match_number = ?self.match_number, "match record submitted");
        Ok(row)
    }

    /// Append the comparison suffix to the carried row and finalize it.
    ///
    /// Overwrites the questions field with the in-memory value first, appends
    /// `current_team,previous_team,outcome`, writes the extended row and
    /// records scout history best-effort.
    pub fn compare(
        &mut self,
        current_team: u32,
        previous_team: u32,
        outcome: ComparisonOutcome,
    ) -> Result<String, LifecycleError> {
        if self.stage != Stage::Submitted {
            return Err(LifecycleError::WrongStage(self.stage));
        }
        let match_number = self
            .match_number
            .ok_or(LifecycleError::WrongStage(self.stage))?;
        let carried = self
            .submitted_row
            .clone()
            .ok_or(LifecycleError::WrongStage(self.stage))?;

        let mut record = MatchRecord::from_csv(&carried)?;
        if record.fields.len() >= V2_FIELD_COUNT {
            record
                .set(Field::Questions, self.questions.clone())
                .map_err(RecordError::from)?;
        }
        record
            .append_comparison(
                &current_team.to_string(),
                &previous_team.to_string(),
                outcome.as_field(),
            )
            .map_err(RecordError::from)?;

        let row = record.to_csv();
        self.store.write(&record_key(match_number), &row)?;
        tracing::info!(
            match_number,
            current_team,
            previous_team,
            outcome = outcome.as_field(),
            "comparison recorded"
        );

        let history = ScoutHistory::new(record.get(Field::ScoutName), current_team);
        if let Err(e) = history.save(&mut self.store) {
            tracing::warn!("failed to save scout history: {e}");
        }

        self.submitted_row = Some(row.clone());
        self.stage = Stage::Exported;
        Ok(row)
    }

    /// Read-only handoff view of the carried row.
    pub fn export(&self) -> Result<ExportView, LifecycleError> {
        if !matches!(self.stage, Stage::Submitted | Stage::Exported) {
            return Err(LifecycleError::WrongStage(self.stage));
        }
        let row = self
            .submitted_row
            .as_ref()
            .ok_or(LifecycleError::WrongStage(self.stage))?;
        Ok(export::export_view(row)?)
    }

    /// Navigate back from the handoff view into scoring.
    pub fn reopen(&mut self) {
        if matches!(self.stage, Stage::Submitted | Stage::Exported) {
            self.stage = Stage::Scoring;
        }
    }

    /// The device settings this engine was built with.
    pub fn settings(&self) -> &ScoutSettings {
        &self.settings
    }

    /// Shared access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store, for callers that keep other
    /// blobs (settings, schedule) in the same place.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give up the store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn reset_working(&mut self, match_number: u32) {
        self.match_number = Some(match_number);
        self.comment.clear();
        self.questions.clear();
        self.counters = [0; 4];
        for tracker in &mut self.trackers {
            tracker.reset();
        }
        self.reminder.reset();
        self.submitted_row = None;
    }
}

fn alliance_of(driver_station: &str) -> String {
    driver_station
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_default()
}
