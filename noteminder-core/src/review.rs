use crate::{CoreError, Feedback, IntervalSchedule, Note, Notebook};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Streak transitions and due-first note selection.
#[derive(Clone, Debug, Default)]
pub struct ReviewEngine {
    schedule: IntervalSchedule,
}

impl ReviewEngine {
    pub fn new(schedule: IntervalSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &IntervalSchedule {
        &self.schedule
    }

    /// Moves the streak according to `feedback` and reschedules from the new streak.
    pub fn apply_feedback(&self, note: &mut Note, feedback: Feedback, today: NaiveDate) {
        note.streak = match feedback {
            Feedback::Easy => note.streak.saturating_add(2),
            Feedback::Good => note.streak.saturating_add(1),
            Feedback::Hard => note.streak.saturating_sub(1),
        };
        note.last_reviewed = today;
        note.next_review = self.schedule.next_review_date(note.streak, today);
        debug!(
            note_id = note.id,
            %feedback,
            streak = note.streak,
            next_review = %note.next_review,
            "feedback applied"
        );
    }

    /// Applies feedback to the notebook's selected note and returns the updated copy.
    pub fn review_selected(
        &self,
        book: &mut Notebook,
        feedback: Feedback,
        today: NaiveDate,
    ) -> Result<Note, CoreError> {
        let id = book.selected().ok_or(CoreError::InvalidState)?;
        let note = book.get_mut(id).ok_or(CoreError::InvalidState)?;
        self.apply_feedback(note, feedback, today);
        Ok(note.clone())
    }

    /// Picks a random due note, or a random note when nothing is due.
    pub fn select_for_review<'a, R: Rng + ?Sized>(
        &self,
        notes: &'a [Note],
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<&'a Note, CoreError> {
        if notes.is_empty() {
            return Err(CoreError::EmptyCollection);
        }
        let due: Vec<&Note> = notes.iter().filter(|n| n.is_due(today)).collect();
        let picked = if due.is_empty() {
            notes.choose(rng)
        } else {
            due.choose(rng).copied()
        };
        picked.ok_or(CoreError::EmptyCollection)
    }

    /// Selects a note for review and marks it as the notebook's current note.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        book: &mut Notebook,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Note, CoreError> {
        let note = self.select_for_review(book.notes(), today, rng)?.clone();
        book.select(note.id)?;
        Ok(note)
    }

    /// Due notes ordered by `next_review`, keeping collection order on ties.
    pub fn list_due<'a>(&self, notes: &'a [Note], today: NaiveDate) -> Vec<&'a Note> {
        let mut due: Vec<&Note> = notes.iter().filter(|n| n.is_due(today)).collect();
        due.sort_by_key(|n| n.next_review);
        due
    }
}
