use crate::CoreError;
use chrono::{Duration, NaiveDate};

/// Day offsets indexed by streak level.
pub const DEFAULT_OFFSETS: [u32; 6] = [1, 3, 7, 14, 30, 60];

/// Largest accepted offset, roughly a century.
pub const MAX_OFFSET_DAYS: u32 = 36_500;

/// Fixed lookup table from streak level to review spacing.
///
/// Streaks past the end of the table reuse the last offset, so spacing never
/// grows beyond it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSchedule {
    offsets: Vec<u32>,
}

impl Default for IntervalSchedule {
    fn default() -> Self {
        Self {
            offsets: DEFAULT_OFFSETS.to_vec(),
        }
    }
}

impl IntervalSchedule {
    pub fn new(offsets: Vec<u32>) -> Result<Self, CoreError> {
        if offsets.is_empty() {
            return Err(CoreError::Validation("interval table cannot be empty".into()));
        }
        if let Some(&big) = offsets.iter().find(|&&d| d > MAX_OFFSET_DAYS) {
            return Err(CoreError::Validation(format!(
                "interval of {big} days exceeds {MAX_OFFSET_DAYS}"
            )));
        }
        Ok(Self { offsets })
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn offset_days(&self, streak: u32) -> u32 {
        let last = self.offsets.len() - 1;
        self.offsets[(streak as usize).min(last)]
    }

    /// Saturates at `NaiveDate::MAX` near the end of the calendar.
    pub fn next_review_date(&self, streak: u32, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_signed(Duration::days(self.offset_days(streak) as i64))
            .unwrap_or(NaiveDate::MAX)
    }
}
