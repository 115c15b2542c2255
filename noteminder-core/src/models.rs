use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

pub type NoteId = u64;

/// Days until a freshly created note is first due.
pub const INITIAL_INTERVAL_DAYS: i64 = 1;

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Easy,
    Good,
    Hard,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Easy => "easy",
            Feedback::Good => "good",
            Feedback::Hard => "hard",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "e" | "easy" => Ok(Feedback::Easy),
            "2" | "g" | "good" => Ok(Feedback::Good),
            "3" | "h" | "hard" => Ok(Feedback::Hard),
            other => Err(CoreError::Validation(format!(
                "unknown feedback `{other}` (expected easy, good or hard)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub tags: Vec<String>,
    pub content: String,
    pub created: NaiveDate,
    pub last_reviewed: NaiveDate,
    pub next_review: NaiveDate,
    pub streak: u32,
}

impl Note {
    /// Builds a validated note. Title and content are stored trimmed.
    pub fn new(
        id: NoteId,
        title: &str,
        content: &str,
        tags: Vec<String>,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let (title, content) = validate_text(title, content)?;
        Ok(Self {
            id,
            title,
            tags: normalize_tags(tags),
            content,
            created: today,
            last_reviewed: today,
            next_review: today
                .checked_add_signed(Duration::days(INITIAL_INTERVAL_DAYS))
                .unwrap_or(NaiveDate::MAX),
            streak: 0,
        })
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The persisted collection document: `{ "notes": [...], "note_id_counter": n }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesFile {
    pub notes: Vec<Note>,
    pub note_id_counter: NoteId,
}

impl Default for NotesFile {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            note_id_counter: 1,
        }
    }
}

/// Trims title and content, rejecting either when empty.
pub fn validate_text(title: &str, content: &str) -> Result<(String, String), CoreError> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(CoreError::Validation(
            "title and content cannot be empty".into(),
        ));
    }
    Ok((title.to_string(), content.to_string()))
}

/// Splits a comma separated tag string, trimming pieces and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
