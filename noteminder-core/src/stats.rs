use crate::Note;
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsSummary {
    pub total_notes: usize,
    pub total_tags: usize,
    pub due: usize,
    pub avg_streak: f32,
}

pub fn summarize(notes: &[Note], today: NaiveDate) -> StatsSummary {
    let tags: BTreeSet<&str> = notes
        .iter()
        .flat_map(|n| n.tags.iter().map(String::as_str))
        .collect();
    let due = notes.iter().filter(|n| n.is_due(today)).count();
    let avg_streak = if notes.is_empty() {
        0.0
    } else {
        notes.iter().map(|n| n.streak as f32).sum::<f32>() / notes.len() as f32
    };
    StatsSummary {
        total_notes: notes.len(),
        total_tags: tags.len(),
        due,
        avg_streak,
    }
}
