use crate::Note;
use chrono::NaiveDate;

pub fn filter_by_text<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&q)
                || n.content.to_lowercase().contains(&q)
                || n.tags.iter().any(|t| t.to_lowercase().contains(&q))
        })
        .collect()
}

/// Exact tag match, case-sensitive.
pub fn filter_by_tag<'a>(notes: &'a [Note], tag: &str) -> Vec<&'a Note> {
    let tag = tag.trim();
    notes.iter().filter(|n| n.has_tag(tag)).collect()
}

pub fn filter_due(notes: &[Note], today: NaiveDate) -> Vec<&Note> {
    notes.iter().filter(|n| n.is_due(today)).collect()
}
