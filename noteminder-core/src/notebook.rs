use crate::models::normalize_tags;
use crate::{validate_text, CoreError, Note, NoteId, NotesFile};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use tracing::{info, warn};

/// Partial edit of a note's user-editable fields.
#[derive(Clone, Debug, Default)]
pub struct NoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The in-memory notes collection, its id counter and the current selection.
#[derive(Clone, Debug)]
pub struct Notebook {
    notes: Vec<Note>,
    next_id: NoteId,
    selected: Option<NoteId>,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Notebook {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            selected: None,
        }
    }

    /// Builds a notebook from an imported document. Ids must be unique and
    /// positive, and the counter must exceed every id.
    pub fn from_file(file: NotesFile) -> Result<Self, CoreError> {
        check_ids(&file.notes)?;
        if let Some(max) = file.notes.iter().map(|n| n.id).max() {
            if max >= file.note_id_counter {
                return Err(CoreError::Format(format!(
                    "note_id_counter {} must exceed note id {}",
                    file.note_id_counter, max
                )));
            }
        }
        if file.note_id_counter == 0 {
            return Err(CoreError::Format("note_id_counter must be positive".into()));
        }
        Ok(Self {
            notes: file.notes,
            next_id: file.note_id_counter,
            selected: None,
        })
    }

    /// Builds a notebook from the app's own store. A counter that does not
    /// exceed every id is raised to `max(id) + 1` instead of being rejected.
    pub fn from_stored(mut file: NotesFile) -> Result<Self, CoreError> {
        check_ids(&file.notes)?;
        let floor = file.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        if file.note_id_counter < floor {
            warn!(
                stored = file.note_id_counter,
                repaired = floor,
                "note_id_counter behind stored ids, repairing"
            );
            file.note_id_counter = floor;
        }
        Self::from_file(file)
    }

    pub fn to_file(&self) -> NotesFile {
        NotesFile {
            notes: self.notes.clone(),
            note_id_counter: self.next_id,
        }
    }

    /// Swaps in an imported document wholesale. On error nothing changes.
    pub fn replace(&mut self, file: NotesFile) -> Result<(), CoreError> {
        let incoming = Self::from_file(file)?;
        info!(
            notes = incoming.notes.len(),
            note_id_counter = incoming.next_id,
            "notebook replaced"
        );
        *self = incoming;
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn next_id(&self) -> NoteId {
        self.next_id
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    pub fn create(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<String>,
        today: NaiveDate,
    ) -> Result<Note, CoreError> {
        let note = Note::new(self.next_id, title, content, tags, today)?;
        self.next_id += 1;
        self.notes.push(note.clone());
        info!(note_id = note.id, "note created");
        Ok(note)
    }

    pub fn edit(&mut self, id: NoteId, edit: NoteEdit) -> Result<Note, CoreError> {
        let note = self.get(id).ok_or(CoreError::NotFound(id))?;
        let (title, content) = validate_text(
            edit.title.as_deref().unwrap_or(&note.title),
            edit.content.as_deref().unwrap_or(&note.content),
        )?;
        let note = self.get_mut(id).ok_or(CoreError::NotFound(id))?;
        note.title = title;
        note.content = content;
        if let Some(tags) = edit.tags {
            note.tags = normalize_tags(tags);
        }
        info!(note_id = id, "note edited");
        Ok(note.clone())
    }

    pub fn delete(&mut self, id: NoteId) -> Result<Note, CoreError> {
        let pos = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(CoreError::NotFound(id))?;
        let removed = self.notes.remove(pos);
        if self.selected == Some(id) {
            self.clear_selection();
        }
        info!(note_id = id, "note deleted");
        Ok(removed)
    }

    pub fn select(&mut self, id: NoteId) -> Result<(), CoreError> {
        if self.get(id).is_none() {
            return Err(CoreError::NotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Distinct tags across all notes, sorted.
    pub fn tags(&self) -> BTreeSet<String> {
        self.notes
            .iter()
            .flat_map(|n| n.tags.iter().cloned())
            .collect()
    }
}

fn check_ids(notes: &[Note]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for n in notes {
        if n.id == 0 {
            return Err(CoreError::Format("note ids must be positive".into()));
        }
        if !seen.insert(n.id) {
            return Err(CoreError::Format(format!("duplicate note id {}", n.id)));
        }
    }
    Ok(())
}
