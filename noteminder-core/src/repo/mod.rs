use crate::{CoreError, Notebook, NotesFile};
use std::path::PathBuf;

pub mod memory;

pub use memory::MemoryRepo;

/// Durable home of the notes collection.
pub trait NoteRepository {
    /// Reads the stored collection. A store that does not exist yet yields an
    /// empty document with the counter at 1.
    fn load(&self) -> Result<NotesFile, CoreError>;
    fn save(&self, file: &NotesFile) -> Result<(), CoreError>;

    /// Copies a store that failed to load somewhere the next save cannot
    /// overwrite. Returns the copy's location, if one was made.
    fn preserve_unreadable(&self) -> Result<Option<PathBuf>, CoreError> {
        Ok(None)
    }
}

/// Loads the stored notebook, repairing a stale id counter.
pub fn open_notebook<R: NoteRepository + ?Sized>(repo: &R) -> Result<Notebook, CoreError> {
    Notebook::from_stored(repo.load()?)
}

pub fn save_notebook<R: NoteRepository + ?Sized>(repo: &R, book: &Notebook) -> Result<(), CoreError> {
    repo.save(&book.to_file())
}
