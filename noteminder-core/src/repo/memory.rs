use crate::{CoreError, NotesFile};
use parking_lot::RwLock;

/// Keeps the saved document in memory; nothing survives the process.
#[derive(Default)]
pub struct MemoryRepo {
    file: RwLock<Option<NotesFile>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(file: NotesFile) -> Self {
        Self {
            file: RwLock::new(Some(file)),
        }
    }
}

impl crate::repo::NoteRepository for MemoryRepo {
    fn load(&self) -> Result<NotesFile, CoreError> {
        Ok(self.file.read().clone().unwrap_or_default())
    }

    fn save(&self, file: &NotesFile) -> Result<(), CoreError> {
        *self.file.write() = Some(file.clone());
        Ok(())
    }
}
