use noteminder_core::{CoreError, NoteRepository, NotesFile};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub mod paths;

const REQUIRED_KEYS: [&str; 2] = ["notes", "note_id_counter"];
const TS_FORMAT: &str = "%Y%m%d-%H%M%S";

pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
}

impl JsonStore {
    pub fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Backup names start with the store's file stem, so stores sharing a
    /// backups directory rotate independently.
    fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("noteminder")
    }
}

impl NoteRepository for JsonStore {
    fn load(&self) -> Result<NotesFile, CoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no store yet, starting empty");
            return Ok(NotesFile::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let file = parse_notes_file(&data)?;
        info!(path = %self.path.display(), notes = file.notes.len(), "store loaded");
        Ok(file)
    }

    fn save(&self, file: &NotesFile) -> Result<(), CoreError> {
        write_with_backup(&self.path, &self.backups_dir, self.stem(), self.max_backups, file)?;
        debug!(path = %self.path.display(), notes = file.notes.len(), "store saved");
        Ok(())
    }

    fn preserve_unreadable(&self) -> Result<Option<PathBuf>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        fs::create_dir_all(&self.backups_dir)?;
        let ts = chrono::Local::now().format(TS_FORMAT);
        let copy = self
            .backups_dir
            .join(format!("{}.unreadable-{ts}.json", self.stem()));
        write_atomic(&copy, &bytes)?;
        warn!(path = %self.path.display(), copy = %copy.display(), "unreadable store preserved");
        Ok(Some(copy))
    }
}

/// Parses a collection document, requiring both top-level keys.
pub fn parse_notes_file(data: &str) -> Result<NotesFile, CoreError> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| CoreError::Format(format!("invalid JSON: {e}")))?;
    let obj = value
        .as_object()
        .ok_or_else(|| CoreError::Format("expected a JSON object".into()))?;
    for key in REQUIRED_KEYS {
        if !obj.contains_key(key) {
            return Err(CoreError::Format(format!("missing `{key}`")));
        }
    }
    serde_json::from_value(value).map_err(|e| CoreError::Format(e.to_string()))
}

/// Reads a user-chosen file for import. Validation of ids happens when the
/// document is swapped into a notebook.
pub fn import_file(path: &Path) -> Result<NotesFile, CoreError> {
    let data = fs::read_to_string(path)?;
    parse_notes_file(&data)
}

pub fn export_file(path: &Path, file: &NotesFile) -> Result<(), CoreError> {
    ensure_parent_dirs(path)?;
    write_atomic(path, &to_json(file)?)?;
    info!(path = %path.display(), notes = file.notes.len(), "notes exported");
    Ok(())
}

fn to_json(file: &NotesFile) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec_pretty(file).map_err(|e| CoreError::Format(e.to_string()))
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    stem: &str,
    max_backups: usize,
    file: &NotesFile,
) -> Result<(), CoreError> {
    ensure_parent_dirs(path)?;
    fs::create_dir_all(backups_dir)?;

    let json = to_json(file)?;
    write_atomic(path, &json)?;

    let ts = chrono::Local::now().format(TS_FORMAT);
    let backup_path = backups_dir.join(format!("{stem}-{ts}.json"));
    write_atomic(&backup_path, &json)?;

    rotate_backups(backups_dir, stem, max_backups)?;
    Ok(())
}

fn rotate_backups(dir: &Path, stem: &str, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| is_backup_of(name, stem))
        })
        .collect();
    // Names embed the timestamp, so lexical order is age order.
    entries.sort();
    if entries.len() > keep {
        for p in &entries[..entries.len() - keep] {
            let _ = fs::remove_file(p);
        }
    }
    Ok(())
}

/// Matches `<stem>-YYYYmmdd-HHMMSS.json` exactly.
fn is_backup_of(name: &str, stem: &str) -> bool {
    let Some(ts) = name
        .strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".json"))
    else {
        return false;
    };
    chrono::NaiveDateTime::parse_from_str(ts, TS_FORMAT).is_ok()
}
