use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::notes::Notes;
use crate::model::state::AppState;
use crate::model::task::{BacklogItem, TaskItem};

/// Name of the data directory discovered by walking up from the CWD.
pub const QUEST_DIR: &str = "quest";
/// Tasks document (today's list, backlog, points).
pub const TASKS_FILE: &str = "tasks.json";
/// Notes document (flat category → text map).
pub const NOTES_FILE: &str = "notes.json";
/// Config file; its presence marks a quest directory.
pub const CONFIG_FILE: &str = "quest.toml";

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("not a quest workspace: no quest/ directory found")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse quest.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not encode {doc}: {source}")]
    EncodeError {
        doc: &'static str,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Wire form of tasks.json. Field names are the persistence contract;
/// every field defaults so hand-edited partial documents still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksDoc {
    #[serde(default)]
    pub tasks_today: Vec<TaskItem>,
    #[serde(default)]
    pub backlog: Vec<BacklogItem>,
    #[serde(default)]
    pub points: u64,
}

impl TasksDoc {
    pub fn from_state(state: &AppState) -> Self {
        TasksDoc {
            tasks_today: state.today.clone(),
            backlog: state.backlog.clone(),
            points: state.points,
        }
    }
}

/// Discover the quest directory by walking up from the given directory,
/// looking for a `quest/` subdirectory containing quest.toml.
pub fn discover_dir(start: &Path) -> Result<PathBuf, PersistError> {
    let mut current = start.to_path_buf();
    loop {
        let quest_dir = current.join(QUEST_DIR);
        if quest_dir.is_dir() && quest_dir.join(CONFIG_FILE).exists() {
            return Ok(quest_dir);
        }
        if !current.pop() {
            return Err(PersistError::NotAWorkspace);
        }
    }
}

/// Load the full state from a quest directory. A missing or malformed
/// document yields its default ("no prior state"); an unreadable one is an
/// error. `extra_categories` come from config and are folded into the
/// note defaults.
pub fn load_state(quest_dir: &Path, extra_categories: &[String]) -> Result<AppState, PersistError> {
    let doc: TasksDoc = read_doc(&quest_dir.join(TASKS_FILE))?;
    let mut notes: Notes = read_doc(&quest_dir.join(NOTES_FILE))?;
    notes.ensure_defaults(extra_categories);
    Ok(AppState::from_parts(
        doc.tasks_today,
        doc.backlog,
        doc.points,
        notes,
    ))
}

/// Write both documents back in full. Last write wins; there is no
/// cross-process coordination.
pub fn save_state(quest_dir: &Path, state: &AppState) -> Result<(), PersistError> {
    write_doc(&quest_dir.join(TASKS_FILE), "tasks.json", &TasksDoc::from_state(state))?;
    write_doc(&quest_dir.join(NOTES_FILE), "notes.json", &state.notes)?;
    Ok(())
}

fn read_doc<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> Result<T, PersistError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(PersistError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn write_doc<T: Serialize>(path: &Path, doc: &'static str, value: &T) -> Result<(), PersistError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| PersistError::EncodeError { doc, source: e })?;
    atomic_write(path, content.as_bytes()).map_err(|e| PersistError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
