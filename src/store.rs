use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::events::{StoreEvent, pick_motivation};
use crate::io::config_io;
use crate::io::project_io::{self, PersistError};
use crate::model::notes::Notes;
use crate::model::state::AppState;
use crate::model::task::{BacklogItem, EntryId, TaskItem};

/// XP awarded per completed task. Points only ever move up, in steps of
/// this, once per task.
pub const XP_PER_TASK: u64 = 10;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task label cannot be empty")]
    EmptyLabel,
    #[error("due date {0} is already past")]
    PastDue(NaiveDate),
    #[error("unknown note category: {0}")]
    UnknownCategory(String),
    #[error("no such entry: {0}")]
    NotFound(EntryId),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// What a not-done → done transition produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub motivation: &'static str,
    /// True when this completion finished off the whole list.
    pub all_complete: bool,
}

pub type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Owns the session's `AppState`, applies every mutation, persists both
/// documents after each one, and notifies subscribers.
///
/// Entries are addressed by `EntryId`, never by position. A stale id from
/// a double-submitted action fails with `NotFound` instead of hitting
/// whatever shifted into that slot.
pub struct TaskStore {
    dir: PathBuf,
    state: AppState,
    subscribers: Vec<Subscriber>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl TaskStore {
    /// Discover the quest directory by walking up from `start` and load.
    pub fn open(start: &Path) -> Result<Self, StoreError> {
        let dir = project_io::discover_dir(start)?;
        Self::load(&dir)
    }

    /// Load from a specific quest directory. Missing or malformed documents
    /// yield the default empty state.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let config = config_io::read_config(dir)?;
        let state = project_io::load_state(dir, &config.notes.extra_categories)?;
        Ok(TaskStore {
            dir: dir.to_path_buf(),
            state,
            subscribers: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn today(&self) -> &[TaskItem] {
        &self.state.today
    }

    pub fn backlog(&self) -> &[BacklogItem] {
        &self.state.backlog
    }

    pub fn points(&self) -> u64 {
        self.state.points
    }

    pub fn notes(&self) -> &Notes {
        &self.state.notes
    }

    /// `(done, total)` for today, or `None` when the list is empty.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.state.progress()
    }

    /// Render the notes map as `"<category>:\n<text>"` blocks joined by
    /// blank lines.
    pub fn export_notes(&self) -> String {
        self.state.notes.export()
    }

    /// Register an observer for store events. Presentation layers redraw
    /// on `Changed` instead of reaching into the store.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&StoreEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // -----------------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------------

    /// Append a task to today's list. The label is trimmed; an empty
    /// result is rejected.
    pub fn add_today(&mut self, label: &str) -> Result<EntryId, StoreError> {
        let label = validate_label(label)?;
        let id = self.state.mint_id();
        self.state.today.push(TaskItem {
            id,
            label,
            done: false,
        });
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(id)
    }

    /// Append a dated task to the backlog. The due date must be on or
    /// after the current date.
    pub fn add_backlog(&mut self, label: &str, due: NaiveDate) -> Result<EntryId, StoreError> {
        let label = validate_label(label)?;
        if due < today() {
            return Err(StoreError::PastDue(due));
        }
        let id = self.state.mint_id();
        self.state.backlog.push(BacklogItem { id, label, due });
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(id)
    }

    /// Mark a today task done and award XP. Re-completing an already-done
    /// task is a no-op (`Ok(None)`): no points, no events, no write.
    pub fn complete_today(&mut self, id: EntryId) -> Result<Option<Completion>, StoreError> {
        let task = self
            .state
            .find_today_mut(id)
            .ok_or(StoreError::NotFound(id))?;
        if task.done {
            return Ok(None);
        }
        task.done = true;
        self.state.points += XP_PER_TASK;
        self.persist()?;

        let completion = Completion {
            motivation: pick_motivation(),
            all_complete: self.state.all_done(),
        };
        self.emit(StoreEvent::TaskCompleted {
            id,
            motivation: completion.motivation,
        });
        if completion.all_complete {
            self.emit(StoreEvent::AllComplete);
        }
        self.emit(StoreEvent::Changed);
        Ok(Some(completion))
    }

    /// Remove a today task by identity.
    pub fn remove_today(&mut self, id: EntryId) -> Result<TaskItem, StoreError> {
        let idx = self
            .state
            .today
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.state.today.remove(idx);
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(removed)
    }

    /// Remove a backlog item by identity.
    pub fn remove_backlog(&mut self, id: EntryId) -> Result<BacklogItem, StoreError> {
        let idx = self
            .state
            .backlog
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.state.backlog.remove(idx);
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(removed)
    }

    /// Move a backlog item onto today's list. The item is removed by
    /// identity and re-minted as an open task, so repeated promotion of
    /// the current head drains the backlog without skipping.
    pub fn promote(&mut self, id: EntryId) -> Result<EntryId, StoreError> {
        let idx = self
            .state
            .backlog
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let item = self.state.backlog.remove(idx);
        let new_id = self.state.mint_id();
        self.state.today.push(TaskItem {
            id: new_id,
            label: item.label,
            done: false,
        });
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(new_id)
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    /// Overwrite a note category. The loaded category set is authoritative;
    /// the store never creates categories on the fly.
    pub fn set_note(&mut self, category: &str, text: &str) -> Result<(), StoreError> {
        if !self.state.notes.contains(category) {
            return Err(StoreError::UnknownCategory(category.to_string()));
        }
        self.state.notes.set(category, text.to_string());
        self.persist()?;
        self.emit(StoreEvent::Changed);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn persist(&mut self) -> Result<(), PersistError> {
        project_io::save_state(&self.dir, &self.state)
    }

    fn emit(&mut self, event: StoreEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_label(label: &str) -> Result<String, StoreError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
