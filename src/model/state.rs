use crate::model::notes::Notes;
use crate::model::task::{BacklogItem, EntryId, TaskItem};

/// The full in-memory aggregate: today's tasks, the backlog, the XP
/// counter, and the notes map.
///
/// One `AppState` is owned by one `TaskStore` per session; there is no
/// ambient global. Entry ids are session-local and minted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub today: Vec<TaskItem>,
    pub backlog: Vec<BacklogItem>,
    pub points: u64,
    pub notes: Notes,
    next_id: u64,
}

impl AppState {
    /// Empty state with the default note categories.
    pub fn new() -> Self {
        AppState {
            notes: Notes::with_defaults(),
            ..Default::default()
        }
    }

    /// Rebuild state from loaded document parts, assigning fresh ids.
    pub fn from_parts(
        today: Vec<TaskItem>,
        backlog: Vec<BacklogItem>,
        points: u64,
        notes: Notes,
    ) -> Self {
        let mut state = AppState {
            today,
            backlog,
            points,
            notes,
            next_id: 0,
        };
        state.assign_ids();
        state
    }

    /// Mint a fresh entry id.
    pub fn mint_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId(self.next_id)
    }

    /// Assign fresh ids to every entry. Called once after load; persisted
    /// documents carry no ids.
    pub fn assign_ids(&mut self) {
        self.next_id = 0;
        let mut next = 0u64;
        for task in &mut self.today {
            next += 1;
            task.id = EntryId(next);
        }
        for item in &mut self.backlog {
            next += 1;
            item.id = EntryId(next);
        }
        self.next_id = next;
    }

    pub fn find_today_mut(&mut self, id: EntryId) -> Option<&mut TaskItem> {
        self.today.iter_mut().find(|t| t.id == id)
    }

    /// `(done, total)` for today's tasks, or `None` when there are no
    /// tasks; callers show "no progress" instead of dividing by zero.
    pub fn progress(&self) -> Option<(usize, usize)> {
        if self.today.is_empty() {
            return None;
        }
        let done = self.today.iter().filter(|t| t.done).count();
        Some((done, self.today.len()))
    }

    /// True when there is at least one task and every task is done.
    pub fn all_done(&self) -> bool {
        !self.today.is_empty() && self.today.iter().all(|t| t.done)
    }
}
