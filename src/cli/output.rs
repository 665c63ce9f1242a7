use chrono::NaiveDate;
use serde::Serialize;

use crate::model::notes::Notes;
use crate::model::task::{BacklogItem, TaskItem};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    pub task: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct BacklogJson {
    pub index: usize,
    pub task: String,
    pub due: NaiveDate,
}

#[derive(Serialize)]
pub struct SummaryJson {
    pub tasks: Vec<TaskJson>,
    pub backlog: Vec<BacklogJson>,
    pub points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressJson>,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub done: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct CompletionJson {
    pub index: usize,
    pub points: u64,
    pub motivation: &'static str,
    pub all_complete: bool,
}

#[derive(Serialize)]
pub struct NoteJson {
    pub category: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(index: usize, task: &TaskItem) -> TaskJson {
    TaskJson {
        index,
        task: task.label.clone(),
        done: task.done,
    }
}

pub fn backlog_to_json(index: usize, item: &BacklogItem) -> BacklogJson {
    BacklogJson {
        index,
        task: item.label.clone(),
        due: item.due,
    }
}

pub fn tasks_to_json(tasks: &[TaskItem]) -> Vec<TaskJson> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| task_to_json(i + 1, t))
        .collect()
}

pub fn backlog_list_to_json(items: &[BacklogItem]) -> Vec<BacklogJson> {
    items
        .iter()
        .enumerate()
        .map(|(i, b)| backlog_to_json(i + 1, b))
        .collect()
}

pub fn notes_to_json(notes: &Notes) -> Vec<NoteJson> {
    notes
        .iter()
        .map(|(category, text)| NoteJson {
            category: category.to_string(),
            text: text.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Human rendering
// ---------------------------------------------------------------------------

/// One line per task: ` 1 [x] Buy milk`
pub fn task_line(index: usize, task: &TaskItem) -> String {
    let mark = if task.done { 'x' } else { ' ' };
    format!("{:>2} [{}] {}", index, mark, task.label)
}

/// One line per backlog item: ` 1 Write report (due 2099-01-01)`
pub fn backlog_line(index: usize, item: &BacklogItem) -> String {
    format!("{:>2} {} (due {})", index, item.label, item.due)
}
