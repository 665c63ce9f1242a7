use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Categories every notes document starts with.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Goals",
    "Ideas",
    "Groceries",
    "Journal",
    "Work",
    "Health",
    "Scratch",
];

/// Named free-text scratchpads, independent of the task lists.
///
/// Insertion order is preserved so the persisted document and any listing
/// stay stable across sessions. The category set is fixed at load time;
/// `TaskStore::set_note` rejects anything outside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes {
    entries: IndexMap<String, String>,
}

impl Notes {
    /// The seven default categories, all empty.
    pub fn with_defaults() -> Self {
        let mut notes = Notes::default();
        notes.ensure_defaults(&[]);
        notes
    }

    /// Insert any missing default (and configured extra) categories as empty.
    /// Existing entries keep their position and content.
    pub fn ensure_defaults(&mut self, extras: &[String]) {
        for category in DEFAULT_CATEGORIES {
            self.entries
                .entry(category.to_string())
                .or_insert_with(String::new);
        }
        for category in extras {
            self.entries
                .entry(category.clone())
                .or_insert_with(String::new);
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries.get(category).map(|s| s.as_str())
    }

    /// Overwrite a category's text. The caller has already validated that
    /// the category exists.
    pub fn set(&mut self, category: &str, text: String) {
        if let Some(entry) = self.entries.get_mut(category) {
            *entry = text;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render all categories as `"<category>:\n<text>"` blocks joined by
    /// blank lines, the plain-text export format.
    pub fn export(&self) -> String {
        self.entries
            .iter()
            .map(|(category, text)| format!("{}:\n{}", category, text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
