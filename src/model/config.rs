use serde::{Deserialize, Serialize};

/// Configuration from quest.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Categories to add on top of the built-in defaults.
    #[serde(default)]
    pub extra_categories: Vec<String>,
}

impl Default for QuestConfig {
    fn default() -> Self {
        QuestConfig {
            project: ProjectInfo {
                name: "Quest".to_string(),
            },
            notes: NotesConfig::default(),
        }
    }
}
