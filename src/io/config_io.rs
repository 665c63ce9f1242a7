use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::io::project_io::{CONFIG_FILE, PersistError};
use crate::model::config::QuestConfig;

/// Read quest.toml from the quest directory. A missing file yields the
/// default config; a malformed one is an error, never silently replaced.
pub fn read_config(quest_dir: &Path) -> Result<QuestConfig, PersistError> {
    let path = quest_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(QuestConfig::default()),
        Err(e) => return Err(PersistError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}
