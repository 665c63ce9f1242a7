use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::project_io::{self, CONFIG_FILE, QUEST_DIR};
use crate::model::state::AppState;

const QUEST_TOML_TEMPLATE: &str = r##"[project]
name = "{name}"

# --- Notes ---
# Built-in categories: Goals, Ideas, Groceries, Journal, Work, Health, Scratch.
# Declare extra categories here; the app never invents new ones on its own.
#
# [notes]
# extra_categories = ["Recipes"]
"##;

/// Infer a project name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let quest_dir = cwd.join(QUEST_DIR);

    // Check if already initialized
    if quest_dir.is_dir() {
        return Err("quest workspace already exists in ./quest/".into());
    }

    // Infer project name
    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Quest".to_string())
    });

    fs::create_dir_all(&quest_dir)?;
    fs::write(
        quest_dir.join(CONFIG_FILE),
        QUEST_TOML_TEMPLATE.replace("{name}", &name),
    )?;

    // Seed both documents so the files exist from day one
    project_io::save_state(&quest_dir, &AppState::new())?;

    println!("Initialized quest workspace in ./{}/", QUEST_DIR);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("my-day"), "My Day");
        assert_eq!(infer_name("quest"), "Quest");
    }
}
