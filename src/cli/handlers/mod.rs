mod init;
pub use init::cmd_init;

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::task::EntryId;
use crate::store::{TaskStore, XP_PER_TASK};

/// Global override for the start directory (set by -C flag)
static DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for open_store()
    if let Some(ref dir) = cli.dir {
        let abs = fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => cmd_summary(json),
        Some(cmd) => match cmd {
            // Init is handled before workspace discovery
            Commands::Init(args) => cmd_init(args),

            Commands::Add(args) => cmd_add(args, json),
            Commands::List => cmd_list(json),
            Commands::Done(args) => cmd_done(args, json),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Promote(args) => cmd_promote(args),
            Commands::Progress => cmd_progress(json),

            Commands::Backlog(args) => match args.action {
                None => cmd_backlog_list(json),
                Some(BacklogAction::Add(a)) => cmd_backlog_add(a),
                Some(BacklogAction::Rm(a)) => cmd_backlog_rm(a),
            },

            Commands::Note(args) => match args.action {
                NoteAction::List => cmd_note_list(json),
                NoteAction::Show(a) => cmd_note_show(a),
                NoteAction::Set(a) => cmd_note_set(a),
                NoteAction::Export(a) => cmd_note_export(a),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_store() -> Result<TaskStore, Box<dyn std::error::Error>> {
    let start = match DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    Ok(TaskStore::open(&start)?)
}

/// Resolve a 1-based list position against the current today list.
fn today_id(store: &TaskStore, index: usize) -> Result<EntryId, Box<dyn std::error::Error>> {
    let idx = index.checked_sub(1).ok_or("index must be >= 1")?;
    store
        .today()
        .get(idx)
        .map(|t| t.id)
        .ok_or_else(|| format!("no task at position {}", index).into())
}

/// Resolve a 1-based list position against the current backlog.
fn backlog_id(store: &TaskStore, index: usize) -> Result<EntryId, Box<dyn std::error::Error>> {
    let idx = index.checked_sub(1).ok_or("index must be >= 1")?;
    store
        .backlog()
        .get(idx)
        .map(|b| b.id)
        .ok_or_else(|| format!("no backlog item at position {}", index).into())
}

fn parse_due(due: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    due.parse()
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", due).into())
}

// ---------------------------------------------------------------------------
// Summary (no subcommand)
// ---------------------------------------------------------------------------

fn cmd_summary(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;

    if json {
        let summary = SummaryJson {
            tasks: tasks_to_json(store.today()),
            backlog: backlog_list_to_json(store.backlog()),
            points: store.points(),
            progress: store
                .progress()
                .map(|(done, total)| ProgressJson { done, total }),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if store.today().is_empty() {
        println!("No tasks yet. Add one with: qs add \"task\"");
    } else {
        println!("Today:");
        for (i, task) in store.today().iter().enumerate() {
            println!("{}", task_line(i + 1, task));
        }
        if let Some((done, total)) = store.progress() {
            println!("\n{}/{} done", done, total);
        }
    }
    if !store.backlog().is_empty() {
        println!("Backlog: {} item(s) (qs backlog)", store.backlog().len());
    }
    println!("🏆 XP: {}", store.points());
    Ok(())
}

// ---------------------------------------------------------------------------
// Task handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    store.add_today(&args.label)?;
    let index = store.today().len();
    if json {
        let task = &store.today()[index - 1];
        println!("{}", serde_json::to_string_pretty(&task_to_json(index, task))?);
    } else {
        println!("{}", index);
    }
    Ok(())
}

fn cmd_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tasks_to_json(store.today()))?
        );
        return Ok(());
    }
    for (i, task) in store.today().iter().enumerate() {
        println!("{}", task_line(i + 1, task));
    }
    Ok(())
}

fn cmd_done(args: IndexArg, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let id = today_id(&store, args.index)?;

    let Some(completion) = store.complete_today(id)? else {
        println!("already done");
        return Ok(());
    };

    if json {
        let out = CompletionJson {
            index: args.index,
            points: store.points(),
            motivation: completion.motivation,
            all_complete: completion.all_complete,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("✅ Task completed! +{} XP", XP_PER_TASK);
    println!("{}", completion.motivation);
    if completion.all_complete {
        println!("🎉 All tasks complete!");
    }
    Ok(())
}

fn cmd_rm(args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let id = today_id(&store, args.index)?;
    let removed = store.remove_today(id)?;
    println!("removed: {}", removed.label);
    Ok(())
}

fn cmd_promote(args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let id = backlog_id(&store, args.index)?;
    store.promote(id)?;
    let task = store.today().last().ok_or("promote left no task")?;
    println!("promoted: {}", task.label);
    Ok(())
}

fn cmd_progress(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    if json {
        let summary = SummaryJson {
            tasks: Vec::new(),
            backlog: Vec::new(),
            points: store.points(),
            progress: store
                .progress()
                .map(|(done, total)| ProgressJson { done, total }),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    match store.progress() {
        Some((done, total)) => println!("{}/{} done", done, total),
        None => println!("no tasks yet"),
    }
    println!("🏆 XP: {}", store.points());
    Ok(())
}

// ---------------------------------------------------------------------------
// Backlog handlers
// ---------------------------------------------------------------------------

fn cmd_backlog_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&backlog_list_to_json(store.backlog()))?
        );
        return Ok(());
    }
    for (i, item) in store.backlog().iter().enumerate() {
        println!("{}", backlog_line(i + 1, item));
    }
    Ok(())
}

fn cmd_backlog_add(args: BacklogAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let due = parse_due(&args.due)?;
    store.add_backlog(&args.label, due)?;
    println!("{}", store.backlog().len());
    Ok(())
}

fn cmd_backlog_rm(args: IndexArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    let id = backlog_id(&store, args.index)?;
    let removed = store.remove_backlog(id)?;
    println!("removed: {}", removed.label);
    Ok(())
}

// ---------------------------------------------------------------------------
// Note handlers
// ---------------------------------------------------------------------------

fn cmd_note_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&notes_to_json(store.notes()))?
        );
        return Ok(());
    }
    for (category, text) in store.notes().iter() {
        let mark = if text.is_empty() { " " } else { "*" };
        println!("{} {}", mark, category);
    }
    Ok(())
}

fn cmd_note_show(args: CategoryArg) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let text = store
        .notes()
        .get(&args.category)
        .ok_or_else(|| format!("unknown note category: {}", args.category))?;
    println!("{}", text);
    Ok(())
}

fn cmd_note_set(args: NoteSetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    store.set_note(&args.category, &args.text)?;
    Ok(())
}

fn cmd_note_export(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    let export = store.export_notes();
    match args.out {
        Some(path) => {
            fs::write(&path, export)?;
            println!("wrote {}", path);
        }
        None => println!("{}", export),
    }
    Ok(())
}
