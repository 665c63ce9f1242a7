use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qs", about = concat!("[*] quest v", env!("CARGO_PKG_VERSION"), " - earn XP for getting things done"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a quest workspace in the current directory
    Init(InitArgs),
    /// Add a task to today's list
    Add(AddArgs),
    /// List today's tasks
    List,
    /// Mark a task done and collect XP
    Done(IndexArg),
    /// Remove a task from today's list
    Rm(IndexArg),
    /// List backlog items, or manage them
    Backlog(BacklogCmd),
    /// Promote a backlog item to today's list
    Promote(IndexArg),
    /// Notes management
    Note(NoteCmd),
    /// Show progress and XP
    Progress,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Project name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub label: String,
}

#[derive(Args)]
pub struct IndexArg {
    /// List position (1-based)
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Backlog management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BacklogCmd {
    #[command(subcommand)]
    pub action: Option<BacklogAction>,
}

#[derive(Subcommand)]
pub enum BacklogAction {
    /// Add a dated item to the backlog
    Add(BacklogAddArgs),
    /// Remove a backlog item
    Rm(IndexArg),
}

#[derive(Args)]
pub struct BacklogAddArgs {
    /// Task text
    pub label: String,
    /// Due date (YYYY-MM-DD, today or later)
    #[arg(long)]
    pub due: String,
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NoteCmd {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// List categories
    List,
    /// Show a category's text
    Show(CategoryArg),
    /// Overwrite a category's text
    Set(NoteSetArgs),
    /// Export all notes as plain text
    Export(ExportArgs),
}

#[derive(Args)]
pub struct CategoryArg {
    /// Category name
    pub category: String,
}

#[derive(Args)]
pub struct NoteSetArgs {
    /// Category name
    pub category: String,
    /// Note text
    pub text: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}
