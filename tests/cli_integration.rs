//! Integration tests for the `qs` CLI.
//!
//! Each test creates a temp workspace, runs `qs` as a subprocess,
//! and verifies stdout and/or on-disk JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `qs` binary.
fn qs_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("qs");
    path
}

/// Run `qs` with the given args in the given directory, returning (stdout, stderr, success).
fn run_qs(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(qs_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run qs");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `qs` expecting success, return stdout.
fn run_qs_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_qs(dir, args);
    if !success {
        panic!(
            "qs {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Create an initialized workspace.
fn init_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    run_qs_ok(tmp.path(), &["init", "--name", "Test"]);
    tmp
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();
    let stdout = run_qs_ok(tmp.path(), &["init"]);
    assert!(stdout.contains("Initialized"));

    let quest_dir = tmp.path().join("quest");
    assert!(quest_dir.join("quest.toml").exists());
    assert!(quest_dir.join("tasks.json").exists());
    assert!(quest_dir.join("notes.json").exists());

    // Seeded tasks doc is empty with zero points
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(quest_dir.join("tasks.json")).unwrap()).unwrap();
    assert_eq!(raw["points"], 0);
    assert_eq!(raw["tasks_today"].as_array().unwrap().len(), 0);
}

#[test]
fn test_init_twice_fails() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) = run_qs(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_commands_without_workspace_fail() {
    let tmp = TempDir::new().unwrap();
    let (_stdout, stderr, success) = run_qs(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("quest"));
}

// ---------------------------------------------------------------------------
// Today's tasks
// ---------------------------------------------------------------------------

#[test]
fn test_add_and_list() {
    let tmp = init_workspace();
    assert_eq!(run_qs_ok(tmp.path(), &["add", "Buy milk"]).trim(), "1");
    assert_eq!(run_qs_ok(tmp.path(), &["add", "Write report"]).trim(), "2");

    let stdout = run_qs_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("1 [ ] Buy milk"));
    assert!(stdout.contains("2 [ ] Write report"));
}

#[test]
fn test_add_empty_label_fails() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) = run_qs(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("empty"));
}

#[test]
fn test_done_awards_xp_once() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);

    let stdout = run_qs_ok(tmp.path(), &["done", "1"]);
    assert!(stdout.contains("+10 XP"));
    assert!(stdout.contains("All tasks complete"));

    // Second completion is a no-op
    let stdout = run_qs_ok(tmp.path(), &["done", "1"]);
    assert!(stdout.contains("already done"));

    let stdout = run_qs_ok(tmp.path(), &["progress"]);
    assert!(stdout.contains("1/1 done"));
    assert!(stdout.contains("XP: 10"));
}

#[test]
fn test_done_bad_index_fails() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) = run_qs(tmp.path(), &["done", "3"]);
    assert!(!success);
    assert!(stderr.contains("position"));
}

#[test]
fn test_rm_removes_correct_task() {
    let tmp = init_workspace();
    for label in ["a", "b", "c"] {
        run_qs_ok(tmp.path(), &["add", label]);
    }
    run_qs_ok(tmp.path(), &["rm", "2"]);

    let stdout = run_qs_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("a"));
    assert!(!stdout.contains("b"));
    assert!(stdout.contains("c"));
}

#[test]
fn test_state_persists_across_invocations() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);
    run_qs_ok(tmp.path(), &["done", "1"]);

    let raw: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("quest/tasks.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["tasks_today"][0]["task"], "Buy milk");
    assert_eq!(raw["tasks_today"][0]["done"], true);
    assert_eq!(raw["points"], 10);
}

// ---------------------------------------------------------------------------
// Backlog
// ---------------------------------------------------------------------------

#[test]
fn test_backlog_add_list_promote() {
    let tmp = init_workspace();
    run_qs_ok(
        tmp.path(),
        &["backlog", "add", "Write report", "--due", "2099-01-01"],
    );

    let stdout = run_qs_ok(tmp.path(), &["backlog"]);
    assert!(stdout.contains("Write report (due 2099-01-01)"));

    let stdout = run_qs_ok(tmp.path(), &["promote", "1"]);
    assert!(stdout.contains("promoted: Write report"));

    assert_eq!(run_qs_ok(tmp.path(), &["backlog"]).trim(), "");
    let stdout = run_qs_ok(tmp.path(), &["list"]);
    assert!(stdout.contains("[ ] Write report"));
}

#[test]
fn test_backlog_rejects_past_due_date() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) = run_qs(
        tmp.path(),
        &["backlog", "add", "Old", "--due", "2000-01-01"],
    );
    assert!(!success);
    assert!(stderr.contains("past"));
}

#[test]
fn test_backlog_rejects_malformed_date() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) =
        run_qs(tmp.path(), &["backlog", "add", "Odd", "--due", "someday"]);
    assert!(!success);
    assert!(stderr.contains("YYYY-MM-DD"));
}

#[test]
fn test_repeated_promote_drains_in_order() {
    let tmp = init_workspace();
    for label in ["a", "b", "c"] {
        run_qs_ok(
            tmp.path(),
            &["backlog", "add", label, "--due", "2099-01-01"],
        );
    }
    for _ in 0..3 {
        run_qs_ok(tmp.path(), &["promote", "1"]);
    }

    let stdout = run_qs_ok(tmp.path(), &["list"]);
    let positions: Vec<usize> = ["a", "b", "c"]
        .iter()
        .map(|l| stdout.find(&format!("[ ] {}", l)).unwrap())
        .collect();
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[test]
fn test_note_set_show_export() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["note", "set", "Goals", "ship it"]);
    assert_eq!(run_qs_ok(tmp.path(), &["note", "show", "Goals"]).trim(), "ship it");

    let export = run_qs_ok(tmp.path(), &["note", "export"]);
    assert!(export.contains("Goals:\nship it"));

    let out = tmp.path().join("notes.txt");
    run_qs_ok(tmp.path(), &["note", "export", "--out", out.to_str().unwrap()]);
    assert!(fs::read_to_string(&out).unwrap().contains("Goals:\nship it"));
}

#[test]
fn test_note_set_unknown_category_fails() {
    let tmp = init_workspace();
    let (_stdout, stderr, success) = run_qs(tmp.path(), &["note", "set", "Nope", "x"]);
    assert!(!success);
    assert!(stderr.contains("unknown note category"));
}

#[test]
fn test_note_list_shows_defaults() {
    let tmp = init_workspace();
    let stdout = run_qs_ok(tmp.path(), &["note", "list"]);
    for category in ["Goals", "Ideas", "Groceries", "Journal", "Work", "Health", "Scratch"] {
        assert!(stdout.contains(category), "missing {}", category);
    }
}

#[test]
fn test_config_extra_categories() {
    let tmp = init_workspace();
    fs::write(
        tmp.path().join("quest/quest.toml"),
        "[project]\nname = \"Test\"\n\n[notes]\nextra_categories = [\"Recipes\"]\n",
    )
    .unwrap();

    run_qs_ok(tmp.path(), &["note", "set", "Recipes", "soup"]);
    assert_eq!(run_qs_ok(tmp.path(), &["note", "show", "Recipes"]).trim(), "soup");
}

// ---------------------------------------------------------------------------
// Summary and JSON output
// ---------------------------------------------------------------------------

#[test]
fn test_summary_empty() {
    let tmp = init_workspace();
    let stdout = run_qs_ok(tmp.path(), &[]);
    assert!(stdout.contains("No tasks yet"));
    assert!(stdout.contains("XP: 0"));
}

#[test]
fn test_summary_with_tasks() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);
    run_qs_ok(
        tmp.path(),
        &["backlog", "add", "Report", "--due", "2099-01-01"],
    );

    let stdout = run_qs_ok(tmp.path(), &[]);
    assert!(stdout.contains("Today:"));
    assert!(stdout.contains("Buy milk"));
    assert!(stdout.contains("0/1 done"));
    assert!(stdout.contains("Backlog: 1 item(s)"));
}

#[test]
fn test_json_output() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);

    let stdout = run_qs_ok(tmp.path(), &["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["index"], 1);
    assert_eq!(tasks[0]["task"], "Buy milk");
    assert_eq!(tasks[0]["done"], false);

    let stdout = run_qs_ok(tmp.path(), &["done", "1", "--json"]);
    let completion: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(completion["points"], 10);
    assert_eq!(completion["all_complete"], true);

    let stdout = run_qs_ok(tmp.path(), &["--json"]);
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["points"], 10);
    assert_eq!(summary["progress"]["done"], 1);
    assert_eq!(summary["progress"]["total"], 1);
}

// ---------------------------------------------------------------------------
// -C flag
// ---------------------------------------------------------------------------

#[test]
fn test_dir_flag_points_at_workspace() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);

    let elsewhere = TempDir::new().unwrap();
    let stdout = run_qs_ok(elsewhere.path(), &["-C", tmp.path().to_str().unwrap(), "list"]);
    assert!(stdout.contains("Buy milk"));
}

// ---------------------------------------------------------------------------
// Hand-edited documents
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_tasks_doc_treated_as_empty() {
    let tmp = init_workspace();
    run_qs_ok(tmp.path(), &["add", "Buy milk"]);
    fs::write(tmp.path().join("quest/tasks.json"), "not json {{{").unwrap();

    let stdout = run_qs_ok(tmp.path(), &["list"]);
    assert_eq!(stdout.trim(), "");
    let stdout = run_qs_ok(tmp.path(), &[]);
    assert!(stdout.contains("No tasks yet"));
}

#[test]
fn test_unknown_note_category_in_file_is_editable() {
    let tmp = init_workspace();
    fs::write(
        tmp.path().join("quest/notes.json"),
        r#"{"Recipes":"soup"}"#,
    )
    .unwrap();

    let stdout = run_qs_ok(tmp.path(), &["note", "list"]);
    assert!(stdout.contains("Recipes"));
    run_qs_ok(tmp.path(), &["note", "set", "Recipes", "stew"]);
    assert_eq!(run_qs_ok(tmp.path(), &["note", "show", "Recipes"]).trim(), "stew");
}
