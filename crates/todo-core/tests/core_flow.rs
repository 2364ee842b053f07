use std::fs;

use tempfile::tempdir;
use todo_core::cli::Command;
use todo_core::commands::{Report, execute};
use todo_core::datastore::FileStorage;
use todo_shared::{AlwaysConfirm, TaskId, TodoApp};

fn run(app: &mut TodoApp<FileStorage>, command: Command) -> Report {
    execute(app, command, &mut AlwaysConfirm(false)).expect("command should succeed")
}

fn add(app: &mut TodoApp<FileStorage>, text: &str) -> TaskId {
    run(app, Command::Add { text: vec![text.to_string()] });
    app.store().tasks().last().expect("task added").id
}

#[test]
fn file_storage_roundtrip_across_sessions() {
    let temp = tempdir().expect("tempdir");

    let (milk, rent) = {
        let storage = FileStorage::open(temp.path()).expect("open storage");
        let mut app = TodoApp::start(storage);
        let milk = add(&mut app, "Buy milk");
        let rent = add(&mut app, "Pay rent");
        run(&mut app, Command::Toggle { id: rent });
        (milk, rent)
    };

    let raw = fs::read_to_string(temp.path().join("todos.json")).expect("todos.json written");
    let stored: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(
        stored,
        serde_json::json!([
            {"id": milk.0, "text": "Buy milk", "completed": false},
            {"id": rent.0, "text": "Pay rent", "completed": true},
        ])
    );

    let storage = FileStorage::open(temp.path()).expect("reopen storage");
    let app = TodoApp::start(storage);
    let view = app.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].text, "Buy milk");
    assert!(view.rows[1].completed);
    assert_eq!(view.status, "You have 1 pending task");
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced() {
    let temp = tempdir().expect("tempdir");
    fs::write(temp.path().join("todos.json"), "{not json").expect("seed corrupt file");

    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut app = TodoApp::start(storage);
    let report = run(&mut app, Command::List);
    assert!(report.view.rows.is_empty());
    assert_eq!(report.view.status, "You have 0 pending tasks");

    add(&mut app, "Start over");
    let raw = fs::read_to_string(temp.path().join("todos.json")).expect("todos.json");
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).expect("array");
    assert_eq!(stored.len(), 1);
}

#[test]
fn command_notices() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut app = TodoApp::start(storage);

    let report = run(&mut app, Command::Add { text: vec!["  ".into()] });
    assert_eq!(report.notice.as_deref(), Some("Nothing added: task text is empty."));
    assert!(report.view.rows.is_empty());

    let id = add(&mut app, "Buy milk");

    let report = run(&mut app, Command::Edit { id, text: vec!["Buy".into(), "bread".into()] });
    assert_eq!(report.notice, Some(format!("Updated task {id}.")));
    assert_eq!(report.view.rows[0].text, "Buy bread");

    let report = run(&mut app, Command::Edit { id, text: vec![] });
    assert_eq!(report.notice, Some(format!("Edit discarded: task {id} keeps \"Buy bread\".")));
    assert_eq!(report.view.rows[0].text, "Buy bread");

    let report = run(&mut app, Command::Toggle { id });
    assert_eq!(report.notice, Some(format!("Completed task {id}.")));

    let report = run(&mut app, Command::Edit { id, text: vec!["Nope".into()] });
    assert_eq!(
        report.notice,
        Some(format!("Task {id} is completed; reopen it before editing."))
    );
    assert_eq!(report.view.rows[0].text, "Buy bread");

    let report = run(&mut app, Command::Toggle { id });
    assert_eq!(report.notice, Some(format!("Reopened task {id}.")));

    let report = run(&mut app, Command::Delete { id: TaskId(1) });
    assert_eq!(report.notice.as_deref(), Some("No task with id 1."));
    assert_eq!(report.view.rows.len(), 1);

    let report = run(&mut app, Command::Delete { id });
    assert_eq!(report.notice, Some(format!("Deleted task {id}.")));
    assert!(report.view.rows.is_empty());
}

#[test]
fn clear_respects_confirmation() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut app = TodoApp::start(storage);
    add(&mut app, "Buy milk");
    add(&mut app, "Pay rent");

    let report = execute(&mut app, Command::Clear { yes: false }, &mut AlwaysConfirm(false))
        .expect("clear");
    assert_eq!(report.notice.as_deref(), Some("Clear canceled."));
    assert_eq!(report.view.rows.len(), 2);

    let report = execute(&mut app, Command::Clear { yes: true }, &mut AlwaysConfirm(true))
        .expect("clear");
    assert_eq!(report.notice.as_deref(), Some("Cleared all tasks."));
    assert!(report.view.rows.is_empty());
    assert_eq!(report.view.status, "You have 0 pending tasks");

    let raw = fs::read_to_string(temp.path().join("todos.json")).expect("todos.json");
    assert_eq!(raw, "[]");
}

#[test]
fn count_reports_status_only() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut app = TodoApp::start(storage);
    add(&mut app, "Buy milk");

    let report = run(&mut app, Command::Count);
    assert!(report.status_only);
    assert_eq!(report.view.status, "You have 1 pending task");
}
