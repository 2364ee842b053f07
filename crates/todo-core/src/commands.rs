use todo_shared::{Action, Confirm, EditExit, ListView, Storage, TaskId, TodoApp};
use tracing::{debug, info, instrument};

use crate::cli::Command;

/// What a command leaves on screen: an optional one-line notice and the re-rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub notice: Option<String>,
    pub view: ListView,
    pub status_only: bool,
}

impl Report {
    fn list(view: ListView, notice: Option<String>) -> Self {
        Self {
            notice,
            view,
            status_only: false,
        }
    }
}

#[instrument(skip(app, confirm))]
pub fn execute<S: Storage>(
    app: &mut TodoApp<S>,
    command: Command,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<Report> {
    match command {
        Command::List => Ok(Report::list(app.view(), None)),
        Command::Count => Ok(Report {
            notice: None,
            view: app.view(),
            status_only: true,
        }),
        Command::Add { text } => cmd_add(app, &text.join(" ")),
        Command::Toggle { id } => cmd_toggle(app, id),
        Command::Edit { id, text } => cmd_edit(app, id, &text.join(" ")),
        Command::Delete { id } => cmd_delete(app, id),
        Command::Clear { .. } => cmd_clear(app, confirm),
    }
}

fn cmd_add<S: Storage>(app: &mut TodoApp<S>, text: &str) -> anyhow::Result<Report> {
    info!("command add");

    let before = app.store().len();
    let view = app.dispatch(Action::Add(text.to_string()), &mut NoPrompt)?;

    let notice = if app.store().len() > before {
        let id = app.store().tasks().last().map(|task| task.id);
        debug!(?id, "task added");
        id.map(|id| format!("Created task {id}."))
    } else {
        Some("Nothing added: task text is empty.".to_string())
    };
    Ok(Report::list(view, notice))
}

fn cmd_toggle<S: Storage>(app: &mut TodoApp<S>, id: TaskId) -> anyhow::Result<Report> {
    info!(%id, "command toggle");

    if app.store().get(id).is_none() {
        return Ok(Report::list(app.view(), Some(missing(id))));
    }

    let view = app.dispatch(Action::Toggle(id), &mut NoPrompt)?;
    let notice = match app.store().get(id) {
        Some(task) if task.completed => format!("Completed task {id}."),
        _ => format!("Reopened task {id}."),
    };
    Ok(Report::list(view, Some(notice)))
}

/// Walks the inline edit flow: open the row, type, press Enter.
fn cmd_edit<S: Storage>(app: &mut TodoApp<S>, id: TaskId, text: &str) -> anyhow::Result<Report> {
    info!(%id, "command edit");

    let Some(original) = app.store().get(id).map(|task| task.text.clone()) else {
        return Ok(Report::list(app.view(), Some(missing(id))));
    };

    app.dispatch(Action::BeginEdit(id), &mut NoPrompt)?;
    if app.editing().is_none() {
        let notice = format!("Task {id} is completed; reopen it before editing.");
        return Ok(Report::list(app.view(), Some(notice)));
    }

    app.dispatch(Action::EditInput(text.to_string()), &mut NoPrompt)?;
    let view = app.dispatch(Action::FinishEdit(EditExit::Enter), &mut NoPrompt)?;

    let notice = match app.store().get(id) {
        _ if text.trim().is_empty() => {
            format!("Edit discarded: task {id} keeps \"{original}\".")
        }
        Some(task) if task.text != original => format!("Updated task {id}."),
        _ => format!("Task {id} unchanged."),
    };
    Ok(Report::list(view, Some(notice)))
}

fn cmd_delete<S: Storage>(app: &mut TodoApp<S>, id: TaskId) -> anyhow::Result<Report> {
    info!(%id, "command delete");

    if app.store().get(id).is_none() {
        return Ok(Report::list(app.view(), Some(missing(id))));
    }

    let view = app.dispatch(Action::Delete(id), &mut NoPrompt)?;
    Ok(Report::list(view, Some(format!("Deleted task {id}."))))
}

fn cmd_clear<S: Storage>(app: &mut TodoApp<S>, confirm: &mut dyn Confirm) -> anyhow::Result<Report> {
    info!("command clear");

    let mut answered = false;
    let mut asking = |message: &str| {
        answered = confirm.confirm(message);
        answered
    };
    let view = app.dispatch(Action::ClearAll, &mut asking)?;

    let notice = if answered {
        "Cleared all tasks."
    } else {
        "Clear canceled."
    };
    Ok(Report::list(view, Some(notice.to_string())))
}

fn missing(id: TaskId) -> String {
    format!("No task with id {id}.")
}

/// Stand-in for actions that never prompt.
struct NoPrompt;

impl Confirm for NoPrompt {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}
