//! Declarative projection of the
//! collection. Front ends consume a
//! [`ListView`] and feed the bound
//! [`Action`]s back to the dispatcher.

use crate::app::Action;
use crate::edit::EditSession;
use crate::task::{
  Task,
  TaskId
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
  pub title:   &'static str,
  pub action:  Action,
  pub enabled: bool
}

impl Control {
  fn new(
    title: &'static str,
    action: Action,
    enabled: bool
  ) -> Self {
    Self {
      title,
      action,
      enabled
    }
  }

  /// The bound action, unless the control
  /// is inert.
  pub fn activate(
    &self
  ) -> Option<Action> {
    self
      .enabled
      .then(|| self.action.clone())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLabel {
  Display {
    text:            String,
    on_double_click: Option<Action>
  },
  Editing {
    value: String
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
  pub id:        TaskId,
  pub text:      String,
  pub completed: bool,
  pub class:     &'static str,
  pub label:     RowLabel,
  pub toggle:    Control,
  pub edit:      Control,
  pub delete:    Control
}

impl RowView {
  pub fn is_editing(&self) -> bool {
    matches!(
      self.label,
      RowLabel::Editing { .. }
    )
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct ListView {
  pub rows:    Vec<RowView>,
  pub pending: usize,
  pub status:  String
}

impl ListView {
  pub fn row(
    &self,
    id: TaskId
  ) -> Option<&RowView> {
    self
      .rows
      .iter()
      .find(|row| row.id == id)
  }
}

/// Rebuilds the whole list in collection
/// order.
pub fn render(
  tasks: &[Task],
  editing: Option<&EditSession>
) -> ListView {
  let rows: Vec<RowView> = tasks
    .iter()
    .map(|task| render_row(task, editing))
    .collect();
  let pending = tasks
    .iter()
    .filter(|task| task.is_pending())
    .count();

  ListView {
    rows,
    pending,
    status: pending_count_text(pending)
  }
}

fn render_row(
  task: &Task,
  editing: Option<&EditSession>
) -> RowView {
  let id = task.id;
  let editable = !task.completed;

  let label = match editing {
    | Some(session)
      if session.id == id =>
    {
      RowLabel::Editing {
        value: session.value.clone()
      }
    }
    | _ => RowLabel::Display {
      text:            task.text.clone(),
      on_double_click: editable
        .then_some(Action::BeginEdit(id))
    }
  };

  RowView {
    id,
    text: task.text.clone(),
    completed: task.completed,
    class: if task.completed {
      "todo-item completed"
    } else {
      "todo-item"
    },
    label,
    toggle: Control::new(
      "Toggle",
      Action::Toggle(id),
      true
    ),
    edit: Control::new(
      "Edit",
      Action::BeginEdit(id),
      editable
    ),
    delete: Control::new(
      "Delete",
      Action::Delete(id),
      true
    )
  }
}

pub fn pending_count_text(
  pending: usize
) -> String {
  let suffix =
    if pending == 1 { "" } else { "s" };
  format!(
    "You have {pending} pending \
     task{suffix}"
  )
}
