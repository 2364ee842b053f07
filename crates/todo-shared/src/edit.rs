use crate::task::{
  Task,
  TaskId
};

/// How an inline edit was left.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum EditExit {
  /// The input lost focus.
  Blur,
  /// The confirm key was pressed.
  Enter
}

/// A row in the `Editing` state. No
/// session means every row shows its
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
  pub id:    TaskId,
  pub value: String
}

impl EditSession {
  /// Opens an edit pre-filled with the
  /// current text. Completed tasks cannot
  /// be edited.
  pub fn begin(
    task: &Task
  ) -> Option<Self> {
    if task.completed {
      return None;
    }
    Some(Self {
      id:    task.id,
      value: task.text.clone()
    })
  }

  pub fn set_value(
    &mut self,
    value: impl Into<String>
  ) {
    self.value = value.into();
  }

  /// The text to commit, or `None` when the
  /// input is blank and must be discarded.
  pub fn committed_text(
    &self
  ) -> Option<&str> {
    let trimmed = self.value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
  }
}
