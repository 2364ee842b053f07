use tracing::{
  debug,
  info
};

use crate::confirm::Confirm;
use crate::edit::{
  EditExit,
  EditSession
};
use crate::storage::Storage;
use crate::store::Store;
use crate::task::TaskId;
use crate::view::{
  ListView,
  render
};

/// One user event. Row controls carry the
/// id of the task they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Add(String),
  Toggle(TaskId),
  Delete(TaskId),
  ClearAll,
  BeginEdit(TaskId),
  EditInput(String),
  FinishEdit(EditExit)
}

/// Store plus the transient inline-edit
/// state. Each dispatched action runs to
/// completion and yields a fresh view.
#[derive(Debug)]
pub struct TodoApp<S: Storage> {
  store:   Store<S>,
  editing: Option<EditSession>
}

impl<S: Storage> TodoApp<S> {
  pub fn start(storage: S) -> Self {
    Self {
      store:   Store::load(storage),
      editing: None
    }
  }

  pub fn store(&self) -> &Store<S> {
    &self.store
  }

  pub fn editing(
    &self
  ) -> Option<&EditSession> {
    self.editing.as_ref()
  }

  pub fn view(&self) -> ListView {
    render(
      self.store.tasks(),
      self.editing.as_ref()
    )
  }

  #[tracing::instrument(skip(
    self, confirm
  ))]
  pub fn dispatch(
    &mut self,
    action: Action,
    confirm: &mut dyn Confirm
  ) -> anyhow::Result<ListView> {
    match action {
      | Action::Add(text) => {
        self.store.add(&text)?;
      }
      | Action::Toggle(id) => {
        self.store.toggle(id)?;
      }
      | Action::Delete(id) => {
        self.store.delete(id)?;
      }
      | Action::ClearAll => {
        self.store.clear_all(confirm)?;
      }
      | Action::BeginEdit(id) => {
        self.begin_edit(id)?;
      }
      | Action::EditInput(value) => {
        if let Some(session) =
          self.editing.as_mut()
        {
          session.set_value(value);
        }
      }
      | Action::FinishEdit(exit) => {
        self.finish_edit(exit)?;
      }
    }

    self.drop_stale_session();

    Ok(self.view())
  }

  fn begin_edit(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<()> {
    if self
      .editing
      .as_ref()
      .is_some_and(|session| {
        session.id == id
      })
    {
      return Ok(());
    }

    if self.editing.is_some() {
      self.finish_edit(EditExit::Blur)?;
    }

    let Some(task) = self.store.get(id)
    else {
      debug!(%id, "edit target not found");
      return Ok(());
    };

    match EditSession::begin(task) {
      | Some(session) => {
        debug!(%id, "entered edit mode");
        self.editing = Some(session);
      }
      | None => {
        debug!(
          %id,
          "completed task is not \
           editable"
        );
      }
    }
    Ok(())
  }

  /// Closes an edit whose row was removed
  /// or completed underneath it.
  fn drop_stale_session(&mut self) {
    let Some(session) = &self.editing
    else {
      return;
    };
    let editable = self
      .store
      .get(session.id)
      .is_some_and(|task| !task.completed);
    if !editable {
      debug!(
        id = %session.id,
        "edited row no longer editable; \
         leaving edit mode"
      );
      self.editing = None;
    }
  }

  fn finish_edit(
    &mut self,
    exit: EditExit
  ) -> anyhow::Result<()> {
    let Some(session) =
      self.editing.take()
    else {
      return Ok(());
    };

    match session.committed_text() {
      | Some(text) => {
        self
          .store
          .edit(session.id, text)?;
      }
      | None => {
        info!(
          id = %session.id,
          ?exit,
          "blank edit discarded; \
           keeping original text"
        );
      }
    }
    Ok(())
  }
}
