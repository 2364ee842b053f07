use std::collections::BTreeSet;

use anyhow::{
  Context,
  anyhow
};
use chrono::Utc;
use serde_json::Value;
use tracing::{
  debug,
  info,
  warn
};

use crate::confirm::Confirm;
use crate::storage::{
  Storage,
  TODOS_KEY
};
use crate::task::{
  Task,
  TaskId
};

pub const CLEAR_ALL_PROMPT: &str =
  "Are you sure you want to clear all \
   tasks?";

/// Sole owner of the task collection and
/// sole writer of the `todos` slot.
///
/// Every mutation persists the whole
/// collection before returning. A failed
/// write rolls memory back, so the slot and
/// the collection never disagree.
#[derive(Debug)]
pub struct Store<S: Storage> {
  storage:    S,
  tasks:      Vec<Task>,
  high_water: u64
}

impl<S: Storage> Store<S> {
  /// Reads the collection, treating an
  /// absent, unreadable or malformed slot as
  /// empty.
  #[tracing::instrument(skip(storage))]
  pub fn load(storage: S) -> Self {
    let tasks = match storage
      .read(TODOS_KEY)
    {
      | Ok(Some(raw)) => {
        decode_collection(&raw)
      }
      | Ok(None) => {
        debug!(
          "no stored tasks; starting \
           empty"
        );
        vec![]
      }
      | Err(error) => {
        warn!(
          %error,
          "failed reading stored \
           tasks; starting empty"
        );
        vec![]
      }
    };

    let high_water = tasks
      .iter()
      .map(|task| task.id.0)
      .max()
      .unwrap_or(0);

    info!(
      count = tasks.len(),
      "loaded tasks"
    );

    Self {
      storage,
      tasks,
      high_water
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn pending_count(&self) -> usize {
    self
      .tasks
      .iter()
      .filter(|task| task.is_pending())
      .count()
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  #[tracing::instrument(skip(self))]
  pub fn add(
    &mut self,
    text: &str
  ) -> anyhow::Result<Option<TaskId>> {
    let text = text.trim();
    if text.is_empty() {
      debug!(
        "ignoring blank task text"
      );
      return Ok(None);
    }

    let id = self.next_id()?;
    let task =
      Task::new(id, text.to_string());
    let mut next = self.tasks.clone();
    next.push(task);
    self.commit(next)?;

    info!(%id, "added task");
    Ok(Some(id))
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<bool> {
    let Some(idx) = self.position(id)
    else {
      debug!(%id, "toggle target not found");
      return Ok(false);
    };

    let mut next = self.tasks.clone();
    next[idx] = next[idx].toggled();
    let completed = next[idx].completed;
    self.commit(next)?;

    info!(%id, completed, "toggled task");
    Ok(true)
  }

  /// Replaces the text of `id`. A blank
  /// `text` abandons the edit and keeps the
  /// original.
  #[tracing::instrument(skip(self))]
  pub fn edit(
    &mut self,
    id: TaskId,
    text: &str
  ) -> anyhow::Result<bool> {
    let text = text.trim();
    if text.is_empty() {
      debug!(%id, "blank edit discarded");
      return Ok(false);
    }

    let Some(idx) = self.position(id)
    else {
      debug!(%id, "edit target not found");
      return Ok(false);
    };

    if self.tasks[idx].text == text {
      return Ok(false);
    }

    let mut next = self.tasks.clone();
    next[idx] = next[idx]
      .with_text(text.to_string());
    self.commit(next)?;

    info!(%id, "edited task");
    Ok(true)
  }

  #[tracing::instrument(skip(self))]
  pub fn delete(
    &mut self,
    id: TaskId
  ) -> anyhow::Result<bool> {
    let Some(idx) = self.position(id)
    else {
      debug!(%id, "delete target not found");
      return Ok(false);
    };

    let mut next = self.tasks.clone();
    next.remove(idx);
    self.commit(next)?;

    info!(%id, "deleted task");
    Ok(true)
  }

  /// Empties the collection once `confirm`
  /// answers yes.
  #[tracing::instrument(skip(
    self, confirm
  ))]
  pub fn clear_all(
    &mut self,
    confirm: &mut dyn Confirm
  ) -> anyhow::Result<bool> {
    if !confirm.confirm(CLEAR_ALL_PROMPT)
    {
      info!("clear all canceled");
      return Ok(false);
    }

    let removed = self.tasks.len();
    self.commit(vec![])?;

    info!(removed, "cleared all tasks");
    Ok(true)
  }

  fn position(
    &self,
    id: TaskId
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|task| task.id == id)
  }

  fn next_id(
    &mut self
  ) -> anyhow::Result<TaskId> {
    let now = u64::try_from(
      Utc::now().timestamp_millis()
    )
    .unwrap_or(0);
    let floor = self
      .high_water
      .checked_add(1)
      .ok_or_else(|| {
        anyhow!(
          "task ids exhausted; highest \
           id is {}",
          self.high_water
        )
      })?;
    let id = now.max(floor);
    self.high_water = id;
    Ok(TaskId(id))
  }

  /// Swaps in `next` and writes it out,
  /// restoring the previous collection if
  /// the write fails.
  fn commit(
    &mut self,
    next: Vec<Task>
  ) -> anyhow::Result<()> {
    let previous = std::mem::replace(
      &mut self.tasks,
      next
    );
    if let Err(error) = self.persist() {
      self.tasks = previous;
      return Err(error);
    }
    Ok(())
  }

  #[tracing::instrument(skip(self))]
  fn persist(
    &mut self
  ) -> anyhow::Result<()> {
    let json =
      serde_json::to_string(&self.tasks)
        .context(
          "failed to encode tasks"
        )?;
    self
      .storage
      .write(TODOS_KEY, &json)
      .context(
        "failed to persist tasks"
      )?;
    debug!(
      count = self.tasks.len(),
      bytes = json.len(),
      "persisted tasks"
    );
    Ok(())
  }
}

/// Parses the stored record. Anything but
/// an array counts as no tasks; elements
/// that do not decode are dropped one by
/// one.
fn decode_collection(
  raw: &str
) -> Vec<Task> {
  let entries = match serde_json::from_str::<
    Option<Vec<Value>>
  >(raw)
  {
    | Ok(entries) => {
      entries.unwrap_or_default()
    }
    | Err(error) => {
      warn!(
        %error,
        "stored tasks are malformed; \
         starting empty"
      );
      return vec![];
    }
  };

  let parsed: Vec<Task> = entries
    .into_iter()
    .enumerate()
    .filter_map(|(idx, entry)| {
      match serde_json::from_value::<Task>(
        entry
      ) {
        | Ok(task) => Some(task),
        | Err(error) => {
          warn!(
            index = idx,
            %error,
            "dropping undecodable \
             stored task"
          );
          None
        }
      }
    })
    .collect();

  let mut seen = BTreeSet::new();
  let mut out =
    Vec::with_capacity(parsed.len());
  for mut task in parsed {
    let trimmed = task.text.trim();
    if trimmed.is_empty() {
      warn!(id = %task.id, "dropping stored task with blank text");
      continue;
    }
    if !seen.insert(task.id) {
      warn!(id = %task.id, "dropping stored task with duplicate id");
      continue;
    }
    if trimmed.len() != task.text.len() {
      task.text = trimmed.to_string();
    }
    out.push(task);
  }
  out
}
