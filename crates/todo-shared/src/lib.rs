//! Portable todo-list core shared by the
//! terminal and browser front ends.

pub mod app;
pub mod confirm;
pub mod edit;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use app::{
  Action,
  TodoApp
};
pub use confirm::{
  AlwaysConfirm,
  Confirm
};
pub use edit::{
  EditExit,
  EditSession
};
pub use storage::{
  MemoryStorage,
  Storage,
  TODOS_KEY
};
pub use store::Store;
pub use task::{
  Task,
  TaskId
};
pub use view::{
  Control,
  ListView,
  RowLabel,
  RowView,
  pending_count_text,
  render
};
