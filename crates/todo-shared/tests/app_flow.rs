use todo_shared::{
  Action,
  AlwaysConfirm,
  EditExit,
  MemoryStorage,
  RowLabel,
  TODOS_KEY,
  TodoApp
};

fn app_with(
  texts: &[&str]
) -> TodoApp<MemoryStorage> {
  let mut app =
    TodoApp::start(MemoryStorage::new());
  for text in texts {
    app
      .dispatch(
        Action::Add(text.to_string()),
        &mut AlwaysConfirm(false)
      )
      .expect("add");
  }
  app
}

fn send(
  app: &mut TodoApp<MemoryStorage>,
  action: Action
) -> todo_shared::ListView {
  app
    .dispatch(
      action,
      &mut AlwaysConfirm(true)
    )
    .expect("dispatch")
}

#[test]
fn startup_with_empty_storage() {
  let app =
    TodoApp::start(MemoryStorage::new());
  let view = app.view();
  assert!(view.rows.is_empty());
  assert_eq!(
    view.status,
    "You have 0 pending tasks"
  );
}

#[test]
fn startup_with_corrupt_storage() {
  let app = TodoApp::start(
    MemoryStorage::with_slot(
      TODOS_KEY,
      "[{broken"
    )
  );
  assert!(app.view().rows.is_empty());
}

#[test]
fn rows_track_collection_after_every_action()
{
  let mut app = app_with(&[
    "Buy milk", "Pay rent", "Call mom"
  ]);
  let ids: Vec<_> = app
    .view()
    .rows
    .iter()
    .map(|row| row.id)
    .collect();

  let actions = vec![
    Action::Toggle(ids[0]),
    Action::Delete(ids[1]),
    Action::Add("Water plants".into()),
    Action::Add("  ".into()),
    Action::BeginEdit(ids[2]),
    Action::EditInput("Call dad".into()),
    Action::FinishEdit(EditExit::Enter),
    Action::ClearAll,
  ];
  for action in actions {
    let view = send(&mut app, action);
    assert_eq!(
      view.rows.len(),
      app.store().len()
    );
    assert_eq!(
      view.pending,
      app.store().pending_count()
    );
  }
  assert!(app.store().is_empty());
}

#[test]
fn row_controls_dispatch_bound_actions()
{
  let mut app =
    app_with(&["Buy milk", "Pay rent"]);
  let view = app.view();
  let second = &view.rows[1];

  let toggle = second
    .toggle
    .activate()
    .expect("toggle enabled");
  let view = send(&mut app, toggle);
  assert!(view.rows[1].completed);
  assert!(!view.rows[0].completed);
  assert_eq!(
    view.status,
    "You have 1 pending task"
  );

  let delete = view.rows[0]
    .delete
    .activate()
    .expect("delete enabled");
  let view = send(&mut app, delete);
  assert_eq!(view.rows.len(), 1);
  assert_eq!(view.rows[0].text, "Pay rent");
}

#[test]
fn inline_edit_commits_on_enter() {
  let mut app = app_with(&["Buy milk"]);
  let id = app.view().rows[0].id;

  let view =
    send(&mut app, Action::BeginEdit(id));
  assert_eq!(
    view.rows[0].label,
    RowLabel::Editing {
      value: "Buy milk".to_string()
    }
  );

  send(
    &mut app,
    Action::EditInput("Buy bread".into())
  );
  let view = send(
    &mut app,
    Action::FinishEdit(EditExit::Enter)
  );
  assert!(app.editing().is_none());
  assert_eq!(view.rows[0].text, "Buy bread");
  assert_eq!(view.rows[0].id, id);
  assert!(!view.rows[0].is_editing());

  // Blur from the removed input after Enter.
  let view = send(
    &mut app,
    Action::FinishEdit(EditExit::Blur)
  );
  assert_eq!(view.rows[0].text, "Buy bread");
}

#[test]
fn blank_edit_restores_original() {
  let mut app = app_with(&["Buy milk"]);
  let id = app.view().rows[0].id;

  send(&mut app, Action::BeginEdit(id));
  send(
    &mut app,
    Action::EditInput("   ".into())
  );
  let view = send(
    &mut app,
    Action::FinishEdit(EditExit::Blur)
  );
  assert_eq!(
    view.rows[0].label,
    RowLabel::Display {
      text:            "Buy milk".into(),
      on_double_click: Some(
        Action::BeginEdit(id)
      )
    }
  );
}

#[test]
fn completed_rows_do_not_enter_edit() {
  let mut app = app_with(&["Buy milk"]);
  let id = app.view().rows[0].id;
  send(&mut app, Action::Toggle(id));

  let view =
    send(&mut app, Action::BeginEdit(id));
  assert!(app.editing().is_none());
  assert!(!view.rows[0].is_editing());

  send(
    &mut app,
    Action::EditInput("ignored".into())
  );
  let view = send(
    &mut app,
    Action::FinishEdit(EditExit::Enter)
  );
  assert_eq!(view.rows[0].text, "Buy milk");
}

#[test]
fn switching_rows_commits_open_edit() {
  let mut app =
    app_with(&["Buy milk", "Pay rent"]);
  let view = app.view();
  let (first, second) =
    (view.rows[0].id, view.rows[1].id);

  send(&mut app, Action::BeginEdit(first));
  send(
    &mut app,
    Action::EditInput("Buy oat milk".into())
  );
  let view =
    send(&mut app, Action::BeginEdit(second));

  assert_eq!(
    view.rows[0].text,
    "Buy oat milk"
  );
  assert!(view.rows[1].is_editing());
  assert_eq!(
    app.editing().map(|s| s.id),
    Some(second)
  );
}

#[test]
fn declined_clear_keeps_everything() {
  let mut app =
    app_with(&["Buy milk", "Pay rent"]);
  let view = app
    .dispatch(
      Action::ClearAll,
      &mut AlwaysConfirm(false)
    )
    .expect("dispatch");
  assert_eq!(view.rows.len(), 2);

  let view = send(&mut app, Action::ClearAll);
  assert!(view.rows.is_empty());
  assert_eq!(
    view.status,
    "You have 0 pending tasks"
  );
}

#[test]
fn toggling_edited_row_leaves_edit_mode() {
  let mut app = app_with(&["Buy milk"]);
  let id = app.view().rows[0].id;

  send(&mut app, Action::BeginEdit(id));
  send(
    &mut app,
    Action::EditInput("Buy bread".into())
  );
  let view =
    send(&mut app, Action::Toggle(id));
  assert!(app.editing().is_none());
  assert!(!view.rows[0].is_editing());
  assert!(view.rows[0].completed);

  let view = send(
    &mut app,
    Action::FinishEdit(EditExit::Blur)
  );
  assert_eq!(view.rows[0].text, "Buy milk");
}

#[test]
fn removing_edited_row_leaves_edit_mode() {
  let mut app =
    app_with(&["Buy milk", "Pay rent"]);
  let view = app.view();
  let (first, second) =
    (view.rows[0].id, view.rows[1].id);

  send(&mut app, Action::BeginEdit(first));
  send(&mut app, Action::Delete(first));
  assert!(app.editing().is_none());

  send(&mut app, Action::BeginEdit(second));
  let view = send(&mut app, Action::ClearAll);
  assert!(app.editing().is_none());
  assert!(view.rows.is_empty());
}
