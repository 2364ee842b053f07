use todo_shared::{
  Action,
  TodoApp
};
use web_sys::{
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  TargetCast,
  function_component,
  html,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::components::TodoRow;
use crate::storage::{
  BrowserConfirm,
  LocalStorage
};

#[function_component(App)]
pub fn app() -> Html {
  let todo = use_mut_ref(|| {
    TodoApp::start(LocalStorage)
  });
  let view = {
    let todo = todo.clone();
    use_state(move || todo.borrow().view())
  };
  let draft = use_state(String::new);
  let input_ref = use_node_ref();

  let dispatch = {
    let todo = todo.clone();
    let view = view.clone();
    Callback::from(move |action: Action| {
      let Ok(mut app) = todo.try_borrow_mut()
      else {
        tracing::warn!(
          ?action,
          "dropping action raised while \
           another is running"
        );
        return;
      };

      match app
        .dispatch(action, &mut BrowserConfirm)
      {
        | Ok(next) => view.set(next),
        | Err(error) => {
          tracing::error!(
            %error,
            "todo action failed"
          );
          view.set(app.view());
        }
      }
    })
  };

  let add = {
    let dispatch = dispatch.clone();
    let draft = draft.clone();
    let input_ref = input_ref.clone();
    Callback::from(move |_: ()| {
      if draft.trim().is_empty() {
        return;
      }
      dispatch.emit(Action::Add(
        (*draft).clone()
      ));
      draft.set(String::new());
      if let Some(input) = input_ref
        .cast::<HtmlInputElement>()
      {
        let _ = input.focus();
      }
    })
  };

  let on_draft_input = {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      draft.set(input.value());
    })
  };
  let on_draft_keydown = {
    let add = add.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          add.emit(());
        }
      }
    )
  };
  let on_add_click = {
    let add = add.clone();
    Callback::from(move |_: MouseEvent| {
      add.emit(())
    })
  };
  let on_clear_click = {
    let dispatch = dispatch.clone();
    Callback::from(move |_: MouseEvent| {
      dispatch.emit(Action::ClearAll)
    })
  };

  html! {
      <div class="container">
          <h1>{ "Todo List" }</h1>
          <div class="input-section">
              <input
                  ref={input_ref}
                  id="todo-input"
                  type="text"
                  placeholder="Add a new task..."
                  value={(*draft).clone()}
                  oninput={on_draft_input}
                  onkeydown={on_draft_keydown}
              />
              <button id="add-btn" onclick={on_add_click}>{ "Add" }</button>
          </div>
          <ul id="todo-list">
              {
                  for view.rows.iter().cloned().map(|row| html! {
                      <TodoRow
                          key={row.id.0}
                          row={row.clone()}
                          on_action={dispatch.clone()}
                      />
                  })
              }
          </ul>
          <div class="footer">
              <span id="pending-count">{ &view.status }</span>
              <button id="clear-btn" onclick={on_clear_click}>{ "Clear All" }</button>
          </div>
      </div>
  }
}
