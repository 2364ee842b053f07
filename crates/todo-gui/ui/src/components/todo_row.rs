use todo_shared::{
  Action,
  EditExit,
  RowLabel,
  RowView
};
use web_sys::{
  Event,
  FocusEvent,
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct TodoRowProps {
  pub row:       RowView,
  pub on_action: Callback<Action>
}

fn bind<E: 'static>(
  on_action: &Callback<Action>,
  action: Option<Action>
) -> Callback<E> {
  let on_action = on_action.clone();
  Callback::from(move |_: E| {
    if let Some(action) = action.clone()
    {
      on_action.emit(action);
    }
  })
}

#[function_component(TodoRow)]
pub fn todo_row(
  props: &TodoRowProps
) -> Html {
  let row = &props.row;
  let edit_ref = use_node_ref();

  {
    let edit_ref = edit_ref.clone();
    use_effect_with(
      row.is_editing(),
      move |editing| {
        if *editing
          && let Some(input) = edit_ref
            .cast::<HtmlInputElement>()
        {
          let _ = input.focus();
        }
      }
    );
  }

  let label = match &row.label {
    | RowLabel::Display {
      text,
      on_double_click
    } => {
      let ondblclick = bind::<MouseEvent>(
        &props.on_action,
        on_double_click.clone()
      );
      html! {
          <span class="todo-text" {ondblclick}>{ text }</span>
      }
    }
    | RowLabel::Editing { value } => {
      let oninput = {
        let on_action =
          props.on_action.clone();
        Callback::from(
          move |e: InputEvent| {
            let input: HtmlInputElement =
              e.target_unchecked_into();
            on_action.emit(
              Action::EditInput(
                input.value()
              )
            );
          }
        )
      };
      let onblur = bind::<FocusEvent>(
        &props.on_action,
        Some(Action::FinishEdit(
          EditExit::Blur
        ))
      );
      let onkeydown = {
        let on_action =
          props.on_action.clone();
        Callback::from(
          move |e: KeyboardEvent| {
            if e.key() == "Enter" {
              on_action.emit(
                Action::FinishEdit(
                  EditExit::Enter
                )
              );
            }
          }
        )
      };
      html! {
          <input
              ref={edit_ref}
              type="text"
              class="edit-input"
              value={value.clone()}
              {oninput}
              {onblur}
              {onkeydown}
          />
      }
    }
  };

  let on_toggle = bind::<Event>(
    &props.on_action,
    row.toggle.activate()
  );
  let on_edit = bind::<MouseEvent>(
    &props.on_action,
    row.edit.activate()
  );
  let on_delete = bind::<MouseEvent>(
    &props.on_action,
    row.delete.activate()
  );

  html! {
      <li class={row.class}>
          <div class="todo-content">
              <input
                  type="checkbox"
                  checked={row.completed}
                  onchange={on_toggle}
              />
              { label }
          </div>
          <div class="todo-actions">
              <button
                  class="edit-btn"
                  title={row.edit.title}
                  disabled={!row.edit.enabled}
                  onclick={on_edit}
              >
                  <i class="fa-solid fa-pen-to-square"></i>
              </button>
              <button
                  class="delete-btn"
                  title={row.delete.title}
                  onclick={on_delete}
              >
                  <i class="fa-solid fa-trash"></i>
              </button>
          </div>
      </li>
  }
}
