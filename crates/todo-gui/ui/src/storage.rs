use anyhow::anyhow;
use todo_shared::{
  Confirm,
  Storage
};

/// `window.localStorage`, the durable slot
/// store of the browser build.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| {
      anyhow!("no window available")
    })?
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "localStorage unavailable: \
         {error:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!(
        "localStorage is disabled"
      )
    })
}

impl Storage for LocalStorage {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "failed reading {key} from \
           local storage: {error:?}"
        )
      })
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "failed writing {key} to \
           local storage: {error:?}"
        )
      })
  }
}

/// `window.confirm`; blocks until the user
/// answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
  fn confirm(
    &mut self,
    message: &str
  ) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(message)
          .ok()
      })
      .unwrap_or(false)
  }
}
