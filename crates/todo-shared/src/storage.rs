use std::collections::HashMap;

/// Slot under which the whole collection
/// is stored.
pub const TODOS_KEY: &str = "todos";

/// Synchronous key-value store holding
/// serialized records. Last write wins.
pub trait Storage {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  slots: HashMap<String, String>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_slot(
    key: &str,
    value: &str
  ) -> Self {
    let mut storage = Self::new();
    storage
      .slots
      .insert(key.to_string(), value.to_string());
    storage
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .slots
      .get(key)
      .map(String::as_str)
  }
}

impl Storage for MemoryStorage {
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.slots.get(key).cloned())
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .slots
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}

impl<S: Storage + ?Sized> Storage
  for &mut S
{
  fn read(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    (**self).read(key)
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    (**self).write(key, value)
  }
}
