use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for TaskId {
  type Err = std::num::ParseIntError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    s.trim().parse::<u64>().map(Self)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:        TaskId,
  pub text:      String,
  #[serde(default)]
  pub completed: bool
}

impl Task {
  pub fn new(
    id: TaskId,
    text: String
  ) -> Self {
    Self {
      id,
      text,
      completed: false
    }
  }

  /// Copy with `completed` inverted.
  pub fn toggled(&self) -> Self {
    Self {
      completed: !self.completed,
      ..self.clone()
    }
  }

  pub fn with_text(
    &self,
    text: String
  ) -> Self {
    Self {
      text,
      ..self.clone()
    }
  }

  pub fn is_pending(&self) -> bool {
    !self.completed
  }
}
