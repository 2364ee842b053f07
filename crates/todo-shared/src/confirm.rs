/// Blocking yes/no prompt asked before
/// destructive bulk operations.
pub trait Confirm {
  fn confirm(
    &mut self,
    message: &str
  ) -> bool;
}

/// Answers every prompt the same way.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysConfirm(pub bool);

impl Confirm for AlwaysConfirm {
  fn confirm(
    &mut self,
    _message: &str
  ) -> bool {
    self.0
  }
}

impl<F> Confirm for F
where
  F: FnMut(&str) -> bool
{
  fn confirm(
    &mut self,
    message: &str
  ) -> bool {
    self(message)
  }
}
