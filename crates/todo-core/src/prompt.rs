use dialoguer::theme::ColorfulTheme;
use todo_shared::Confirm;
use tracing::{debug, warn};

/// Yes/no prompt on the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm {
    enabled: bool,
}

impl TerminalConfirm {
    /// With `enabled == false` every prompt is answered yes without asking.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        if !self.enabled {
            debug!("confirmation disabled; proceeding");
            return true;
        }

        match dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "confirmation prompt unavailable; treating as declined");
                false
            }
        }
    }
}
