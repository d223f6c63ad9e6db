use std::path::Path;

use codeforge::error::{CodeforgeError, Result};
use codeforge::hooks::ConfirmOverwrite;
use inquire::InquireError;

/// Asks on the terminal before an existing project is replaced.
pub struct TerminalConfirm {
    /// Answer yes without asking.
    pub assume_yes: bool,
}

impl ConfirmOverwrite for TerminalConfirm {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        inquire::Confirm::new(&format!(
            "Folder '{}' already exists. Overwrite its contents?",
            path.display()
        ))
        .with_default(true)
        .prompt()
        .map_err(prompt_error)
    }
}

/// Esc and Ctrl-C are a user abort; anything else means no answer could be read.
fn prompt_error(err: InquireError) -> CodeforgeError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            CodeforgeError::PromptCancelled
        }
        InquireError::IO(source) => CodeforgeError::Io {
            context: "reading overwrite confirmation".into(),
            source,
        },
        other => CodeforgeError::PromptUnavailable {
            message: other.to_string(),
        },
    }
}
