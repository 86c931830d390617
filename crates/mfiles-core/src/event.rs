//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which the
//! [`Dispatcher`](crate::Dispatcher) processes one at a time and answers
//! with [`Event`]s. This decoupling allows any frontend to drive the same
//! core logic.

use std::path::PathBuf;

use crate::error::FailedPath;

/// An action the UI requests the core to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor up by one entry, collapsing the selection.
    MoveUp,
    /// Move the cursor down by one entry, collapsing the selection.
    MoveDown,
    /// Grow the selection one entry upward.
    ExtendUp,
    /// Grow the selection one entry downward.
    ExtendDown,
    /// Pin the entry under the cursor so it stays selected.
    Pin,
    /// Show or hide entries carrying the hidden-file prefix.
    ToggleHidden,
    /// Activate the entry under the cursor.
    Enter,
    /// Reset to a single selection, or cancel an open dialog.
    Escape,
    /// Stage the selection for copying.
    StageCopy,
    /// Stage the selection for moving.
    StageCut,
    /// Paste the staged sources into the current directory.
    Paste,
    /// Open the new-file name dialog.
    NewFileDialogOpen,
    /// Create the file named in the dialog.
    DialogConfirm,
    /// Close the dialog without creating anything.
    DialogCancel,
    /// Append a character to the dialog input.
    DialogTextInput(char),
    /// Delete the last character of the dialog input.
    DialogBackspace,
}

impl Command {
    /// `true` for the commands a dialog accepts.
    pub fn is_dialog_command(&self) -> bool {
        matches!(
            self,
            Self::DialogConfirm
                | Self::DialogCancel
                | Self::DialogTextInput(_)
                | Self::DialogBackspace
                | Self::Escape
        )
    }
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to update its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A directory has been read and is now displayed.
    DirectoryLoaded {
        /// The absolute path of the directory.
        path: PathBuf,
        /// Number of entries, parent sentinel included.
        entries: usize,
    },
    /// A file operation completed successfully.
    OperationComplete {
        /// Human-readable description of the operation.
        operation: String,
    },
    /// A file operation failed.
    OperationFailed {
        /// Human-readable description of the operation.
        operation: String,
        /// The error message.
        error: String,
    },
    /// Some paste sources failed; the rest went through.
    PasteFailed {
        /// Each failing source with its reason.
        failed: Vec<FailedPath>,
    },
    /// A text file should be opened in the external editor.
    OpenInEditor(PathBuf),
    /// `Enter` on a file that is neither a directory nor text.
    NotADirectory(PathBuf),
    /// A dialog took focus.
    DialogOpened,
    /// The dialog closed, with or without effect.
    DialogClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_commands() {
        assert!(Command::DialogTextInput('a').is_dialog_command());
        assert!(Command::DialogBackspace.is_dialog_command());
        assert!(Command::Escape.is_dialog_command());
        assert!(!Command::MoveDown.is_dialog_command());
        assert!(!Command::Paste.is_dialog_command());
    }
}
