//! Bindable actions.
//!
//! Every key a user can press resolves to an [`Action`]. Most actions map
//! one-to-one onto a dispatcher [`Command`]; the rest (quit, help) belong to
//! the frontend. [`ActionRegistry`] provides the metadata used by the help
//! screen and the ids used in `keymap.toml`.

use crate::event::Command;

/// Every user-triggerable action in mFiles.
///
/// Variants carry no parameters. Dialog text entry is not an action: the
/// frontend forwards typed characters directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    Enter,
    // Selection
    ExtendUp,
    ExtendDown,
    Pin,
    Escape,
    // Clipboard and files
    StageCopy,
    StageCut,
    Paste,
    NewFile,
    // View
    ToggleHidden,
    // System
    Help,
    Quit,
}

impl Action {
    /// The dispatcher command this action sends, or `None` for actions the
    /// frontend handles itself.
    pub fn command(self) -> Option<Command> {
        let command = match self {
            Self::MoveUp => Command::MoveUp,
            Self::MoveDown => Command::MoveDown,
            Self::Enter => Command::Enter,
            Self::ExtendUp => Command::ExtendUp,
            Self::ExtendDown => Command::ExtendDown,
            Self::Pin => Command::Pin,
            Self::Escape => Command::Escape,
            Self::StageCopy => Command::StageCopy,
            Self::StageCut => Command::StageCut,
            Self::Paste => Command::Paste,
            Self::NewFile => Command::NewFileDialogOpen,
            Self::ToggleHidden => Command::ToggleHidden,
            Self::Help | Self::Quit => return None,
        };
        Some(command)
    }
}

/// Broad category for grouping actions on the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Selection,
    FileOps,
    View,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Selection => "Selection",
            Self::FileOps => "File",
            Self::View => "View",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"move_up"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Move Up"`).
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        use Action as A;
        use ActionCategory as C;

        let table: [(Action, &'static str, &'static str, &'static str, ActionCategory); 14] = [
            (A::MoveUp, "move_up", "Move Up", "Move cursor up, keeping only pinned entries", C::Navigation),
            (A::MoveDown, "move_down", "Move Down", "Move cursor down, keeping only pinned entries", C::Navigation),
            (A::Enter, "enter", "Enter", "Open directory or edit text file", C::Navigation),
            (A::ExtendUp, "extend_up", "Extend Up", "Grow the selection upward", C::Selection),
            (A::ExtendDown, "extend_down", "Extend Down", "Grow the selection downward", C::Selection),
            (A::Pin, "pin", "Pin", "Keep the current entry selected", C::Selection),
            (A::Escape, "escape", "Reset Selection", "Drop pins and select only the cursor entry", C::Selection),
            (A::StageCopy, "stage_copy", "Copy", "Stage selection for copying", C::FileOps),
            (A::StageCut, "stage_cut", "Cut", "Stage selection for moving", C::FileOps),
            (A::Paste, "paste", "Paste", "Paste staged entries here", C::FileOps),
            (A::NewFile, "new_file", "New File", "Create an empty file", C::FileOps),
            (A::ToggleHidden, "toggle_hidden", "Toggle Hidden", "Show or hide hidden files", C::View),
            (A::Help, "help", "Help", "Show key bindings", C::System),
            (A::Quit, "quit", "Quit", "Exit mFiles", C::System),
        ];

        let descriptors = table
            .into_iter()
            .map(|(action, id, name, description, category)| ActionDescriptor {
                action,
                id,
                name,
                description,
                category,
            })
            .collect();
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
