//! Command dispatcher and dialog state machine.
//!
//! The [`Dispatcher`] exclusively owns the panel (listing plus selection),
//! the clipboard and the interaction mode. Frontends feed it one
//! [`Command`] at a time and read back a [`View`] and the [`Event`]s the
//! command produced.

use std::path::{Path, PathBuf};

use crate::clipboard::{Clipboard, ClipboardMode};
use crate::config::settings::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::entry::FileEntry;
use crate::fs::listing::Listing;
use crate::fs::ops;
use crate::nav::navigator::{self, EnterOutcome};
use crate::nav::panel::{BrowserPanel, Panel};

/// Which dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    NewFile,
}

/// A modal text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    /// Text typed so far.
    pub input: String,
    /// Why the last confirm failed, shown until the input changes.
    pub error: Option<String>,
}

impl Dialog {
    fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            input: String::new(),
            error: None,
        }
    }
}

/// Interaction mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browsing,
    Dialog(Dialog),
}

impl Mode {
    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<&Dialog> {
        match self {
            Self::Browsing => None,
            Self::Dialog(dialog) => Some(dialog),
        }
    }
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub directory: &'a Path,
    pub entries: &'a [FileEntry],
    pub cursor: usize,
    /// Selected indices, in listing order.
    pub selected: Vec<usize>,
    pub mode: &'a Mode,
    pub clipboard: &'a Clipboard,
    pub hide_hidden: bool,
}

/// Owner of all browsing state.
///
/// Immutable: [`Dispatcher::dispatch`] consumes the dispatcher and returns
/// the next one. After every dispatch the cursor is in bounds and, while
/// browsing a non-empty listing, the cursor entry is selected.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    panel: BrowserPanel,
    clipboard: Clipboard,
    mode: Mode,
    text_extensions: Vec<String>,
    events: Vec<Event>,
}

impl Dispatcher {
    /// Opens `directory` with the listing options and editor extensions
    /// from `config`.
    ///
    /// # Errors
    ///
    /// [`CoreError::DirectoryUnreadable`] if `directory` cannot be resolved
    /// or listed.
    pub fn new(directory: &Path, config: &Config) -> CoreResult<Self> {
        let directory = directory
            .canonicalize()
            .map_err(|e| CoreError::unreadable(directory, e))?;
        let listing = Listing::read(&directory, config.listing_options())?;
        let loaded = loaded_event(&listing);

        Ok(Self {
            panel: BrowserPanel::new(listing),
            clipboard: Clipboard::new(),
            mode: Mode::Browsing,
            text_extensions: config.editor.text_extensions.clone(),
            events: vec![loaded],
        })
    }

    /// Applies one command and returns the resulting state.
    ///
    /// Commands that do not apply in the current mode are ignored.
    pub fn dispatch(mut self, command: Command) -> Self {
        self.events.clear();
        tracing::debug!("dispatch {command:?}");
        match std::mem::take(&mut self.mode) {
            Mode::Browsing => self.browse(command),
            Mode::Dialog(dialog) => self.in_dialog(dialog, command),
        }
    }

    /// Events produced by the most recent [`dispatch`](Self::dispatch)
    /// (or by construction).
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn panel(&self) -> &BrowserPanel {
        &self.panel
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn directory(&self) -> &Path {
        self.panel.current_dir()
    }

    pub fn view(&self) -> View<'_> {
        View {
            directory: self.panel.current_dir(),
            entries: self.panel.entries(),
            cursor: self.panel.cursor(),
            selected: self.panel.selected_indices(),
            mode: &self.mode,
            clipboard: &self.clipboard,
            hide_hidden: self.panel.listing().options().hide_hidden,
        }
    }

    fn browse(mut self, command: Command) -> Self {
        match command {
            Command::MoveUp => self.panel = self.panel.move_by(-1),
            Command::MoveDown => self.panel = self.panel.move_by(1),
            Command::ExtendUp => self.panel = self.panel.extend_by(-1),
            Command::ExtendDown => self.panel = self.panel.extend_by(1),
            Command::Pin => self.panel = self.panel.pin(),
            Command::Escape => self.panel = self.panel.reset(),
            Command::ToggleHidden => return self.toggle_hidden(),
            Command::Enter => return self.enter(),
            Command::StageCopy => self.stage(ClipboardMode::Copy),
            Command::StageCut => self.stage(ClipboardMode::Cut),
            Command::Paste => return self.paste(),
            Command::NewFileDialogOpen => {
                self.panel = self.panel.clear_selection(false);
                self.mode = Mode::Dialog(Dialog::new(DialogKind::NewFile));
                self.events.push(Event::DialogOpened);
            }
            Command::DialogConfirm
            | Command::DialogCancel
            | Command::DialogTextInput(_)
            | Command::DialogBackspace => {}
        }
        self
    }

    fn in_dialog(mut self, mut dialog: Dialog, command: Command) -> Self {
        if !command.is_dialog_command() {
            tracing::debug!("ignored {command:?} while a dialog is open");
            self.mode = Mode::Dialog(dialog);
            return self;
        }
        match command {
            Command::DialogTextInput(c) => {
                dialog.input.push(c);
                dialog.error = None;
            }
            Command::DialogBackspace => {
                dialog.input.pop();
                dialog.error = None;
            }
            Command::DialogCancel | Command::Escape => {
                self.panel = self.panel.reset();
                self.events.push(Event::DialogClosed);
                return self;
            }
            Command::DialogConfirm => return self.confirm(dialog),
            _ => {}
        }
        self.mode = Mode::Dialog(dialog);
        self
    }

    fn confirm(mut self, mut dialog: Dialog) -> Self {
        match dialog.kind {
            DialogKind::NewFile => match ops::create_file(self.panel.current_dir(), &dialog.input) {
                Ok(path) => {
                    tracing::info!("created {}", path.display());
                    self = self.refresh("new file");
                    self.panel = self.panel.select_path(&path);
                    self.events.push(Event::OperationComplete {
                        operation: format!("created {}", dialog.input),
                    });
                    self.events.push(Event::DialogClosed);
                }
                Err(e) => {
                    tracing::debug!("new file {:?} rejected: {e}", dialog.input);
                    self.events.push(Event::OperationFailed {
                        operation: "new file".to_string(),
                        error: e.to_string(),
                    });
                    dialog.error = Some(e.to_string());
                    self.mode = Mode::Dialog(dialog);
                }
            },
        }
        self
    }

    fn toggle_hidden(mut self) -> Self {
        let hide = !self.panel.listing().options().hide_hidden;
        match self.panel.listing().with_hide_hidden(hide) {
            Ok(listing) => {
                self.events.push(loaded_event(&listing));
                self.panel = self.panel.clear_selection(true).with_listing(listing);
            }
            Err(e) => self.fail("toggle hidden", e),
        }
        self
    }

    fn enter(mut self) -> Self {
        let Some(entry) = self.panel.cursor_entry().cloned() else {
            return self;
        };
        match navigator::enter(self.panel.listing(), &entry, &self.text_extensions) {
            Ok(EnterOutcome::Entered(listing)) => {
                self.events.push(loaded_event(&listing));
                self.panel = self.panel.with_listing(listing);
            }
            Ok(EnterOutcome::OpenInEditor(path)) => self.events.push(Event::OpenInEditor(path)),
            Ok(EnterOutcome::NotADirectory(path)) => self.events.push(Event::NotADirectory(path)),
            Err(e) => self.fail("open", e),
        }
        self
    }

    fn stage(&mut self, mode: ClipboardMode) {
        self.clipboard.stage(mode, self.panel.selected_entries());
        let operation = match self.clipboard.mode() {
            Some(mode) => format!("{} item(s) staged for {mode}", self.clipboard.sources().len()),
            None => "clipboard cleared".to_string(),
        };
        self.events.push(Event::OperationComplete { operation });
    }

    fn paste(mut self) -> Self {
        if self.clipboard.is_empty() {
            return self;
        }
        let destination: PathBuf = self.panel.current_dir().to_path_buf();
        let result = self.clipboard.commit(&destination);
        self = self.refresh("paste");
        match result {
            Ok(report) => self.events.push(Event::OperationComplete {
                operation: format!("pasted {} item(s)", report.pasted.len()),
            }),
            Err(CoreError::OperationPartialFailure { failed, .. }) => {
                self.events.push(Event::PasteFailed { failed });
            }
            Err(e) => self.fail("paste", e),
        }
        self
    }

    /// Re-reads the current directory, keeping flags of surviving entries.
    /// On failure the old listing stays and the selection is repaired.
    fn refresh(mut self, operation: &str) -> Self {
        match self.panel.listing().refresh() {
            Ok(listing) => self.panel = self.panel.with_refreshed(listing),
            Err(e) => {
                let cursor_path = self.panel.cursor_entry().map(|entry| entry.path().to_path_buf());
                if let Some(path) = cursor_path {
                    self.panel = self.panel.select_path(&path);
                }
                self.fail(operation, e);
            }
        }
        self
    }

    fn fail(&mut self, operation: &str, error: CoreError) {
        tracing::warn!("{operation} failed: {error}");
        self.events.push(Event::OperationFailed {
            operation: operation.to_string(),
            error: error.to_string(),
        });
    }
}

fn loaded_event(listing: &Listing) -> Event {
    Event::DirectoryLoaded {
        path: listing.directory().to_path_buf(),
        entries: listing.len(),
    }
}
