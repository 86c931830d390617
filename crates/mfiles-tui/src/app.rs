use std::path::{Path, PathBuf};

use mfiles_core::action::ActionRegistry;
use mfiles_core::config::keymap::Keymap;
use mfiles_core::config::settings::{Config, EditorConfig};
use mfiles_core::config::theme::Theme;
use mfiles_core::dispatch::{Dispatcher, Mode, View};
use mfiles_core::event::{Command, Event};

/// Application mode, which determines how input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// The core's new-file dialog owns the keyboard.
    Dialog,
    Help,
}

/// One line of feedback in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Frontend state around the core dispatcher.
///
/// Immutable: all transitions consume the app and return a new one.
#[derive(Debug)]
pub struct App {
    dispatcher: Dispatcher,
    keymap: Keymap,
    action_registry: ActionRegistry,
    theme: Theme,
    editor: EditorConfig,
    /// Cap on the browser box, in cells.
    window_size: Option<(u16, u16)>,
    status: Option<StatusMessage>,
    show_help: bool,
    should_quit: bool,
    /// File the main loop should open in the editor before the next frame.
    pending_editor: Option<PathBuf>,
}

/// Returns the path to the config directory.
pub fn config_dir() -> PathBuf {
    // Check for project-local config directory first, then fall back
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("mfiles")
}

impl App {
    /// Creates a new App browsing `start_dir`.
    pub fn new(
        start_dir: &Path,
        config: &Config,
        keymap: Keymap,
        theme: Theme,
    ) -> anyhow::Result<Self> {
        let dispatcher = Dispatcher::new(start_dir, config)?;
        Ok(Self {
            dispatcher,
            keymap,
            action_registry: ActionRegistry::new(),
            theme,
            editor: config.editor.clone(),
            window_size: config.ui.window_size(),
            status: None,
            show_help: false,
            should_quit: false,
            pending_editor: None,
        })
    }

    pub fn mode(&self) -> AppMode {
        match self.dispatcher.mode() {
            Mode::Dialog(_) => AppMode::Dialog,
            Mode::Browsing if self.show_help => AppMode::Help,
            Mode::Browsing => AppMode::Normal,
        }
    }

    pub fn view(&self) -> View<'_> {
        self.dispatcher.view()
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.action_registry
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    pub fn window_size(&self) -> Option<(u16, u16)> {
        self.window_size
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    pub fn with_help(self, show_help: bool) -> Self {
        Self { show_help, ..self }
    }

    pub fn with_status(self, text: impl Into<String>) -> Self {
        Self {
            status: Some(StatusMessage::info(text)),
            ..self
        }
    }

    pub fn with_error(self, text: impl Into<String>) -> Self {
        Self {
            status: Some(StatusMessage::error(text)),
            ..self
        }
    }

    /// Sends `command` to the dispatcher and folds the resulting events into
    /// the status line and editor request.
    pub fn handle_command(self, command: Command) -> Self {
        let dispatcher = self.dispatcher.dispatch(command);
        let events = dispatcher.events().to_vec();
        let app = Self {
            dispatcher,
            status: None,
            ..self
        };
        events.into_iter().fold(app, Self::apply_event)
    }

    /// Hands over a pending editor request, if any.
    pub fn take_editor_request(self) -> (Self, Option<PathBuf>) {
        let path = self.pending_editor.clone();
        (
            Self {
                pending_editor: None,
                ..self
            },
            path,
        )
    }

    fn apply_event(self, event: Event) -> Self {
        match event {
            Event::DirectoryLoaded { .. } | Event::DialogOpened | Event::DialogClosed => self,
            Event::OperationComplete { operation } => self.with_status(operation),
            Event::OperationFailed { operation, error } => {
                self.with_error(format!("{operation}: {error}"))
            }
            Event::PasteFailed { failed } => {
                let names: Vec<String> = failed.iter().map(|f| f.to_string()).collect();
                self.with_error(format!("paste: {} failed: {}", failed.len(), names.join(", ")))
            }
            Event::OpenInEditor(path) => Self {
                pending_editor: Some(path),
                ..self
            },
            Event::NotADirectory(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.with_status(format!("{name}: not a directory"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_app(tmp: &TempDir) -> App {
        App::new(tmp.path(), &Config::default(), Keymap::default(), Theme::default()).unwrap()
    }

    #[test]
    fn new_app_starts_normal() {
        let tmp = TempDir::new().unwrap();
        let app = make_app(&tmp);

        assert_eq!(app.mode(), AppMode::Normal);
        assert!(!app.should_quit());
        assert!(app.status().is_none());
        assert_eq!(app.window_size(), Some((400, 400)));
    }

    #[test]
    fn new_app_on_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let result = App::new(
            &tmp.path().join("missing"),
            &Config::default(),
            Keymap::default(),
            Theme::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn dialog_mode_follows_dispatcher() {
        let tmp = TempDir::new().unwrap();
        let app = make_app(&tmp).handle_command(Command::NewFileDialogOpen);
        assert_eq!(app.mode(), AppMode::Dialog);

        let app = app.handle_command(Command::DialogCancel);
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn help_overlay_only_while_browsing() {
        let tmp = TempDir::new().unwrap();
        let app = make_app(&tmp).with_help(true);
        assert_eq!(app.mode(), AppMode::Help);

        let app = app.with_help(false);
        assert_eq!(app.mode(), AppMode::Normal);
    }

    #[test]
    fn text_file_enter_requests_editor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        let app = make_app(&tmp)
            .handle_command(Command::MoveDown)
            .handle_command(Command::Enter);

        let (app, request) = app.take_editor_request();
        assert_eq!(request.unwrap().file_name().unwrap(), "notes.txt");

        let (_, request) = app.take_editor_request();
        assert!(request.is_none());
    }

    #[test]
    fn failed_confirm_sets_error_status() {
        let tmp = TempDir::new().unwrap();
        let app = make_app(&tmp)
            .handle_command(Command::NewFileDialogOpen)
            .handle_command(Command::DialogConfirm);

        let status = app.status().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("new file:"));
    }

    #[test]
    fn status_clears_on_next_command() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let app = make_app(&tmp)
            .handle_command(Command::MoveDown)
            .handle_command(Command::StageCopy);
        assert!(app.status().is_some());

        let app = app.handle_command(Command::MoveUp);
        assert!(app.status().is_none());
    }

    #[test]
    fn paste_collision_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "").unwrap();
        let app = make_app(&tmp)
            .handle_command(Command::MoveDown)
            .handle_command(Command::StageCopy)
            .handle_command(Command::Paste);

        let status = app.status().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("paste: 1 failed"));
    }

    #[test]
    fn plain_file_enter_reports_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.png"), "").unwrap();
        let app = make_app(&tmp)
            .handle_command(Command::MoveDown)
            .handle_command(Command::Enter);

        assert_eq!(app.status().unwrap().text, "photo.png: not a directory");
    }
}
