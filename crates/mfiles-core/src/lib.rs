//! mFiles core library: UI-agnostic directory browser logic.
//!
//! `mfiles-core` owns the whole browsing state machine: the listing of one
//! directory, the cursor and multi-selection, the copy/cut clipboard and the
//! new-file dialog. Frontends send [`Command`]s to a [`Dispatcher`] and
//! render the [`View`] it exposes; they never mutate state directly.
//!
//! # Modules
//!
//! - [`fs`]: [`FileEntry`], directory [`Listing`], copy/move/create operations.
//! - [`nav`]: selection model, browsing panel, directory navigation.
//! - [`clipboard`]: staged copy/cut buffer and paste.
//! - [`dispatch`]: the command dispatcher and dialog state machine.
//! - [`action`]: bindable actions and their metadata.
//! - [`config`]: TOML settings, keymap and theme.
//! - [`event`]: command and event types for UI ↔ Core communication.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;

pub use clipboard::{Clipboard, ClipboardMode, PasteReport};
pub use dispatch::{Dialog, DialogKind, Dispatcher, Mode, View};
pub use error::{CoreError, CoreResult, FailedPath};
pub use event::{Command, Event};
pub use fs::entry::FileEntry;
pub use fs::ops::{copy_entry, create_file, is_valid_filename, move_entry};
pub use fs::{Listing, ListingOptions};
pub use nav::navigator::EnterOutcome;
pub use nav::panel::{BrowserPanel, Panel};
pub use nav::selection::Selection;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use config::keymap::Keymap;
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which causes Korean Hangul
/// characters to appear as individual Jamo. This helper re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
