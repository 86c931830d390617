//! Panel abstraction for file browsing.
//!
//! The [`Panel`] trait is the read-only face a renderer sees.
//! [`BrowserPanel`] pairs the current [`Listing`] with its [`Selection`] and
//! exposes every cursor and selection transition.

use std::path::{Path, PathBuf};

use crate::fs::entry::FileEntry;
use crate::fs::listing::Listing;
use crate::nav::selection::{self, Selection};

/// Read access to a file panel.
pub trait Panel {
    /// Returns the directory currently being displayed.
    fn current_dir(&self) -> &Path;
    /// Returns the entries in listing order.
    fn entries(&self) -> &[FileEntry];
    /// Returns the cursor index.
    fn cursor(&self) -> usize;
    /// Returns the entry under the cursor, if any.
    fn cursor_entry(&self) -> Option<&FileEntry>;
}

/// The single directory view.
///
/// Immutable: all state transitions consume the panel and return a new one.
/// The cursor stays within bounds after every transition.
#[derive(Debug, Clone)]
pub struct BrowserPanel {
    listing: Listing,
    selection: Selection,
}

impl BrowserPanel {
    /// Creates a panel over `listing` with the cursor on entry `0`, selected.
    pub fn new(mut listing: Listing) -> Self {
        let mut selection = Selection::new();
        selection.reset(listing.entries_mut());
        Self { listing, selection }
    }

    /// Returns the underlying listing.
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn move_by(mut self, delta: isize) -> Self {
        self.selection.move_by(self.listing.entries_mut(), delta);
        self
    }

    pub fn extend_by(mut self, delta: isize) -> Self {
        self.selection.extend_by(self.listing.entries_mut(), delta);
        self
    }

    pub fn pin(mut self) -> Self {
        self.selection.pin_current(self.listing.entries_mut());
        self
    }

    pub fn reset(mut self) -> Self {
        self.selection.reset(self.listing.entries_mut());
        self
    }

    /// Drops the whole selection without touching the cursor.
    pub fn clear_selection(mut self, include_sticky: bool) -> Self {
        self.selection
            .clear(self.listing.entries_mut(), include_sticky);
        self
    }

    /// Replaces the listing with one for a different view (directory change
    /// or filter change). Selection starts over at entry `0`.
    pub fn with_listing(self, listing: Listing) -> Self {
        Self::new(listing)
    }

    /// Replaces the listing with a refresh of the same directory. Carried
    /// flags are kept and the cursor is clamped into the new bounds.
    pub fn with_refreshed(mut self, mut listing: Listing) -> Self {
        self.selection.sync(listing.entries_mut());
        self.listing = listing;
        self
    }

    /// Moves the cursor onto `path` and selects it alone (pins stay). A path
    /// that is not listed leaves the cursor where it is.
    pub fn select_path(mut self, path: &Path) -> Self {
        let index = self
            .listing
            .position_of(path)
            .unwrap_or(self.selection.cursor());
        self.selection
            .select_only(self.listing.entries_mut(), index);
        self
    }

    /// Currently selected entries, in listing order.
    pub fn selected_entries(&self) -> Vec<&FileEntry> {
        self.listing
            .entries()
            .iter()
            .filter(|e| e.is_selected())
            .collect()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        selection::selected_indices(self.listing.entries())
    }

    pub fn selected_paths(&self) -> Vec<PathBuf> {
        selection::selected_paths(self.listing.entries())
    }
}

impl Panel for BrowserPanel {
    fn current_dir(&self) -> &Path {
        self.listing.directory()
    }

    fn entries(&self) -> &[FileEntry] {
        self.listing.entries()
    }

    fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    fn cursor_entry(&self) -> Option<&FileEntry> {
        self.listing.entries().get(self.selection.cursor())
    }
}
