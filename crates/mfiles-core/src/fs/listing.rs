//! Ordered entry sequence for one directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;
use crate::nav::navigator::parent_of;

/// How a directory is turned into a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOptions {
    /// Omit entries whose name starts with `hidden_prefix`.
    pub hide_hidden: bool,
    /// Marker that makes a name hidden. An empty prefix hides nothing.
    pub hidden_prefix: String,
    /// Sort entries by name after enumeration. When off, the filesystem's
    /// own enumeration order is kept.
    pub sort_by_name: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            hide_hidden: false,
            hidden_prefix: ".".to_string(),
            sort_by_name: true,
        }
    }
}

/// The entries of one directory, parent sentinel first.
///
/// Immutable apart from the per-entry selection flags: re-reading the
/// filesystem always produces a new `Listing`.
#[derive(Debug, Clone)]
pub struct Listing {
    directory: PathBuf,
    entries: Vec<FileEntry>,
    options: ListingOptions,
}

impl Listing {
    /// Reads `directory` and builds its listing.
    ///
    /// The parent sentinel comes first unless `directory` is the filesystem
    /// root. Entries whose metadata cannot be read are skipped.
    ///
    /// # Errors
    ///
    /// [`CoreError::DirectoryUnreadable`] if the directory is missing, is not
    /// a directory, or cannot be enumerated.
    pub fn read(directory: &Path, options: ListingOptions) -> CoreResult<Self> {
        let entries = read_entries(directory, &options)?;
        tracing::debug!(
            "listed {} ({} entries, hide_hidden={})",
            directory.display(),
            entries.len(),
            options.hide_hidden
        );
        Ok(Self {
            directory: directory.to_path_buf(),
            entries,
            options,
        })
    }

    /// Creates a listing from prepared entries without touching the filesystem.
    pub fn from_entries(directory: PathBuf, entries: Vec<FileEntry>, options: ListingOptions) -> Self {
        Self {
            directory,
            entries,
            options,
        }
    }

    /// Re-reads the same directory with the same options.
    ///
    /// Entries that survive the refresh keep their `selected` and `sticky`
    /// flags; identity is the entry path. With an unchanged filesystem the
    /// result is identical to `self`.
    pub fn refresh(&self) -> CoreResult<Self> {
        let mut fresh = Self::read(&self.directory, self.options.clone())?;
        let previous: HashMap<(&Path, bool), (bool, bool)> = self
            .entries
            .iter()
            .map(|e| ((e.path(), e.is_parent()), (e.is_selected(), e.is_sticky())))
            .collect();

        for entry in &mut fresh.entries {
            let flags = previous.get(&(entry.path(), entry.is_parent())).copied();
            if let Some((selected, sticky)) = flags {
                entry.set_selected(selected);
                entry.set_sticky(sticky);
            }
        }
        Ok(fresh)
    }

    /// Re-reads the directory with the hidden filter set to `hide_hidden`.
    /// All selection state is dropped.
    pub fn with_hide_hidden(&self, hide_hidden: bool) -> CoreResult<Self> {
        let options = ListingOptions {
            hide_hidden,
            ..self.options.clone()
        };
        Self::read(&self.directory, options)
    }

    /// Returns the directory this listing shows.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [FileEntry] {
        &mut self.entries
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry at `path`, ignoring the parent sentinel.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| !e.is_parent() && e.path() == path)
    }
}

fn read_entries(directory: &Path, options: &ListingOptions) -> CoreResult<Vec<FileEntry>> {
    let read_dir = std::fs::read_dir(directory).map_err(|e| {
        let reason = match e.kind() {
            std::io::ErrorKind::NotFound => "no such directory".to_string(),
            std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            _ if directory.is_file() => "not a directory".to_string(),
            _ => e.to_string(),
        };
        CoreError::unreadable(directory, reason)
    })?;

    let mut children = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("skipping unreadable entry in {}: {e}", directory.display());
                continue;
            }
        };
        let path = dir_entry.path();
        // DirEntry::metadata does not follow symlinks
        let link_meta = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        let is_symlink = link_meta.file_type().is_symlink();
        let metadata = if is_symlink {
            std::fs::metadata(&path).unwrap_or(link_meta)
        } else {
            link_meta
        };

        let entry = FileEntry::new(path, &metadata, &options.hidden_prefix).with_symlink(is_symlink);
        if options.hide_hidden && entry.is_hidden() {
            continue;
        }
        children.push(entry);
    }

    if options.sort_by_name {
        children.sort_by(|a, b| a.name().cmp(b.name()));
    }

    let mut entries = Vec::with_capacity(children.len() + 1);
    if let Some(parent) = parent_of(directory) {
        entries.push(FileEntry::parent(parent));
    }
    entries.extend(children);
    Ok(entries)
}
