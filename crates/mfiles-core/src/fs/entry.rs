//! File entry representation.

use std::path::{Path, PathBuf};

/// Display name of the synthetic parent-directory entry.
pub const PARENT_NAME: &str = "..";

/// A single node in the current listing.
///
/// The path and the filesystem-derived fields are fixed at listing time.
/// Only the `selected` and `sticky` flags change afterwards, and only through
/// the selection model, so the rendered selection always mirrors these flags.
///
/// # Examples
///
/// ```no_run
/// use mfiles_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = FileEntry::new("Cargo.toml".into(), &metadata, ".");
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
    is_parent: bool,
    selected: bool,
    sticky: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden files are detected by `hidden_prefix` at the start of the name.
    /// `is_dir` and `is_symlink` come straight from `metadata`; the listing
    /// passes followed metadata and marks links via [`FileEntry::with_symlink`].
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata, hidden_prefix: &str) -> Self {
        let name = path
            .file_name()
            .map(|n| crate::nfc_string(&n.to_string_lossy()))
            .unwrap_or_default();
        let is_hidden = !hidden_prefix.is_empty() && name.starts_with(hidden_prefix);

        Self {
            path,
            name,
            is_dir: metadata.is_dir(),
            is_hidden,
            is_symlink: metadata.is_symlink(),
            is_parent: false,
            selected: false,
            sticky: false,
        }
    }

    /// Creates the `..` sentinel pointing at `parent_dir`.
    pub fn parent(parent_dir: PathBuf) -> Self {
        Self {
            path: parent_dir,
            name: PARENT_NAME.to_string(),
            is_dir: true,
            is_hidden: false,
            is_symlink: false,
            is_parent: true,
            selected: false,
            sticky: false,
        }
    }

    /// Creates an entry without touching the filesystem.
    pub fn from_parts(path: PathBuf, name: String, is_dir: bool, is_hidden: bool) -> Self {
        Self {
            path,
            name,
            is_dir,
            is_hidden,
            is_symlink: false,
            is_parent: false,
            selected: false,
            sticky: false,
        }
    }

    /// Returns the full path of this entry. For the parent sentinel this is
    /// the resolved parent directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this entry is a directory (or the parent sentinel).
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with the hidden-file prefix.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }

    /// Returns `true` for the synthetic `..` entry.
    pub fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// Returns `true` while the entry is part of the active selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns `true` once the entry has been pinned.
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Lowercased extension, if any.
    pub fn extension(&self) -> Option<String> {
        if self.is_dir {
            return None;
        }
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub(crate) fn with_symlink(self, is_symlink: bool) -> Self {
        Self { is_symlink, ..self }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }
}
