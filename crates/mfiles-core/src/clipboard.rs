//! Staged copy/cut buffer.
//!
//! Staging snapshots paths; nothing touches the filesystem until
//! [`Clipboard::commit`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult, FailedPath};
use crate::fs::entry::FileEntry;
use crate::fs::ops;

/// What a paste does with the staged sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

impl fmt::Display for ClipboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Cut => write!(f, "cut"),
        }
    }
}

/// Result of a paste in which every source succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteReport {
    /// Mode the batch ran in, `None` when nothing was staged.
    pub mode: Option<ClipboardMode>,
    /// Destination paths written, in staging order.
    pub pasted: Vec<PathBuf>,
}

impl PasteReport {
    fn empty() -> Self {
        Self {
            mode: None,
            pasted: Vec::new(),
        }
    }
}

/// The copy/cut buffer.
///
/// `mode` is `None` exactly when `sources` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    mode: Option<ClipboardMode>,
    sources: Vec<PathBuf>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        self.mode
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Replaces the staged sources with the paths of `entries`.
    ///
    /// The parent sentinel is never staged. If nothing is left, the clipboard
    /// is cleared. The last stage always wins, whatever its mode.
    pub fn stage<'a>(&mut self, mode: ClipboardMode, entries: impl IntoIterator<Item = &'a FileEntry>) {
        self.sources = entries
            .into_iter()
            .filter(|e| !e.is_parent())
            .map(|e| e.path().to_path_buf())
            .collect();
        self.mode = if self.sources.is_empty() {
            None
        } else {
            Some(mode)
        };
        tracing::debug!("staged {} source(s) for {:?}", self.sources.len(), self.mode);
    }

    pub fn clear(&mut self) {
        self.mode = None;
        self.sources.clear();
    }

    /// Pastes every staged source into `destination`.
    ///
    /// Each source lands at `destination/<file name>`. Every source is
    /// attempted even after a failure. A copy keeps the sources staged. A cut
    /// clears the clipboard once every source has moved; otherwise it stays in
    /// cut mode holding only the sources that did not move, so pasting again
    /// retries exactly those.
    ///
    /// # Errors
    ///
    /// [`CoreError::OperationPartialFailure`] listing each source that could
    /// not be pasted (name collision, permission, vanished source, directory
    /// into itself).
    pub fn commit(&mut self, destination: &Path) -> CoreResult<PasteReport> {
        let Some(mode) = self.mode else {
            return Ok(PasteReport::empty());
        };

        let mut pasted = Vec::with_capacity(self.sources.len());
        let mut failed = Vec::new();
        for src in &self.sources {
            match paste_one(mode, src, destination) {
                Ok(dest) => pasted.push(dest),
                Err(e) => {
                    tracing::warn!("{mode} of {} failed: {e}", src.display());
                    failed.push(FailedPath {
                        path: src.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !failed.is_empty() {
            let attempted = self.sources.len();
            if mode == ClipboardMode::Cut {
                self.sources = failed.iter().map(|f| f.path.clone()).collect();
            }
            return Err(CoreError::OperationPartialFailure { attempted, failed });
        }

        tracing::info!(
            "{mode}: pasted {} item(s) into {}",
            pasted.len(),
            destination.display()
        );
        if mode == ClipboardMode::Cut {
            self.clear();
        }
        Ok(PasteReport {
            mode: Some(mode),
            pasted,
        })
    }
}

fn paste_one(mode: ClipboardMode, src: &Path, destination: &Path) -> CoreResult<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| CoreError::NameInvalid(src.display().to_string()))?;
    let dest = destination.join(name);
    match mode {
        ClipboardMode::Copy => ops::copy_entry(src, &dest)?,
        ClipboardMode::Cut => ops::move_entry(src, &dest)?,
    }
    Ok(dest)
}
