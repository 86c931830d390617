//! Directory changes.
//!
//! Entering never mutates the current listing: a successful directory change
//! hands back a fresh [`Listing`] and the caller swaps it in.

use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::fs::entry::FileEntry;
use crate::fs::listing::Listing;

/// What activating an entry resolved to.
#[derive(Debug, Clone)]
pub enum EnterOutcome {
    /// The entry was a directory and has been read.
    Entered(Listing),
    /// A text file the frontend should hand to the editor.
    OpenInEditor(PathBuf),
    /// A plain file that is neither a directory nor editable text.
    NotADirectory(PathBuf),
}

/// Activates `entry` from `current`.
///
/// Directories (the parent sentinel included) are read with the current
/// listing options. Files whose lowercase extension is in `text_extensions`
/// resolve to [`EnterOutcome::OpenInEditor`].
///
/// # Errors
///
/// [`CoreError::DirectoryUnreadable`](crate::CoreError::DirectoryUnreadable)
/// when the target directory is gone or inaccessible.
pub fn enter(
    current: &Listing,
    entry: &FileEntry,
    text_extensions: &[String],
) -> CoreResult<EnterOutcome> {
    if entry.is_dir() {
        let listing = Listing::read(entry.path(), current.options().clone())?;
        tracing::debug!(
            "entered {} from {}",
            listing.directory().display(),
            current.directory().display()
        );
        return Ok(EnterOutcome::Entered(listing));
    }

    let path = entry.path().to_path_buf();
    match entry.extension() {
        Some(ext) if is_text_extension(&ext, text_extensions) => Ok(EnterOutcome::OpenInEditor(path)),
        _ => Ok(EnterOutcome::NotADirectory(path)),
    }
}

/// Parent of `directory`, or `None` at the filesystem root.
pub fn parent_of(directory: &Path) -> Option<PathBuf> {
    directory.parent().map(Path::to_path_buf)
}

fn is_text_extension(ext: &str, text_extensions: &[String]) -> bool {
    text_extensions
        .iter()
        .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::fs::listing::ListingOptions;
    use std::fs;
    use tempfile::TempDir;

    fn text_exts() -> Vec<String> {
        ["txt", "csv", "json", "py"].iter().map(|s| s.to_string()).collect()
    }

    fn listing_of(path: &Path) -> Listing {
        Listing::read(path, ListingOptions::default()).unwrap()
    }

    fn entry_named<'a>(listing: &'a Listing, name: &str) -> &'a FileEntry {
        listing.entries().iter().find(|e| e.name() == name).unwrap()
    }

    #[test]
    fn enter_directory_reads_it() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/inner.txt"), "").unwrap();
        let listing = listing_of(tmp.path());

        let outcome = enter(&listing, entry_named(&listing, "sub"), &text_exts()).unwrap();

        match outcome {
            EnterOutcome::Entered(next) => {
                assert_eq!(next.directory(), tmp.path().join("sub"));
                assert!(next.entries().iter().any(|e| e.name() == "inner.txt"));
            }
            other => panic!("expected Entered, got {other:?}"),
        }
    }

    #[test]
    fn enter_parent_sentinel_goes_up() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let listing = listing_of(&tmp.path().join("sub"));

        let outcome = enter(&listing, &listing.entries()[0], &text_exts()).unwrap();

        match outcome {
            EnterOutcome::Entered(next) => assert_eq!(next.directory(), tmp.path()),
            other => panic!("expected Entered, got {other:?}"),
        }
    }

    #[test]
    fn enter_keeps_hidden_filter() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/.secret"), "").unwrap();
        let options = ListingOptions {
            hide_hidden: true,
            ..ListingOptions::default()
        };
        let listing = Listing::read(tmp.path(), options).unwrap();

        let outcome = enter(&listing, entry_named(&listing, "sub"), &text_exts()).unwrap();

        let EnterOutcome::Entered(next) = outcome else {
            panic!("expected Entered");
        };
        assert!(next.entries().iter().all(|e| e.name() != ".secret"));
    }

    #[test]
    fn enter_text_file_requests_editor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.TXT"), "").unwrap();
        let listing = listing_of(tmp.path());

        let outcome = enter(&listing, entry_named(&listing, "notes.TXT"), &text_exts()).unwrap();

        assert!(matches!(outcome, EnterOutcome::OpenInEditor(p) if p == tmp.path().join("notes.TXT")));
    }

    #[test]
    fn enter_other_file_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.png"), "").unwrap();
        fs::write(tmp.path().join("Makefile"), "").unwrap();
        let listing = listing_of(tmp.path());

        for name in ["photo.png", "Makefile"] {
            let outcome = enter(&listing, entry_named(&listing, name), &text_exts()).unwrap();
            assert!(matches!(outcome, EnterOutcome::NotADirectory(_)));
        }
    }

    #[test]
    fn enter_vanished_directory_fails() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("gone")).unwrap();
        let listing = listing_of(tmp.path());
        fs::remove_dir(tmp.path().join("gone")).unwrap();

        let err = enter(&listing, entry_named(&listing, "gone"), &text_exts()).unwrap_err();

        assert!(matches!(err, CoreError::DirectoryUnreadable { .. }));
    }

    #[test]
    fn dotted_extensions_in_config_match() {
        assert!(is_text_extension("md", &[".md".to_string()]));
        assert!(!is_text_extension("rs", &[".md".to_string()]));
    }

    #[test]
    fn parent_of_root_is_none() {
        assert_eq!(parent_of(Path::new("/")), None);
        assert_eq!(parent_of(Path::new("/tmp/x")), Some(PathBuf::from("/tmp")));
    }
}
