//! Filesystem operations behind paste and new-file creation.
//!
//! Every operation here refuses to overwrite: an existing destination is
//! reported as [`CoreError::AlreadyExists`] and nothing is touched.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Maximum recursion depth for copy_dir_recursive to prevent symlink loops.
const MAX_COPY_DEPTH: usize = 64;

/// Copies a file, symlink, or directory tree to `dest`.
///
/// Symlinks are copied as symlinks. Directories are copied recursively.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` already exists.
/// - [`CoreError::NameInvalid`] if `dest` lies inside `src`.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_entry(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = source_metadata(src)?;
    ensure_vacant(dest)?;

    if meta.is_dir() {
        if is_within(dest, src) {
            return Err(CoreError::NameInvalid(format!(
                "cannot copy {} into itself",
                src.display()
            )));
        }
        if let Err(e) = copy_dir_recursive(src, dest, 0) {
            discard_partial(dest);
            return Err(e);
        }
    } else if meta.is_symlink() {
        copy_symlink(src, dest)?;
    } else {
        std::fs::copy(src, dest)?;
    }

    Ok(())
}

fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> CoreResult<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(CoreError::Io(std::io::Error::new(
            ErrorKind::Other,
            format!("maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"),
        )));
    }

    std::fs::create_dir(dest)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // file_type() does not follow symlinks
        let ft = entry.file_type()?;

        if ft.is_symlink() {
            copy_symlink(&entry_path, &target)?;
        } else if ft.is_dir() {
            copy_dir_recursive(&entry_path, &target, depth + 1)?;
        } else {
            std::fs::copy(&entry_path, &target)?;
        }
    }

    Ok(())
}

fn copy_symlink(src: &Path, dest: &Path) -> CoreResult<()> {
    #[cfg(unix)]
    {
        let link_target = std::fs::read_link(src)?;
        std::os::unix::fs::symlink(&link_target, dest)?;
    }
    #[cfg(not(unix))]
    {
        std::fs::copy(src, dest)?;
    }
    Ok(())
}

/// Moves a file or directory to `dest`.
///
/// Attempts a `rename` first. Only a cross-device rename falls back to
/// copy + delete; any other rename error is returned with both paths as they
/// were. If the source cannot be removed after the copy, the copy is removed
/// again unless part of the source is already gone.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::AlreadyExists`] if `dest` already exists.
/// - [`CoreError::NameInvalid`] if `dest` lies inside `src`.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_entry(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = source_metadata(src)?;
    ensure_vacant(dest)?;

    if meta.is_dir() && is_within(dest, src) {
        return Err(CoreError::NameInvalid(format!(
            "cannot move {} into itself",
            src.display()
        )));
    }

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            tracing::debug!("rename {} crosses devices, falling back to copy", src.display());
            copy_entry(src, dest)?;
            move_by_copy_finish(src, dest)
        }
        Err(e) => Err(match e.kind() {
            ErrorKind::PermissionDenied => CoreError::PermissionDenied(src.to_path_buf()),
            _ => CoreError::Io(e),
        }),
    }
}

/// Removes `src` after it was copied to `dest`, rolling the copy back when
/// the source is still complete.
fn move_by_copy_finish(src: &Path, dest: &Path) -> CoreResult<()> {
    let before = count_entries(src);
    let Err(e) = remove_entry(src) else {
        return Ok(());
    };
    if count_entries(src) == before {
        discard_partial(dest);
    } else {
        tracing::warn!(
            "{} was partly removed; keeping the full copy at {}",
            src.display(),
            dest.display()
        );
    }
    Err(e)
}

/// `EXDEV` on Unix, `ERROR_NOT_SAME_DEVICE` on Windows.
fn is_cross_device(e: &std::io::Error) -> bool {
    #[cfg(unix)]
    const CROSS_DEVICE: i32 = 18;
    #[cfg(windows)]
    const CROSS_DEVICE: i32 = 17;
    #[cfg(not(any(unix, windows)))]
    const CROSS_DEVICE: i32 = -1;
    e.raw_os_error() == Some(CROSS_DEVICE)
}

/// Number of entries at and below `path`; symlinks are not followed.
fn count_entries(path: &Path) -> usize {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return 0;
    };
    if !meta.is_dir() {
        return 1;
    }
    1 + std::fs::read_dir(path)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| count_entries(&entry.path()))
                .sum::<usize>()
        })
        .unwrap_or(0)
}

/// Best-effort removal of a destination this module created.
fn discard_partial(dest: &Path) {
    if let Err(e) = remove_entry(dest) {
        tracing::warn!("could not clean up {}: {e}", dest.display());
    }
}

fn remove_entry(path: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Creates an empty file called `name` inside `dir` and returns its path.
///
/// # Errors
///
/// - [`CoreError::NameInvalid`] if `name` is empty, `.`/`..`, or contains a
///   path separator or NUL byte.
/// - [`CoreError::AlreadyExists`] if an entry with that name exists.
/// - [`CoreError::PermissionDenied`] if `dir` is not writable.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn create_file(dir: &Path, name: &str) -> CoreResult<PathBuf> {
    if !is_valid_filename(name) {
        return Err(CoreError::NameInvalid(name.to_string()));
    }

    let path = dir.join(name);
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => CoreError::AlreadyExists(path.clone()),
            ErrorKind::PermissionDenied => CoreError::PermissionDenied(dir.to_path_buf()),
            _ => CoreError::Io(e),
        })?;

    Ok(path)
}

/// Returns `true` if `name` can be used as a single path component.
pub fn is_valid_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}

fn source_metadata(src: &Path) -> CoreResult<std::fs::Metadata> {
    // symlink_metadata: does NOT follow symlinks
    std::fs::symlink_metadata(src).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CoreError::NotFound(src.to_path_buf()),
        ErrorKind::PermissionDenied => CoreError::PermissionDenied(src.to_path_buf()),
        _ => CoreError::Io(e),
    })
}

fn ensure_vacant(dest: &Path) -> CoreResult<()> {
    if std::fs::symlink_metadata(dest).is_ok() {
        return Err(CoreError::AlreadyExists(dest.to_path_buf()));
    }
    Ok(())
}

/// `true` if `path` is `ancestor` or lies below it.
fn is_within(path: &Path, ancestor: &Path) -> bool {
    let resolve = |p: &Path| {
        p.parent()
            .and_then(|parent| parent.canonicalize().ok())
            .zip(p.file_name())
            .map(|(parent, name)| parent.join(name))
            .unwrap_or_else(|| p.to_path_buf())
    };
    let ancestor = ancestor
        .canonicalize()
        .unwrap_or_else(|_| ancestor.to_path_buf());
    resolve(path).starts_with(ancestor)
}
