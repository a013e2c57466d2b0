//! UTF-8 file helpers built on `cap-std` and `camino`.
//!
//! Every helper opens an ambient directory for the parent of the target and
//! performs the file operation relative to it, so callers can pass plain
//! `Utf8Path`s while the actual I/O stays capability-scoped.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create or truncate a file for writing.
///
/// The parent directory must already exist; see [`ensure_parent_dir`].
///
/// # Errors
/// Propagates the I/O error when the parent cannot be opened or the file
/// cannot be created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name)
}

/// Open the parent directory of `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates the I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) else {
        return Ok(());
    };
    let (anchor, relative) = split_anchor(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    base.create_dir_all(&relative)
}

/// Report whether `path` names a regular file rather than a directory.
///
/// # Errors
/// Fails with [`io::ErrorKind::NotFound`] when the path or its parent does
/// not exist, and propagates any other I/O error.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Split a directory path into its root (or `.`) and the remainder.
fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => anchor.push(component),
            _ => relative.push(component),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, relative)
}
