//! Test helpers for staging CLI inputs in a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Temporary directory pre-populated with the shared fixtures.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        for name in ["trips.csv", "separable.csv", "candidates.json"] {
            let contents = fs::read(fixture(name)).expect("read fixture");
            write_utf8(&root.join(name), &contents);
        }
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn trips(&self) -> Utf8PathBuf {
        self.path("trips.csv")
    }

    pub(super) fn candidates(&self) -> Utf8PathBuf {
        self.path("candidates.json")
    }
}

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn stdout_text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("stdout utf-8")
}
