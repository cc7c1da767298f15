//! The transient `.iconset` working directory.
//!
//! An `IconSet` is created empty at the start of a run and removed when the
//! value is dropped, so every exit path out of the builder (including early
//! `?` returns) leaves no directory behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::sizes::SizeSpec;

/// Default working directory name, relative to the current directory.
pub const DEFAULT_ICONSET_DIR: &str = "VeloxClip.iconset";

#[derive(Debug)]
pub struct IconSet {
    dir: PathBuf,
    removed: bool,
}

impl IconSet {
    /// Create `dir` empty, destroying any stale directory of the same name.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let dir = dir.into();
        if dir.exists() {
            tracing::debug!("removing stale iconset {}", dir.display());
            fs::remove_dir_all(&dir)
                .map_err(|e| BuildError::io("remove stale iconset", &dir, e))?;
        }
        fs::create_dir_all(&dir).map_err(|e| BuildError::io("create iconset", &dir, e))?;
        Ok(Self {
            dir,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Where the rendition for `spec` lives inside the set.
    pub fn entry(&self, spec: &SizeSpec) -> PathBuf {
        self.dir.join(spec.file_name)
    }

    /// Remove the directory now. Dropping the value does the same, but
    /// silently; this surfaces the error.
    pub fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        remove_if_present(&self.dir)
    }
}

impl Drop for IconSet {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = remove_if_present(&self.dir) {
            tracing::warn!("failed to remove iconset {}: {}", self.dir.display(), e);
        }
    }
}

fn remove_if_present(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
