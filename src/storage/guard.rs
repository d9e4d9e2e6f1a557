//! File identity guard
//!
//! A gallery document lives in one of two forms:
//!
//! - **closed**: `<name>.gallery`, read-only and visible, the form at rest
//! - **working**: `.<name>.gallery.json`, writable and hidden (dot-prefixed),
//!   the form while the gallery is open
//!
//! Exactly one form exists at a time. Opening and closing switch between
//! them and are both idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

/// Extension of the closed form
pub const CLOSED_EXTENSION: &str = "gallery";

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Gallery file not found (looked for {closed} and {working})")]
    Missing { closed: PathBuf, working: PathBuf },
}

/// Switches a gallery document between its closed and working forms
#[derive(Debug, Clone)]
pub struct FileGuard {
    closed: PathBuf,
    working: PathBuf,
}

impl FileGuard {
    /// Creates a guard for explicit closed/working paths
    pub fn new(closed: impl Into<PathBuf>, working: impl Into<PathBuf>) -> Self {
        Self {
            closed: closed.into(),
            working: working.into(),
        }
    }

    /// Creates the guard for gallery `name` stored in `dir`
    pub fn for_gallery(dir: &Path, name: &str) -> Self {
        Self::new(
            dir.join(format!("{}.{}", name, CLOSED_EXTENSION)),
            dir.join(format!(".{}.{}.json", name, CLOSED_EXTENSION)),
        )
    }

    /// Path of the closed form
    pub fn closed_path(&self) -> &Path {
        &self.closed
    }

    /// Path of the working form
    pub fn working_path(&self) -> &Path {
        &self.working
    }

    /// Returns true if the working form is present
    pub fn is_open(&self) -> bool {
        self.working.is_file()
    }

    /// Returns true if either form is present
    pub fn exists(&self) -> bool {
        self.closed.is_file() || self.working.is_file()
    }

    /// Switches to the working form
    ///
    /// Returns true if the closed form was moved into place, false if the
    /// gallery was already open. When both forms exist the more recently
    /// written one is kept.
    pub fn open(&self) -> Result<bool> {
        match (self.closed.is_file(), self.working.is_file()) {
            (true, false) => {
                set_readonly(&self.closed, false)?;
                rename(&self.closed, &self.working)?;
                Ok(true)
            }
            (true, true) => {
                set_readonly(&self.closed, false)?;
                if modified(&self.closed)? > modified(&self.working)? {
                    rename(&self.closed, &self.working)?;
                } else {
                    fs::remove_file(&self.closed).with_context(|| {
                        format!("Failed to remove stale file: {}", self.closed.display())
                    })?;
                }
                Ok(true)
            }
            (false, true) => Ok(false),
            (false, false) => Err(self.missing().into()),
        }
    }

    /// Switches back to the closed form and marks it read-only
    ///
    /// Returns true if the working form was moved into place.
    pub fn close(&self) -> Result<bool> {
        match (self.working.is_file(), self.closed.is_file()) {
            (true, closed_exists) => {
                if closed_exists {
                    set_readonly(&self.closed, false)?;
                }
                rename(&self.working, &self.closed)?;
                set_readonly(&self.closed, true)?;
                Ok(true)
            }
            (false, true) => {
                set_readonly(&self.closed, true)?;
                Ok(false)
            }
            (false, false) => Err(self.missing().into()),
        }
    }

    fn missing(&self) -> GuardError {
        GuardError::Missing {
            closed: self.closed.clone(),
            working: self.working.clone(),
        }
    }
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))
}

fn modified(path: &Path) -> Result<std::time::SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to read modification time: {}", path.display()))
}

#[allow(clippy::permissions_set_readonly_false)]
fn set_readonly(path: &Path, readonly: bool) -> Result<()> {
    let mut perms = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .permissions();

    if perms.readonly() == readonly {
        return Ok(());
    }

    perms.set_readonly(readonly);
    fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to set permissions: {}", path.display()))
}
