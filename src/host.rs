//! Host collaborator
//!
//! The gallery does not render shapes or own an undo history. It asks a
//! [`Host`] to export a shape's image, to commit the document, and to pad
//! the undo history after every mutation so a single undo cannot roll a
//! repair back into an inconsistent state.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{Gallery, Shape};
use crate::storage::DocumentStore;

/// Checkpoints pushed by [`Host::protect_last_actions`]
pub const PROTECT_REPEAT: usize = 3;

/// Operations the gallery needs from its host
pub trait Host {
    /// Writes the image of `shape` to `path`
    fn export_image(&mut self, shape: &Shape, path: &Path) -> Result<()>;

    /// Persists the gallery document
    fn commit(&mut self, gallery: &Gallery) -> Result<()>;

    /// Pushes one no-op entry onto the undo history
    fn push_checkpoint(&mut self);

    /// Pads the undo history after a mutation
    fn protect_last_actions(&mut self) {
        for _ in 0..PROTECT_REPEAT {
            self.push_checkpoint();
        }
    }
}

/// Host backed by the local filesystem
///
/// Images are the shape payload written verbatim; the document is saved
/// through a [`DocumentStore`].
#[derive(Debug)]
pub struct FileHost {
    store: DocumentStore,
    checkpoints: usize,
}

impl FileHost {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            checkpoints: 0,
        }
    }

    /// Returns the document store
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Number of undo checkpoints pushed so far
    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }
}

impl Host for FileHost {
    fn export_image(&mut self, shape: &Shape, path: &Path) -> Result<()> {
        let temp_path = path.with_extension("png.tmp");

        fs::write(&temp_path, &shape.data)
            .with_context(|| format!("Failed to write temp image: {}", temp_path.display()))?;

        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })
    }

    fn commit(&mut self, gallery: &Gallery) -> Result<()> {
        self.store.save(gallery)
    }

    fn push_checkpoint(&mut self) {
        self.checkpoints += 1;
    }
}
