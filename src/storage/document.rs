//! JSON storage for the gallery document
//!
//! The document is a single JSON file holding every category and shape.
//! Writes go to a locked temp file that is renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::Gallery;

/// Current document format version
pub const DOCUMENT_VERSION: u32 = 1;

/// On-disk envelope around the gallery
#[derive(Debug, Serialize, Deserialize)]
struct GalleryDocument {
    version: u32,
    saved_at: DateTime<Utc>,
    gallery: Gallery,
}

/// Store for one gallery document file
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    /// Creates a store for the document at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the document file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the gallery from the document
    pub fn load(&self) -> Result<Gallery> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open gallery: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on gallery")?;

        let document: GalleryDocument = serde_json::from_reader(BufReader::new(&file))
            .with_context(|| format!("Failed to parse gallery: {}", self.path.display()))?;

        if document.version > DOCUMENT_VERSION {
            anyhow::bail!(
                "Gallery {} was written by a newer version (format {}, supported {})",
                self.path.display(),
                document.version,
                DOCUMENT_VERSION
            );
        }

        Ok(document.gallery)
    }

    /// Writes the gallery atomically (temp file + rename)
    pub fn save(&self, gallery: &Gallery) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on gallery")?;

            let document = GalleryDocument {
                version: DOCUMENT_VERSION,
                saved_at: Utc::now(),
                gallery: gallery.clone(),
            };

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, &document)
                .context("Failed to serialize gallery")?;
            writeln!(writer).context("Failed to write gallery")?;
            writer.flush().context("Failed to flush gallery")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
