//! On-disk image mirror
//!
//! Every category has a folder under the mirror root and every user shape
//! has a `<shape>.png` file in its category's folder. This module only knows
//! about paths and files; deciding what should exist is the engine's job.
//! Callers check for existence before deleting or renaming.
//!
//! Folder and image paths are only built from names that pass
//! [`validate_name`], so no name can address a file outside the root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{image_file_name, validate_name, NameError, IMAGE_EXTENSION};

/// Filesystem access to the image mirror
#[derive(Debug, Clone)]
pub struct MirrorStore {
    root: PathBuf,
}

impl MirrorStore {
    /// Creates a mirror rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the mirror root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a category folder
    pub fn category_dir(&self, category: &str) -> Result<PathBuf, NameError> {
        validate_name(category)?;
        Ok(self.root.join(category))
    }

    /// Path of a shape image inside a folder
    pub fn image_path(folder: &Path, shape: &str) -> Result<PathBuf, NameError> {
        validate_name(shape)?;
        Ok(folder.join(image_file_name(shape)))
    }

    /// Returns true if the category folder exists
    pub fn category_exists(&self, category: &str) -> bool {
        self.category_dir(category).is_ok_and(|dir| dir.is_dir())
    }

    /// Lists category folder names, sorted
    pub fn list_category_dirs(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !self.root.is_dir() {
            return Ok(names);
        }

        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read mirror root: {}", self.root.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Lists image base names (without `.png`) in a folder, sorted
    pub fn list_images(&self, folder: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !folder.is_dir() {
            return Ok(names);
        }

        for entry in fs::read_dir(folder)
            .with_context(|| format!("Failed to read category folder: {}", folder.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|e| e == IMAGE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Creates a directory (and missing parents)
    pub fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))
    }

    /// Deletes a single file
    pub fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .with_context(|| format!("Failed to delete file: {}", path.display()))
    }

    /// Renames a file or folder
    pub fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| {
            format!("Failed to rename {} to {}", from.display(), to.display())
        })
    }

    /// Removes a category folder with all of its images
    pub fn remove_category_dir(&self, category: &str) -> Result<()> {
        let dir = self.category_dir(category)?;
        fs::remove_dir_all(&dir)
            .with_context(|| format!("Failed to remove category folder: {}", dir.display()))
    }
}
