//! Mirror reconciliation for one category
//!
//! Runs after the category's name is final:
//!
//! 1. resolve the folder (create it, or pick a free suffixed name when an
//!    imported category would land on an existing folder)
//! 2. export every shape that has no image
//! 3. delete every image that has no shape
//!
//! The name-box never has an image.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{image_file_name, Category};
use crate::host::Host;
use crate::storage::MirrorStore;

/// What reconciling one category changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorOutcome {
    /// Folder the category now maps to
    pub folder: PathBuf,
    /// Name the category had before an import collision forced a suffix
    pub collided_with: Option<String>,
    /// Shapes whose image had to be exported
    pub exported: Vec<String>,
    /// Images deleted because no shape matched
    pub deleted: Vec<String>,
}

impl MirrorOutcome {
    pub fn image_lost(&self) -> bool {
        !self.exported.is_empty()
    }

    pub fn shape_lost(&self) -> bool {
        !self.deleted.is_empty()
    }
}

/// Picks the first `"<name> <n>"` (n = 1, 2, ...) with no folder on disk
pub fn free_folder_name(mirror: &MirrorStore, name: &str) -> String {
    (1..)
        .map(|n| format!("{} {}", name, n))
        .find(|candidate| !mirror.category_exists(candidate))
        .unwrap_or_else(|| name.to_string())
}

/// Reconciles a category against its folder
///
/// `name_box` is the index of the category's name-box shape.
pub fn reconcile_mirror<H: Host + ?Sized>(
    category: &mut Category,
    name_box: usize,
    mirror: &MirrorStore,
    imported: bool,
    host: &mut H,
) -> Result<MirrorOutcome> {
    let mut outcome = MirrorOutcome::default();

    // 1. folder
    let mut folder_name = category.name.clone();
    if mirror.category_exists(&folder_name) {
        if imported {
            let suffixed = free_folder_name(mirror, &folder_name);
            outcome.collided_with = Some(std::mem::replace(&mut folder_name, suffixed));
            mirror.create_dir(&mirror.category_dir(&folder_name)?)?;
        }
    } else {
        mirror.create_dir(&mirror.category_dir(&folder_name)?)?;
    }

    let folder = mirror.category_dir(&folder_name)?;
    if category.name != folder_name {
        category.set_name(folder_name);
    }

    // 2. shape -> image
    for (idx, shape) in category.shapes.iter().enumerate() {
        if idx == name_box {
            continue;
        }

        let path = MirrorStore::image_path(&folder, &shape.name)?;
        if !path.is_file() {
            host.export_image(shape, &path)?;
            outcome.exported.push(shape.name.clone());
        }
    }

    // 3. image -> shape
    let live: HashSet<&str> = category
        .shapes
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != name_box)
        .map(|(_, shape)| shape.name.as_str())
        .collect();

    for image in mirror.list_images(&folder)? {
        if !live.contains(image.as_str()) {
            // listed from this folder, so the name needs no validation
            mirror.delete_file(&folder.join(image_file_name(&image)))?;
            outcome.deleted.push(image);
        }
    }

    outcome.folder = folder;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Shape;
    use crate::host::testing::RecordingHost;
    use std::fs;
    use tempfile::TempDir;

    fn arrows(shapes: &[&str]) -> Category {
        let mut category = Category::new("Arrows");
        for name in shapes {
            category.push_shape(Shape::new(*name, name.as_bytes().to_vec()));
        }
        category
    }

    #[test]
    fn creates_folder_and_exports_everything() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        let mut host = RecordingHost::new();
        let mut category = arrows(&["Line", "Box"]);

        let outcome = reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();

        assert!(outcome.folder.is_dir());
        assert_eq!(outcome.exported, vec!["Line", "Box"]);
        assert!(outcome.image_lost());
        assert!(!outcome.shape_lost());
        assert_eq!(
            mirror.list_images(&outcome.folder).unwrap(),
            vec!["Box", "Line"]
        );
    }

    #[test]
    fn deletes_orphan_images() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        let folder = mirror.category_dir("Arrows").unwrap();
        mirror.create_dir(&folder).unwrap();
        fs::write(folder.join("Line.png"), b"l").unwrap();
        fs::write(folder.join("Ghost.png"), b"g").unwrap();

        let mut host = RecordingHost::new();
        let mut category = arrows(&["Line"]);

        let outcome = reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();

        assert_eq!(outcome.deleted, vec!["Ghost"]);
        assert!(outcome.exported.is_empty());
        assert!(host.exports.is_empty());
        assert_eq!(mirror.list_images(&folder).unwrap(), vec!["Line"]);
    }

    #[test]
    fn name_box_has_no_image() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        let folder = mirror.category_dir("Arrows").unwrap();
        mirror.create_dir(&folder).unwrap();
        fs::write(folder.join("Category Name Box.png"), b"x").unwrap();

        let mut host = RecordingHost::new();
        let mut category = arrows(&[]);

        let outcome = reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();

        assert!(outcome.exported.is_empty());
        assert_eq!(outcome.deleted, vec!["Category Name Box"]);
    }

    #[test]
    fn existing_folder_is_reused_outside_import() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        mirror.create_dir(&mirror.category_dir("Arrows").unwrap()).unwrap();

        let mut host = RecordingHost::new();
        let mut category = arrows(&[]);

        let outcome = reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();

        assert_eq!(outcome.folder, mirror.category_dir("Arrows").unwrap());
        assert!(outcome.collided_with.is_none());
        assert_eq!(category.name, "Arrows");
    }

    #[test]
    fn import_collision_gets_suffix() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        let existing = mirror.category_dir("Arrows").unwrap();
        mirror.create_dir(&existing).unwrap();
        mirror.create_dir(&mirror.category_dir("Arrows 1").unwrap()).unwrap();
        fs::write(existing.join("Theirs.png"), b"t").unwrap();

        let mut host = RecordingHost::new();
        let mut category = arrows(&["Mine"]);

        let outcome = reconcile_mirror(&mut category, 0, &mirror, true, &mut host).unwrap();

        assert_eq!(outcome.collided_with.as_deref(), Some("Arrows"));
        assert_eq!(outcome.folder, mirror.category_dir("Arrows 2").unwrap());
        assert_eq!(category.name, "Arrows 2");
        assert_eq!(category.shapes[0].name_box_name(), Some("Arrows 2"));

        // the existing folder is untouched
        assert_eq!(mirror.list_images(&existing).unwrap(), vec!["Theirs"]);
        assert_eq!(mirror.list_images(&outcome.folder).unwrap(), vec!["Mine"]);
    }

    #[test]
    fn consistent_category_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let mirror = MirrorStore::new(dir.path());
        let mut host = RecordingHost::new();
        let mut category = arrows(&["Line"]);

        reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();
        let outcome = reconcile_mirror(&mut category, 0, &mirror, false, &mut host).unwrap();

        assert!(!outcome.image_lost());
        assert!(!outcome.shape_lost());
        assert_eq!(host.exports, vec!["Line"]);
    }
}
