//! Shape names within a category
//!
//! Two repairs run before the mirror is touched. Names that cannot be used
//! as an image file name are cleaned up first. Then every shape that shares
//! its name with another one is renamed `<name> (recovered shape n)`, the
//! first occurrence taking n = 1, so no shape keeps the ambiguous bare name.
//! Numbers whose recovered name is already used in the category are
//! skipped. The image at the bare name is deleted; images for the recovered
//! names are exported by the mirror reconciler into the category's final
//! folder.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;

use crate::domain::{is_valid_name, recovered_name, sanitize_name, Category, Shape, UNNAMED_SHAPE};
use crate::storage::MirrorStore;

/// Shapes that shared one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// The name they shared
    pub name: String,
    /// Index of the first occurrence
    pub first: usize,
    /// Indices of the later occurrences, in scan order
    pub others: Vec<usize>,
}

impl DuplicateGroup {
    /// Number of shapes in the group
    pub fn count(&self) -> usize {
        self.others.len() + 1
    }
}

/// Renames shapes whose name cannot be used as an image file name
///
/// Forbidden characters are stripped; when nothing usable is left the shape
/// becomes [`UNNAMED_SHAPE`]. Returns `(old, new)` pairs in container order.
/// Clashes this creates are left to [`rename_duplicates`].
pub fn repair_invalid_names(shapes: &mut [Shape]) -> Vec<(String, String)> {
    let mut repaired = Vec::new();

    for shape in shapes.iter_mut() {
        if is_valid_name(&shape.name) {
            continue;
        }

        let name = sanitize_name(&shape.name).unwrap_or_else(|| UNNAMED_SHAPE.to_string());
        repaired.push((std::mem::replace(&mut shape.name, name.clone()), name));
    }

    repaired
}

/// Renames duplicated shapes in place and returns the groups found,
/// ordered by their second occurrence
pub fn rename_duplicates(shapes: &mut [Shape]) -> Vec<DuplicateGroup> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    // name -> position in `groups`
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for (idx, shape) in shapes.iter().enumerate() {
        let Some(&first) = first_seen.get(&shape.name) else {
            first_seen.insert(shape.name.clone(), idx);
            continue;
        };

        let slot = *slots.entry(shape.name.clone()).or_insert_with(|| {
            groups.push(DuplicateGroup {
                name: shape.name.clone(),
                first,
                others: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].others.push(idx);
    }

    // every name present before renaming stays reserved
    let mut taken: HashSet<String> = first_seen.into_keys().collect();

    for group in &groups {
        let mut occurrence = 0;
        for idx in std::iter::once(group.first).chain(group.others.iter().copied()) {
            let name = loop {
                occurrence += 1;
                let candidate = recovered_name(&group.name, occurrence);
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            taken.insert(name.clone());
            shapes[idx].name = name;
        }
    }

    groups
}

/// Resolves duplicates in a category
///
/// `folder` is the category's current mirror folder. When given, the image
/// still carrying a duplicated bare name is deleted from it. Pass `None` to
/// leave the disk untouched (imported galleries map onto folders that may
/// belong to someone else).
pub fn resolve_duplicates(
    category: &mut Category,
    mirror: &MirrorStore,
    folder: Option<&Path>,
) -> Result<Vec<DuplicateGroup>> {
    let groups = rename_duplicates(&mut category.shapes);

    if let Some(folder) = folder {
        for group in &groups {
            let bare = MirrorStore::image_path(folder, &group.name)?;
            if bare.is_file() {
                mirror.delete_file(&bare)?;
            }
        }
    }

    Ok(groups)
}
