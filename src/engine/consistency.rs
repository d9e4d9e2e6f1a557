//! Gallery consistency check
//!
//! A single pass over every category, in container order:
//!
//! - **A**: clean up unusable shape names, then resolve duplicates, in every
//!   category
//! - **B**: per category, resolve the name-box, then reconcile the mirror;
//!   a stored default is kept, otherwise the first category becomes the
//!   default
//! - **C**: flag category folders that no category claims (never deleted)
//!
//! Every category is visited even once something is found. Repairs are
//! committed whatever the verdict; outside imported-file mode any finding
//! fails the open.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::domain::Gallery;
use crate::host::Host;
use crate::storage::MirrorStore;

use super::context::ReconcileContext;
use super::duplicates::{repair_invalid_names, resolve_duplicates};
use super::mirror::{free_folder_name, reconcile_mirror};
use super::name_box::resolve_name_box;
use super::report::{ConsistencyError, ConsistencyReport, Finding};

/// Runs the consistency pass and reports what was found and repaired
///
/// Does not commit or decide; see [`check_and_commit`].
pub fn check<H: Host + ?Sized>(
    gallery: &mut Gallery,
    mirror: &MirrorStore,
    host: &mut H,
) -> Result<ConsistencyReport> {
    let mut ctx = ReconcileContext::new(gallery.imported);
    let mut report = ConsistencyReport::new(ctx.imported());

    if gallery.categories.is_empty() {
        gallery.default_category = None;
        return Ok(report);
    }

    // A: shape names
    let mut current_names: HashSet<String> = HashSet::new();
    for category in &mut gallery.categories {
        let current = category
            .name_box_index()
            .and_then(|idx| category.shapes[idx].name_box_name())
            .unwrap_or(category.name.as_str())
            .to_string();

        // a folder shared with an earlier category holds that category's images
        let first_claim = current_names.insert(current.clone());
        let folder: Option<PathBuf> = if ctx.imported() || !first_claim {
            None
        } else {
            mirror.category_dir(&current).ok().filter(|f| f.is_dir())
        };

        for (name, renamed_to) in repair_invalid_names(&mut category.shapes) {
            report.push(Finding::InvalidShapeName {
                category: current.clone(),
                name,
                renamed_to,
            });
        }

        for group in resolve_duplicates(category, mirror, folder.as_deref())? {
            report.push(Finding::StructuralDuplicate {
                category: current.clone(),
                name: group.name.clone(),
                count: group.count(),
            });
        }
    }

    // names carried by existing name-boxes are spoken for before any
    // untitled name is handed out
    for category in &gallery.categories {
        if let Some(name) = category
            .name_box_index()
            .and_then(|idx| category.shapes[idx].name_box_name())
        {
            ctx.reserve(name);
        }
    }

    // B: names and mirror
    let mut claimed: HashSet<String> = HashSet::new();
    for idx in 0..gallery.categories.len() {
        let category = &mut gallery.categories[idx];
        let name_box = resolve_name_box(category, idx, &mut ctx);

        if claimed.contains(&category.name) {
            let renamed = free_category_name(mirror, &claimed, &category.name);
            report.push(Finding::DuplicateCategory {
                name: category.name.clone(),
                renamed_to: renamed.clone(),
            });
            category.set_name(renamed);
        }

        let outcome = reconcile_mirror(category, name_box, mirror, ctx.imported(), host)?;

        if let Some(original) = outcome.collided_with {
            report.push(Finding::ImportNameCollision {
                category: original,
                folder: category.name.clone(),
            });
        }
        for shape in outcome.exported {
            report.push(Finding::MissingImage {
                category: category.name.clone(),
                shape,
            });
        }
        for image in outcome.deleted {
            report.push(Finding::OrphanImage {
                category: category.name.clone(),
                image,
            });
        }

        claimed.insert(category.name.clone());
        ctx.reserve(category.name.clone());
        report.categories.push(category.name.clone());
    }

    // a stored default survives; a missing or stale one falls back to the
    // first category
    let default = gallery
        .default_category
        .filter(|idx| *idx < gallery.categories.len())
        .unwrap_or(0);
    gallery.default_category = Some(default);
    report.default_category = Some(gallery.categories[default].name.clone());

    // C: orphan folders (an imported gallery shares the root with the
    // library it is joining, so every existing folder would look orphaned)
    if !ctx.imported() {
        for folder in mirror.list_category_dirs()? {
            if !claimed.contains(&folder) {
                report.push(Finding::OrphanCategoryFolder { folder });
            }
        }
    }

    Ok(report)
}

/// Runs [`check`], commits the repairs and decides whether the gallery may
/// be used
///
/// Fails with [`ConsistencyError::Corrupted`] when anything was found and
/// the gallery is not being imported. The repairs are committed either way.
pub fn check_and_commit<H: Host + ?Sized>(
    gallery: &mut Gallery,
    mirror: &MirrorStore,
    host: &mut H,
) -> Result<ConsistencyReport> {
    if gallery.categories.is_empty() {
        gallery.default_category = None;
        return Ok(ConsistencyReport::new(gallery.imported));
    }

    let report = check(gallery, mirror, host)?;

    host.commit(gallery)?;
    host.protect_last_actions();

    if !report.is_consistent() && !gallery.imported {
        return Err(ConsistencyError::Corrupted(report).into());
    }

    Ok(report)
}

/// Suffixes a category name until it is neither claimed in this pass nor
/// present on disk
fn free_category_name(mirror: &MirrorStore, claimed: &HashSet<String>, name: &str) -> String {
    let mut candidate = free_folder_name(mirror, name);
    let mut n = 1;
    while claimed.contains(&candidate) || mirror.category_exists(&candidate) {
        n += 1;
        candidate = format!("{} {}", name, n);
    }
    candidate
}
