//! Consistency findings and the report handed back to callers

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One divergence found (and, except for orphan folders, repaired)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Several shapes in a category shared a name; all were renamed
    StructuralDuplicate {
        category: String,
        name: String,
        count: usize,
    },

    /// A shape name could not be used as a file name; it was cleaned up
    InvalidShapeName {
        category: String,
        name: String,
        renamed_to: String,
    },

    /// Two categories resolved to the same name; the later one was suffixed
    DuplicateCategory { name: String, renamed_to: String },

    /// A shape had no image; it was exported
    MissingImage { category: String, shape: String },

    /// An image had no shape; it was deleted
    OrphanImage { category: String, image: String },

    /// A category folder has no category; it was left on disk
    OrphanCategoryFolder { folder: String },

    /// An imported category collided with an existing folder and was suffixed
    ImportNameCollision { category: String, folder: String },
}

impl Finding {
    /// Returns true if this finding makes a non-import open fail
    pub fn is_inconsistency(&self) -> bool {
        !matches!(self, Finding::ImportNameCollision { .. })
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::StructuralDuplicate {
                category,
                name,
                count,
            } => write!(
                f,
                "{} shapes named '{}' in category '{}' were renamed to recovered shapes",
                count, name, category
            ),
            Finding::DuplicateCategory { name, renamed_to } => write!(
                f,
                "category name '{}' was used twice; the second one is now '{}'",
                name, renamed_to
            ),
            Finding::InvalidShapeName {
                category,
                name,
                renamed_to,
            } => write!(
                f,
                "shape '{}' in category '{}' had an unusable name and was renamed '{}'",
                name, category, renamed_to
            ),
            Finding::MissingImage { category, shape } => write!(
                f,
                "image for shape '{}' in category '{}' was missing and has been re-exported",
                shape, category
            ),
            Finding::OrphanImage { category, image } => write!(
                f,
                "image '{}.png' in category '{}' had no shape and was deleted",
                image, category
            ),
            Finding::OrphanCategoryFolder { folder } => write!(
                f,
                "folder '{}' has no matching category (left on disk)",
                folder
            ),
            Finding::ImportNameCollision { category, folder } => write!(
                f,
                "imported category '{}' was stored as '{}' to avoid an existing folder",
                category, folder
            ),
        }
    }
}

/// Outcome of a consistency check over a whole gallery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// Category names after reconciliation, in container order
    pub categories: Vec<String>,

    /// Default category after reconciliation
    pub default_category: Option<String>,

    /// Everything that was found, in the order it was found
    pub findings: Vec<Finding>,

    /// Whether the check ran in imported-file mode
    pub imported: bool,
}

impl ConsistencyReport {
    pub fn new(imported: bool) -> Self {
        Self {
            imported,
            ..Self::default()
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn duplicate_found(&self) -> bool {
        self.findings.iter().any(|f| {
            matches!(
                f,
                Finding::StructuralDuplicate { .. } | Finding::DuplicateCategory { .. }
            )
        })
    }

    pub fn image_lost(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::MissingImage { .. }))
    }

    pub fn shape_lost(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::OrphanImage { .. }))
    }

    pub fn orphan_folder_found(&self) -> bool {
        self.findings
            .iter()
            .any(|f| matches!(f, Finding::OrphanCategoryFolder { .. }))
    }

    /// Returns true if nothing was out of sync
    pub fn is_consistent(&self) -> bool {
        !self.findings.iter().any(Finding::is_inconsistency)
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            return write!(f, "Shape gallery is consistent ({} categories)", self.categories.len());
        }

        writeln!(f, "The shape gallery is corrupted and cannot be opened.")?;
        writeln!(f, "The following problems were repaired where possible:")?;
        for finding in self.findings.iter().filter(|f| f.is_inconsistency()) {
            writeln!(f, "  - {}", finding)?;
        }
        write!(f, "Review the shapes folder, then open the gallery again.")
    }
}

#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("{0}")]
    Corrupted(ConsistencyReport),
}
