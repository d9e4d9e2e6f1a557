//! # Consistency Engine
//!
//! Keeps the in-memory gallery and the on-disk image mirror in agreement.
//!
//! ## Pass Order
//!
//! | Step | Module | Effect |
//! |------|--------|--------|
//! | A | [`duplicates`] | Usable, unique shape names per category |
//! | B1 | [`name_box`] | Every category has a name-box and a final name |
//! | B2 | [`mirror`] | Folder resolved, missing images exported, orphans deleted |
//! | C | [`consistency`] | Orphan category folders flagged |
//!
//! Duplicate resolution must finish before the mirror is reconciled because
//! reconciliation reasons about final shape names.
//!
//! ## Key Types
//!
//! - [`ConsistencyReport`] - findings of one pass plus resolved names
//! - [`ConsistencyError`] - a failed (non-import) open
//! - [`ReconcileContext`] - state threaded through one pass

pub mod consistency;
pub mod context;
pub mod duplicates;
pub mod mirror;
pub mod name_box;
mod report;

pub use consistency::{check, check_and_commit};
pub use context::{NameBoxRef, ReconcileContext};
pub use duplicates::{repair_invalid_names, rename_duplicates, resolve_duplicates, DuplicateGroup};
pub use mirror::{reconcile_mirror, MirrorOutcome};
pub use name_box::resolve_name_box;
pub use report::{ConsistencyError, ConsistencyReport, Finding};
