//! Per-pass reconciliation state
//!
//! One context lives for exactly one consistency pass over one gallery.

use std::collections::HashSet;

/// Location of a category's name-box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameBoxRef {
    pub category: usize,
    pub shape: usize,
}

/// State threaded through a reconciliation pass
#[derive(Debug, Default)]
pub struct ReconcileContext {
    imported: bool,
    untitled_counter: usize,
    name_boxes: Vec<NameBoxRef>,
    /// Category names already spoken for in this pass
    taken: HashSet<String>,
}

impl ReconcileContext {
    pub fn new(imported: bool) -> Self {
        Self {
            imported,
            ..Self::default()
        }
    }

    /// Returns true when reconciling a foreign gallery file
    pub fn imported(&self) -> bool {
        self.imported
    }

    /// Records that a category name is in use
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    /// Returns true if a category name is already in use
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Produces the next free `Untitled Category <n>` name
    ///
    /// The counter only ever grows within a pass; values whose name is
    /// already taken are skipped.
    pub fn next_untitled(&mut self) -> String {
        loop {
            self.untitled_counter += 1;
            let name = format!("Untitled Category {}", self.untitled_counter);
            if !self.is_taken(&name) {
                self.reserve(name.clone());
                return name;
            }
        }
    }

    /// Registers the name-box of a category
    pub fn register_name_box(&mut self, category: usize, shape: usize) {
        self.name_boxes.retain(|r| r.category != category);
        self.name_boxes.push(NameBoxRef { category, shape });
    }

    /// Returns the name-box shape index for a category
    pub fn name_box(&self, category: usize) -> Option<usize> {
        self.name_boxes
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.shape)
    }

    /// All registered name-boxes
    pub fn name_boxes(&self) -> &[NameBoxRef] {
        &self.name_boxes
    }
}
