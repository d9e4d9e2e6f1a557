//! Gallery aggregate
//!
//! The gallery owns its categories in container order. The default category
//! is held as an index into that list rather than as a second reference.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// The whole shape library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    /// Categories in container order
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Index of the default category, the target of shape mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<usize>,

    /// Set while absorbing a foreign gallery file
    #[serde(skip)]
    pub imported: bool,
}

impl Gallery {
    /// Creates an empty gallery
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gallery that is being imported from a foreign file
    pub fn imported(categories: Vec<Category>) -> Self {
        Self {
            categories,
            default_category: None,
            imported: true,
        }
    }

    /// Category names in container order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a category by name
    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }

    /// Looks up a category by name
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.category_index(name).map(|idx| &self.categories[idx])
    }

    /// Returns the default category
    pub fn default_category(&self) -> Option<&Category> {
        self.default_category
            .and_then(|idx| self.categories.get(idx))
    }

    /// Marks a category as default; returns false if no such category exists
    pub fn set_default(&mut self, name: &str) -> bool {
        match self.category_index(name) {
            Some(idx) => {
                self.default_category = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Removes a category and keeps the default index pointing at the same
    /// category (or the first one if the default itself was removed)
    pub fn remove_category(&mut self, name: &str) -> Option<Category> {
        let idx = self.category_index(name)?;
        let removed = self.categories.remove(idx);

        self.default_category = match self.default_category {
            _ if self.categories.is_empty() => None,
            Some(d) if d == idx => Some(0),
            Some(d) if d > idx => Some(d - 1),
            other => other,
        };

        Some(removed)
    }
}
