//! Category domain model
//!
//! A category is an ordered container of shapes. One of its shapes is the
//! name-box carrying the category's display name; every other shape is a
//! user shape mirrored as an image in the category's folder.

use serde::{Deserialize, Serialize};

use super::name_box::{name_box_text, NAME_BOX_SHAPE_NAME};
use super::shape::Shape;

/// A named group of shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Container name; equals the name-box name once reconciled
    pub name: String,

    /// Shapes in container order, including the name-box
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Category {
    /// Creates an empty category with its name-box
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name_box = Shape::text_box(NAME_BOX_SHAPE_NAME, name_box_text(&name));
        Self {
            name,
            shapes: vec![name_box],
        }
    }

    /// Creates a raw container without a name-box (as a foreign file may hold)
    pub fn bare(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            name: name.into(),
            shapes,
        }
    }

    /// Position of the name-box among the shapes (first match wins)
    pub fn name_box_index(&self) -> Option<usize> {
        self.shapes.iter().position(Shape::is_name_box)
    }

    /// Sets the display name and rewrites the name-box text to match
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if let Some(idx) = self.name_box_index() {
            self.shapes[idx].text = Some(name_box_text(&self.name));
        }
    }

    /// Iterates user shapes (everything except the name-box)
    pub fn user_shapes(&self) -> impl Iterator<Item = &Shape> {
        let name_box = self.name_box_index();
        self.shapes
            .iter()
            .enumerate()
            .filter(move |(idx, _)| Some(*idx) != name_box)
            .map(|(_, shape)| shape)
    }

    /// Position of a user shape by name
    pub fn shape_index(&self, name: &str) -> Option<usize> {
        let name_box = self.name_box_index();
        self.shapes
            .iter()
            .enumerate()
            .position(|(idx, shape)| Some(idx) != name_box && shape.name == name)
    }

    /// Looks up a user shape by name
    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.shape_index(name).map(|idx| &self.shapes[idx])
    }

    /// Returns true if a user shape with this name exists
    pub fn contains_shape(&self, name: &str) -> bool {
        self.shape_index(name).is_some()
    }

    /// Appends a user shape
    pub fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Removes a user shape by name
    pub fn remove_shape(&mut self, name: &str) -> Option<Shape> {
        self.shape_index(name).map(|idx| self.shapes.remove(idx))
    }

    /// Names of user shapes in container order
    pub fn shape_names(&self) -> Vec<&str> {
        self.user_shapes().map(|s| s.name.as_str()).collect()
    }
}
