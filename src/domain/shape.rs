//! Shape domain model
//!
//! A shape is a named, reusable graphic owned by exactly one category.
//! Its payload is opaque to the gallery: the host turns it into the image
//! written to the mirror.

use serde::{Deserialize, Serialize};

use super::name_box::parse_name_box;

/// A named shape inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name, unique within its category once reconciled
    pub name: String,

    /// Text content, if the shape is a text box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Opaque payload handed to the host on export
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

impl Shape {
    /// Creates a shape with the given name and payload
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            text: None,
            data: data.into(),
        }
    }

    /// Creates a text shape
    pub fn text_box(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            data: Vec::new(),
        }
    }

    /// Returns the category name if this shape's text is a name-box
    pub fn name_box_name(&self) -> Option<&str> {
        self.text.as_deref().and_then(parse_name_box)
    }

    /// Returns true if this shape's text follows the name-box pattern
    pub fn is_name_box(&self) -> bool {
        self.name_box_name().is_some()
    }

    /// File name of this shape's image in the mirror
    pub fn image_file_name(&self) -> String {
        image_file_name(&self.name)
    }
}

/// Extension of mirror image files
pub const IMAGE_EXTENSION: &str = "png";

/// Name given to a shape whose name had nothing usable in it
pub const UNNAMED_SHAPE: &str = "Unnamed Shape";

/// File name of the image for a shape name
pub fn image_file_name(shape_name: &str) -> String {
    format!("{}.{}", shape_name, IMAGE_EXTENSION)
}

/// Name given to the n-th member of a duplicate group
pub fn recovered_name(name: &str, occurrence: usize) -> String {
    format!("{} (recovered shape {})", name, occurrence)
}
