//! Domain models for the shape gallery
//!
//! Contains the gallery structure and naming rules without any I/O concerns.

mod name;
mod name_box;
mod shape;
mod category;
mod gallery;

pub use name::{is_valid_name, sanitize_name, validate_name, NameError, FORBIDDEN_CHARS};
pub use name_box::{
    is_default_container_name, name_box_text, parse_name_box, NAME_BOX_PREFIX,
    NAME_BOX_SHAPE_NAME,
};
pub use shape::{image_file_name, recovered_name, Shape, IMAGE_EXTENSION, UNNAMED_SHAPE};
pub use category::Category;
pub use gallery::Gallery;
