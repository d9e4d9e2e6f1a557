//! Shape Gallery - A categorized shape library kept in step with an image
//! folder on disk
//!
//! A gallery holds named categories of shapes. Every shape has a PNG image
//! under `shapes/<category>/`, and every time the gallery is opened a
//! consistency check repairs the two sides and reports what it found.

pub mod domain;
pub mod engine;
pub mod host;
pub mod storage;
pub mod cli;

pub use domain::{Category, Gallery, Shape};
pub use engine::{ConsistencyReport, Finding};
pub use host::{FileHost, Host};
pub use storage::{GallerySession, Library};
