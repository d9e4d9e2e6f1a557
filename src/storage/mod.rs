//! # Storage Layer
//!
//! Everything that touches disk for a shape gallery.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Gallery (closed) | JSON, read-only | `<name>.gallery` |
//! | Gallery (working) | JSON, hidden | `.<name>.gallery.json` |
//! | Shape images | PNG payload | `shapes/<category>/<shape>.png` |
//! | Config | TOML | `.gallery/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`DocumentStore`] uses file locking (`fs2`) for concurrent access
//! - All document writes are atomic (temp file + rename)
//!
//! ## Library Structure
//!
//! ```text
//! <root>/
//! ├── .gallery/
//! │   └── config.toml        # Library configuration
//! ├── My Shapes.gallery      # Closed form of the document
//! └── shapes/                # Image mirror
//!     └── My Shapes/
//!         └── Arrow.png
//! ```
//!
//! ## Key Types
//!
//! - [`Library`] - Entry point for accessing a shape gallery
//! - [`GallerySession`] - An open, checked gallery and its mutations
//! - [`FileGuard`] - Closed/working form switching
//! - [`DocumentStore`] - Read/write the gallery document
//! - [`MirrorStore`] - Category folders and shape images
//! - [`Config`] - Library and global configuration

mod config;
mod document;
mod guard;
mod library;
mod mirror;

pub use config::{Config, ConfigError, GlobalConfig, LibraryConfig, OutputFormat, CONFIG_DIR};
pub use document::{DocumentStore, DOCUMENT_VERSION};
pub use guard::{FileGuard, GuardError, CLOSED_EXTENSION};
pub use library::{GallerySession, Library, LibraryError, INITIAL_CATEGORY};
pub use mirror::MirrorStore;
