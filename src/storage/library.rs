//! Library management
//!
//! A library is a directory holding one gallery document, its image mirror
//! and its configuration. Opening the library switches the document to its
//! working form and runs the consistency check; a failed check leaves the
//! document closed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, CONFIG_DIR};
use super::{DocumentStore, FileGuard, MirrorStore};
use crate::domain::{validate_name, Category, Gallery, NameError, Shape, NAME_BOX_SHAPE_NAME};
use crate::engine::{self, ConsistencyReport};
use crate::host::{FileHost, Host};

/// Name of the category created by `init`
pub const INITIAL_CATEGORY: &str = "My Shapes";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Shape gallery already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Not in a shape gallery. Run 'gallery init' first.")]
    NotInLibrary,

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category already exists: {0}")]
    CategoryExists(String),

    #[error("Shape '{shape}' not found in category '{category}'")]
    ShapeNotFound { category: String, shape: String },

    #[error("Shape '{shape}' already exists in category '{category}'")]
    ShapeExists { category: String, shape: String },

    #[error("No default category; pass --category or set one with 'gallery category default'")]
    NoDefaultCategory,

    #[error(transparent)]
    InvalidName(#[from] NameError),
}

/// A shape gallery on disk
pub struct Library {
    root: PathBuf,
    config: Config,
}

impl Library {
    /// Opens an existing library at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(CONFIG_DIR).is_dir() {
            return Err(LibraryError::NotInLibrary.into());
        }

        let config = Config::for_library(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the library at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_library_root().ok_or(LibraryError::NotInLibrary)?;

        Self::open(root)
    }

    /// Initializes a new library at the given path
    ///
    /// Creates the config, the mirror root and a closed gallery holding one
    /// empty category. Running it on an existing library changes nothing.
    pub fn init(root: impl Into<PathBuf>, name: Option<&str>) -> Result<Self> {
        let root = root.into();
        let config_dir = root.join(CONFIG_DIR);

        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create {} directory: {}", CONFIG_DIR, config_dir.display())
        })?;

        if !Config::config_path(&root).exists() {
            let mut config = Config::for_library(&root)?;
            if let Some(name) = name {
                validate_name(name).map_err(LibraryError::from)?;
                config.library.name = name.to_string();
            }
            config.save_library()?;
        }

        let library = Self::open(root)?;

        let mirror = library.mirror();
        mirror.create_dir(mirror.root())?;

        let guard = library.guard();
        if !guard.exists() {
            let mut gallery = Gallery::new();
            gallery.categories.push(Category::new(INITIAL_CATEGORY));
            gallery.default_category = Some(0);

            mirror.create_dir(&mirror.category_dir(INITIAL_CATEGORY)?)?;
            DocumentStore::new(guard.working_path()).save(&gallery)?;
            guard.close()?;
        }

        Ok(library)
    }

    /// Returns the library root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the image mirror
    pub fn mirror(&self) -> MirrorStore {
        MirrorStore::new(self.root.join(&self.config.library.mirror_dir))
    }

    /// Returns the file guard for the gallery document
    pub fn guard(&self) -> FileGuard {
        FileGuard::for_gallery(&self.root, &self.config.library.name)
    }

    /// Returns true if the document is in its working form
    pub fn is_open(&self) -> bool {
        self.guard().is_open()
    }

    /// Opens the gallery and runs the consistency check
    ///
    /// On a failed check the repairs stay on disk, the document is switched
    /// back to its closed form and the corruption report is returned as the
    /// error.
    pub fn open_gallery(&self) -> Result<GallerySession<FileHost>> {
        let guard = self.guard();
        let opened_here = guard.open()?;
        let store = DocumentStore::new(guard.working_path());

        let mut gallery = match store.load() {
            Ok(gallery) => gallery,
            Err(e) => {
                guard.close()?;
                return Err(e);
            }
        };

        let mirror = self.mirror();
        let mut host = FileHost::new(store);

        match engine::check_and_commit(&mut gallery, &mirror, &mut host) {
            Ok(report) => Ok(GallerySession {
                gallery,
                mirror,
                guard,
                host,
                report,
                opened_here,
            }),
            Err(e) => {
                guard
                    .close()
                    .context("Failed to close gallery after a failed check")?;
                Err(e)
            }
        }
    }

    /// Runs the consistency check and leaves the gallery as it was found
    pub fn check(&self) -> Result<ConsistencyReport> {
        let session = self.open_gallery()?;
        let report = session.report().clone();
        session.finish()?;
        Ok(report)
    }

    /// Switches the document back to its closed form
    pub fn close(&self) -> Result<bool> {
        self.guard().close()
    }
}

/// An open gallery with its mirror and host
pub struct GallerySession<H: Host> {
    gallery: Gallery,
    mirror: MirrorStore,
    guard: FileGuard,
    host: H,
    report: ConsistencyReport,
    opened_here: bool,
}

impl<H: Host> GallerySession<H> {
    /// Report of the check that ran when the gallery was opened
    pub fn report(&self) -> &ConsistencyReport {
        &self.report
    }

    /// The gallery
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The image mirror
    pub fn mirror(&self) -> &MirrorStore {
        &self.mirror
    }

    /// Category names in container order
    pub fn categories(&self) -> Vec<&str> {
        self.gallery.category_names()
    }

    /// Name of the default category
    pub fn default_category(&self) -> Option<&str> {
        self.gallery.default_category().map(|c| c.name.as_str())
    }

    /// Looks up a category by name
    pub fn category(&self, name: &str) -> Result<&Category> {
        self.gallery
            .category(name)
            .ok_or_else(|| LibraryError::CategoryNotFound(name.to_string()).into())
    }

    /// Resolves an explicit category or falls back to the default one
    pub fn target(&self, category: Option<&str>) -> Result<&Category> {
        let idx = self.target_index(category)?;
        Ok(&self.gallery.categories[idx])
    }

    /// Adds an empty category and makes it the default
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        validate_name(name).map_err(LibraryError::from)?;

        if self.gallery.category(name).is_some() || self.mirror.category_exists(name) {
            return Err(LibraryError::CategoryExists(name.to_string()).into());
        }

        self.mirror.create_dir(&self.mirror.category_dir(name)?)?;
        self.gallery.categories.push(Category::new(name));
        self.gallery.default_category = Some(self.gallery.categories.len() - 1);

        self.commit()
    }

    /// Removes a category together with its folder
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let removed = self
            .gallery
            .remove_category(name)
            .ok_or_else(|| LibraryError::CategoryNotFound(name.to_string()))?;

        if self.mirror.category_exists(name) {
            self.mirror.remove_category_dir(name)?;
        }

        self.commit()?;
        Ok(removed)
    }

    /// Renames a category, its name-box and its folder
    pub fn rename_category(&mut self, from: &str, to: &str) -> Result<()> {
        validate_name(to).map_err(LibraryError::from)?;

        let idx = self
            .gallery
            .category_index(from)
            .ok_or_else(|| LibraryError::CategoryNotFound(from.to_string()))?;

        if from == to {
            return Ok(());
        }

        if self.gallery.category(to).is_some() || self.mirror.category_exists(to) {
            return Err(LibraryError::CategoryExists(to.to_string()).into());
        }

        let old_dir = self.mirror.category_dir(from)?;
        let new_dir = self.mirror.category_dir(to)?;
        if old_dir.is_dir() {
            self.mirror.rename(&old_dir, &new_dir)?;
        } else {
            self.mirror.create_dir(&new_dir)?;
        }

        self.gallery.categories[idx].set_name(to);
        self.commit()
    }

    /// Makes a category the target of shape mutations
    pub fn set_default_category(&mut self, name: &str) -> Result<()> {
        if !self.gallery.set_default(name) {
            return Err(LibraryError::CategoryNotFound(name.to_string()).into());
        }

        self.commit()
    }

    /// Adds a shape and exports its image
    ///
    /// Returns the name of the category the shape was added to.
    pub fn add_shape(&mut self, category: Option<&str>, name: &str, data: Vec<u8>) -> Result<String> {
        validate_shape_name(name)?;
        let idx = self.target_index(category)?;
        self.ensure_free(idx, name)?;

        let shape = Shape::new(name, data);
        let folder = self.folder(idx)?;
        self.host
            .export_image(&shape, &MirrorStore::image_path(&folder, name)?)?;
        self.gallery.categories[idx].push_shape(shape);

        self.commit()?;
        Ok(self.gallery.categories[idx].name.clone())
    }

    /// Removes a shape and its image
    pub fn remove_shape(&mut self, category: Option<&str>, name: &str) -> Result<Shape> {
        let idx = self.target_index(category)?;
        if !self.gallery.categories[idx].contains_shape(name) {
            return Err(self.shape_not_found(idx, name));
        }

        let image = MirrorStore::image_path(&self.folder(idx)?, name)?;
        if image.is_file() {
            self.mirror.delete_file(&image)?;
        }

        let shape = self.gallery.categories[idx]
            .remove_shape(name)
            .ok_or_else(|| self.shape_not_found(idx, name))?;

        self.commit()?;
        Ok(shape)
    }

    /// Renames a shape and its image
    pub fn rename_shape(&mut self, category: Option<&str>, from: &str, to: &str) -> Result<()> {
        validate_shape_name(to)?;
        let idx = self.target_index(category)?;
        let shape_idx = self.gallery.categories[idx]
            .shape_index(from)
            .ok_or_else(|| self.shape_not_found(idx, from))?;

        if from == to {
            return Ok(());
        }
        self.ensure_free(idx, to)?;

        let folder = self.folder(idx)?;
        let old_image = MirrorStore::image_path(&folder, from)?;
        let new_image = MirrorStore::image_path(&folder, to)?;

        // disk first, so a failed file operation leaves the shape as it was
        if old_image.is_file() {
            self.mirror.rename(&old_image, &new_image)?;
        } else {
            let shape = &self.gallery.categories[idx].shapes[shape_idx];
            self.host.export_image(shape, &new_image)?;
        }
        self.gallery.categories[idx].shapes[shape_idx].name = to.to_string();

        self.commit()
    }

    /// Moves a shape (and its image) to another category
    pub fn move_shape(&mut self, name: &str, from: Option<&str>, to: &str) -> Result<()> {
        let src = self.target_index(from)?;
        let dst = self.target_index(Some(to))?;
        if src == dst {
            return Ok(());
        }

        let shape_idx = self.gallery.categories[src]
            .shape_index(name)
            .ok_or_else(|| self.shape_not_found(src, name))?;
        self.ensure_free(dst, name)?;

        let src_image = MirrorStore::image_path(&self.folder(src)?, name)?;
        let dst_image = MirrorStore::image_path(&self.folder(dst)?, name)?;

        if src_image.is_file() {
            self.mirror.rename(&src_image, &dst_image)?;
        } else {
            let shape = &self.gallery.categories[src].shapes[shape_idx];
            self.host.export_image(shape, &dst_image)?;
        }

        let shape = self.gallery.categories[src].shapes.remove(shape_idx);
        self.gallery.categories[dst].push_shape(shape);

        self.commit()
    }

    /// Copies a shape into another category
    pub fn copy_shape(&mut self, name: &str, from: Option<&str>, to: &str) -> Result<()> {
        let src = self.target_index(from)?;
        let dst = self.target_index(Some(to))?;

        let shape = self.gallery.categories[src]
            .shape(name)
            .cloned()
            .ok_or_else(|| self.shape_not_found(src, name))?;
        self.ensure_free(dst, name)?;

        let folder = self.folder(dst)?;
        self.host
            .export_image(&shape, &MirrorStore::image_path(&folder, name)?)?;
        self.gallery.categories[dst].push_shape(shape);

        self.commit()
    }

    /// Appends the categories of a foreign gallery file
    ///
    /// The foreign gallery is reconciled in imported-file mode against this
    /// library's mirror: colliding folders get a numeric suffix and nothing
    /// already on disk is touched. Its findings are returned, not raised.
    pub fn import(&mut self, path: &Path) -> Result<ConsistencyReport> {
        let foreign = DocumentStore::new(path)
            .load()
            .with_context(|| format!("Failed to import gallery: {}", path.display()))?;

        let mut incoming = Gallery::imported(foreign.categories);
        for name in self.gallery.category_names() {
            // keep foreign categories away from names already in memory
            if !self.mirror.category_exists(name) {
                self.mirror.create_dir(&self.mirror.category_dir(name)?)?;
            }
        }

        let report = engine::check(&mut incoming, &self.mirror, &mut self.host)?;

        self.gallery.categories.extend(incoming.categories);
        if self.gallery.default_category.is_none() && !self.gallery.categories.is_empty() {
            self.gallery.default_category = Some(0);
        }

        self.commit()?;
        Ok(report)
    }

    /// Leaves the gallery open in its working form
    pub fn keep_open(self) {}

    /// Closes the gallery if this session opened it
    pub fn finish(self) -> Result<()> {
        if self.opened_here {
            self.guard.close()?;
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.host.commit(&self.gallery)?;
        self.host.protect_last_actions();
        Ok(())
    }

    fn target_index(&self, category: Option<&str>) -> Result<usize> {
        match category {
            Some(name) => self
                .gallery
                .category_index(name)
                .ok_or_else(|| LibraryError::CategoryNotFound(name.to_string()).into()),
            None => self
                .gallery
                .default_category
                .filter(|idx| *idx < self.gallery.categories.len())
                .ok_or_else(|| LibraryError::NoDefaultCategory.into()),
        }
    }

    /// Folder of a category, created if missing
    fn folder(&self, idx: usize) -> Result<PathBuf> {
        let folder = self.mirror.category_dir(&self.gallery.categories[idx].name)?;
        if !folder.is_dir() {
            self.mirror.create_dir(&folder)?;
        }
        Ok(folder)
    }

    fn ensure_free(&self, idx: usize, shape: &str) -> Result<()> {
        let category = &self.gallery.categories[idx];
        if category.contains_shape(shape) {
            return Err(LibraryError::ShapeExists {
                category: category.name.clone(),
                shape: shape.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn shape_not_found(&self, idx: usize, shape: &str) -> anyhow::Error {
        LibraryError::ShapeNotFound {
            category: self.gallery.categories[idx].name.clone(),
            shape: shape.to_string(),
        }
        .into()
    }
}

/// Shape names follow the general naming rules and may not impersonate a
/// name-box
fn validate_shape_name(name: &str) -> Result<(), LibraryError> {
    validate_name(name)?;
    if name == NAME_BOX_SHAPE_NAME {
        return Err(NameError::Reserved(name.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ConsistencyError, Finding};
    use crate::host::PROTECT_REPEAT;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Library) {
        let dir = TempDir::new().unwrap();
        let library = Library::init(dir.path(), None).unwrap();
        (dir, library)
    }

    fn images(session: &GallerySession<FileHost>, category: &str) -> Vec<String> {
        let mirror = session.mirror();
        mirror.list_images(&mirror.category_dir(category).unwrap()).unwrap()
    }

    #[test]
    fn init_creates_structure() {
        let (dir, library) = setup();

        assert!(dir.path().join(".gallery").is_dir());
        assert!(dir.path().join(".gallery/config.toml").is_file());
        assert!(dir.path().join("shapes/My Shapes").is_dir());
        assert!(library.guard().closed_path().is_file());
        assert!(!library.is_open());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        Library::init(dir.path(), Some("Icons")).unwrap();
        let library = Library::init(dir.path(), Some("Ignored")).unwrap();

        assert_eq!(library.config().library.name, "Icons");
        assert!(dir.path().join("Icons.gallery").is_file());
    }

    #[test]
    fn init_rejects_bad_name() {
        let dir = TempDir::new().unwrap();
        assert!(Library::init(dir.path(), Some("a/b")).is_err());
    }

    #[test]
    fn open_non_library_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Library::open(dir.path()).is_err());
    }

    #[test]
    fn open_and_finish() {
        let (_dir, library) = setup();

        let session = library.open_gallery().unwrap();
        assert!(library.is_open());
        assert!(session.report().is_consistent());
        assert_eq!(session.categories(), vec![INITIAL_CATEGORY]);
        assert_eq!(session.default_category(), Some(INITIAL_CATEGORY));

        session.finish().unwrap();
        assert!(!library.is_open());
    }

    #[test]
    fn keep_open_then_close() {
        let (_dir, library) = setup();

        library.open_gallery().unwrap().keep_open();
        assert!(library.is_open());

        // a session on an already open gallery does not close it
        library.open_gallery().unwrap().finish().unwrap();
        assert!(library.is_open());

        assert!(library.close().unwrap());
        assert!(!library.is_open());
    }

    #[test]
    fn shape_lifecycle() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();

        let category = session.add_shape(None, "Line", b"line".to_vec()).unwrap();
        assert_eq!(category, INITIAL_CATEGORY);
        assert_eq!(images(&session, INITIAL_CATEGORY), vec!["Line"]);

        session.rename_shape(None, "Line", "Arrow").unwrap();
        assert_eq!(images(&session, INITIAL_CATEGORY), vec!["Arrow"]);
        assert_eq!(
            session.target(None).unwrap().shape_names(),
            vec!["Arrow"]
        );

        let removed = session.remove_shape(None, "Arrow").unwrap();
        assert_eq!(removed.data, b"line".to_vec());
        assert!(images(&session, INITIAL_CATEGORY).is_empty());

        session.finish().unwrap();
        assert!(library.check().unwrap().is_consistent());
    }

    #[test]
    fn failed_rename_keeps_the_shape_name() {
        let (dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        session.add_shape(None, "Line", b"line".to_vec()).unwrap();

        // a folder in the way makes the image rename fail
        let folder = dir.path().join("shapes").join(INITIAL_CATEGORY);
        fs::create_dir(folder.join("Arrow.png")).unwrap();
        fs::write(folder.join("Arrow.png").join("keep"), b"x").unwrap();

        assert!(session.rename_shape(None, "Line", "Arrow").is_err());
        assert_eq!(session.target(None).unwrap().shape_names(), vec!["Line"]);
        assert!(folder.join("Line.png").is_file());
    }

    #[test]
    fn rename_without_image_exports_under_new_name() {
        let (dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        session.add_shape(None, "Line", b"line".to_vec()).unwrap();

        let folder = dir.path().join("shapes").join(INITIAL_CATEGORY);
        fs::remove_file(folder.join("Line.png")).unwrap();

        session.rename_shape(None, "Line", "Arrow").unwrap();
        assert_eq!(session.target(None).unwrap().shape_names(), vec!["Arrow"]);
        assert_eq!(fs::read(folder.join("Arrow.png")).unwrap(), b"line");
    }

    #[test]
    fn default_category_survives_reopen() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        session.add_category("Arrows").unwrap();
        session.finish().unwrap();

        let session = library.open_gallery().unwrap();
        assert!(session.report().is_consistent());
        assert_eq!(session.default_category(), Some("Arrows"));
        session.finish().unwrap();
    }

    #[test]
    fn every_mutation_is_committed_and_protected() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        let after_open = session.host().checkpoints();

        session.add_shape(None, "Line", Vec::new()).unwrap();
        session.add_category("Arrows").unwrap();

        assert_eq!(session.host().checkpoints(), after_open + 2 * PROTECT_REPEAT);
        let saved = session.host().store().load().unwrap();
        assert_eq!(saved.category_names(), vec![INITIAL_CATEGORY, "Arrows"]);
    }

    #[test]
    fn duplicate_and_reserved_shape_names_are_rejected() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();

        session.add_shape(None, "Line", Vec::new()).unwrap();
        let err = session.add_shape(None, "Line", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        assert!(session
            .add_shape(None, NAME_BOX_SHAPE_NAME, Vec::new())
            .is_err());
        assert!(session.add_shape(None, "a:b", Vec::new()).is_err());
    }

    #[test]
    fn category_lifecycle() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();

        session.add_category("Arrows").unwrap();
        assert_eq!(session.default_category(), Some("Arrows"));
        session.add_shape(None, "Line", b"l".to_vec()).unwrap();

        session.rename_category("Arrows", "Pointers").unwrap();
        assert!(!session.mirror().category_exists("Arrows"));
        assert_eq!(images(&session, "Pointers"), vec!["Line"]);
        let pointers = session.category("Pointers").unwrap();
        let name_box = pointers.name_box_index().unwrap();
        assert_eq!(pointers.shapes[name_box].name_box_name(), Some("Pointers"));

        assert!(session.add_category("Pointers").is_err());

        session.set_default_category(INITIAL_CATEGORY).unwrap();
        session.remove_category("Pointers").unwrap();
        assert!(!session.mirror().category_exists("Pointers"));
        assert_eq!(session.categories(), vec![INITIAL_CATEGORY]);
        assert_eq!(session.default_category(), Some(INITIAL_CATEGORY));

        session.finish().unwrap();
        assert!(library.check().unwrap().is_consistent());
    }

    #[test]
    fn move_and_copy_between_categories() {
        let (_dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        session.add_category("Arrows").unwrap();
        session.set_default_category(INITIAL_CATEGORY).unwrap();
        session.add_shape(None, "Star", b"s".to_vec()).unwrap();
        session.add_shape(None, "Line", b"l".to_vec()).unwrap();

        session.move_shape("Line", None, "Arrows").unwrap();
        assert_eq!(images(&session, INITIAL_CATEGORY), vec!["Star"]);
        assert_eq!(images(&session, "Arrows"), vec!["Line"]);

        session.copy_shape("Star", None, "Arrows").unwrap();
        assert_eq!(images(&session, INITIAL_CATEGORY), vec!["Star"]);
        assert_eq!(images(&session, "Arrows"), vec!["Line", "Star"]);

        assert!(session.copy_shape("Star", None, "Arrows").is_err());
        assert!(session.move_shape("Missing", None, "Arrows").is_err());

        session.finish().unwrap();
        assert!(library.check().unwrap().is_consistent());
    }

    #[test]
    fn corrupted_gallery_fails_to_open_and_stays_closed() {
        let (dir, library) = setup();
        let mut session = library.open_gallery().unwrap();
        session.add_shape(None, "Line", b"l".to_vec()).unwrap();
        session.finish().unwrap();

        let folder = dir.path().join("shapes").join(INITIAL_CATEGORY);
        fs::remove_file(folder.join("Line.png")).unwrap();

        let err = library.open_gallery().err().unwrap();
        match err.downcast_ref::<ConsistencyError>() {
            Some(ConsistencyError::Corrupted(report)) => {
                assert!(report.image_lost());
            }
            None => panic!("unexpected error: {err}"),
        }
        assert!(!library.is_open());

        // the repair was applied, so the next open succeeds
        assert!(folder.join("Line.png").is_file());
        assert!(library.check().unwrap().is_consistent());
    }

    #[test]
    fn import_appends_without_touching_existing_folders() {
        let (dir, library) = setup();
        {
            let mut session = library.open_gallery().unwrap();
            session.add_shape(None, "Star", b"mine".to_vec()).unwrap();
            session.finish().unwrap();
        }

        let mut foreign_cat = Category::new(INITIAL_CATEGORY);
        foreign_cat.push_shape(Shape::new("Star", b"theirs".to_vec()));
        let foreign = Gallery {
            categories: vec![foreign_cat, Category::bare("Slide1", vec![Shape::new("Dot", b"d".to_vec())])],
            default_category: None,
            imported: false,
        };
        let foreign_path = dir.path().join("foreign.json");
        DocumentStore::new(&foreign_path).save(&foreign).unwrap();

        let mut session = library.open_gallery().unwrap();
        let report = session.import(&foreign_path).unwrap();

        let suffixed = format!("{} 1", INITIAL_CATEGORY);
        assert!(report.findings.contains(&Finding::ImportNameCollision {
            category: INITIAL_CATEGORY.to_string(),
            folder: suffixed.clone(),
        }));
        assert_eq!(
            session.categories(),
            vec![INITIAL_CATEGORY, suffixed.as_str(), "Untitled Category 1"]
        );

        let mirror = session.mirror().clone();
        let mine = mirror.category_dir(INITIAL_CATEGORY).unwrap().join("Star.png");
        let theirs = mirror.category_dir(&suffixed).unwrap().join("Star.png");
        assert_eq!(fs::read(mine).unwrap(), b"mine");
        assert_eq!(fs::read(theirs).unwrap(), b"theirs");

        session.finish().unwrap();
        assert!(library.check().unwrap().is_consistent());
    }
}
