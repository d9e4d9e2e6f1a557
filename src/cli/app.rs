//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{category, shape_cmd};
use crate::engine::{ConsistencyError, ConsistencyReport};
use crate::host::FileHost;
use crate::storage::{Config, GallerySession, Library};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(author, version, about = "Categorized shapes with a self-repairing image mirror")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shape gallery
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Gallery name (defaults to "My Shapes")
        #[arg(long, short)]
        name: Option<String>,
    },

    /// Open the gallery and leave it in its working form
    Open,

    /// Close the gallery
    Close,

    /// Run the consistency check and report what was repaired
    Check,

    /// Show gallery status overview
    Status,

    /// Append the categories of another gallery file
    Import {
        /// Gallery file to import
        path: PathBuf,
    },

    /// Manage categories
    #[command(subcommand)]
    Category(category::CategoryCommands),

    /// Manage shapes
    #[command(subcommand)]
    Shape(shape_cmd::ShapeCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()
            .map(|global| global.default_format.into())
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Shape gallery starting");

    match cli.command {
        Commands::Init { path, name } => {
            output.verbose_ctx("init", &format!("Initializing gallery at: {}", path));
            let library = Library::init(&path, name.as_deref())?;
            output.verbose_ctx(
                "init",
                &format!("Gallery file: {}", library.guard().closed_path().display()),
            );
            output.success(&format!("Initialized shape gallery at {}", library.root().display()));
        }

        Commands::Open => open(&output)?,
        Commands::Close => close(&output)?,
        Commands::Check => check(&output)?,
        Commands::Status => status(&output)?,
        Commands::Import { path } => import(&output, &path)?,

        Commands::Category(cmd) => category::run(cmd, &output)?,
        Commands::Shape(cmd) => shape_cmd::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Opens the gallery in the current library, runs `f` on it and closes it
/// again if it was closed before
pub(super) fn with_session<T>(
    output: &Output,
    f: impl FnOnce(&mut GallerySession<FileHost>) -> Result<T>,
) -> Result<T> {
    let library = Library::open_current()?;
    output.verbose_ctx("open", &format!("Library root: {}", library.root().display()));

    let mut session = open_logged(output, &library)?;
    let result = f(&mut session);
    session.finish()?;
    result
}

/// Opens the gallery, logging the findings of a failed check before
/// returning the error
fn open_logged(output: &Output, library: &Library) -> Result<GallerySession<FileHost>> {
    match library.open_gallery() {
        Ok(session) => {
            output.findings(session.report());
            Ok(session)
        }
        Err(e) => {
            if let Some(ConsistencyError::Corrupted(report)) = e.downcast_ref() {
                output.findings(report);
                if output.is_json() {
                    output.data(&report_json(report));
                }
            }
            Err(e)
        }
    }
}

fn report_json(report: &ConsistencyReport) -> serde_json::Value {
    serde_json::json!({
        "consistent": report.is_consistent(),
        "categories": report.categories,
        "default_category": report.default_category,
        "duplicate_found": report.duplicate_found(),
        "image_lost": report.image_lost(),
        "shape_lost": report.shape_lost(),
        "orphan_folder_found": report.orphan_folder_found(),
        "findings": report.findings,
    })
}

fn open(output: &Output) -> Result<()> {
    let library = Library::open_current()?;
    let session = open_logged(output, &library)?;

    if output.is_json() {
        output.data(&report_json(session.report()));
    } else {
        output.success(&format!(
            "Opened {} ({} categories)",
            library.config().library.name,
            session.categories().len()
        ));
    }

    session.keep_open();
    Ok(())
}

fn close(output: &Output) -> Result<()> {
    let library = Library::open_current()?;

    if library.close()? {
        output.success(&format!("Closed {}", library.config().library.name));
    } else {
        output.success(&format!("{} is already closed", library.config().library.name));
    }

    Ok(())
}

fn check(output: &Output) -> Result<()> {
    let library = Library::open_current()?;
    let session = open_logged(output, &library)?;
    let report = session.report().clone();
    session.finish()?;

    if output.is_json() {
        output.data(&report_json(&report));
    } else {
        output.success(&report.to_string());
    }

    Ok(())
}

fn status(output: &Output) -> Result<()> {
    let library = Library::open_current()?;
    let was_open = library.is_open();
    let name = library.config().library.name.clone();

    with_session(output, |session| {
        let categories: Vec<_> = session
            .gallery()
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.user_shapes().count()))
            .collect();

        if output.is_json() {
            output.data(&serde_json::json!({
                "name": name,
                "root": library.root(),
                "open": was_open,
                "default_category": session.default_category(),
                "categories": categories
                    .iter()
                    .map(|(name, shapes)| serde_json::json!({ "name": name, "shapes": shapes }))
                    .collect::<Vec<_>>(),
            }));
        } else {
            println!("Gallery: {}", name);
            println!("Root: {}", library.root().display());
            println!("State: {}", if was_open { "open" } else { "closed" });
            println!(
                "Default category: {}",
                session.default_category().unwrap_or("(none)")
            );
            println!();
            println!("{:<30} SHAPES", "CATEGORY");
            println!("{}", "-".repeat(40));
            for (name, shapes) in &categories {
                println!("{:<30} {}", name, shapes);
            }
        }

        Ok(())
    })
}

fn import(output: &Output, path: &std::path::Path) -> Result<()> {
    output.verbose_ctx("import", &format!("Importing: {}", path.display()));

    let report = with_session(output, |session| session.import(path))?;
    output.findings(&report);

    if output.is_json() {
        output.data(&report_json(&report));
    } else {
        output.success(&format!(
            "Imported {} categories: {}",
            report.categories.len(),
            report.categories.join(", ")
        ));
    }

    Ok(())
}
