//! Shape CLI commands

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::app::with_session;
use super::output::Output;

#[derive(Subcommand)]
pub enum ShapeCommands {
    /// Add a shape and export its image
    Add {
        /// Shape name
        name: String,

        /// Target category (defaults to the default category)
        #[arg(long, short)]
        category: Option<String>,

        /// File holding the shape's image payload
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Remove a shape and its image
    Remove {
        /// Shape name
        name: String,

        /// Category (defaults to the default category)
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Rename a shape and its image
    Rename {
        /// Current name
        from: String,

        /// New name
        to: String,

        /// Category (defaults to the default category)
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Move a shape to another category
    Move {
        /// Shape name
        name: String,

        /// Destination category
        #[arg(long)]
        to: String,

        /// Source category (defaults to the default category)
        #[arg(long)]
        from: Option<String>,
    },

    /// Copy a shape into another category
    Copy {
        /// Shape name
        name: String,

        /// Destination category
        #[arg(long)]
        to: String,

        /// Source category (defaults to the default category)
        #[arg(long)]
        from: Option<String>,
    },

    /// List shapes of a category
    List {
        /// Category (defaults to the default category)
        #[arg(long, short)]
        category: Option<String>,
    },
}

pub fn run(cmd: ShapeCommands, output: &Output) -> Result<()> {
    match cmd {
        ShapeCommands::Add { name, category, from } => {
            add(output, &name, category.as_deref(), from)
        }
        ShapeCommands::Remove { name, category } => remove(output, &name, category.as_deref()),
        ShapeCommands::Rename { from, to, category } => {
            rename(output, &from, &to, category.as_deref())
        }
        ShapeCommands::Move { name, to, from } => {
            with_session(output, |session| session.move_shape(&name, from.as_deref(), &to))?;
            output.success(&format!("Moved shape {} to {}", name, to));
            Ok(())
        }
        ShapeCommands::Copy { name, to, from } => {
            with_session(output, |session| session.copy_shape(&name, from.as_deref(), &to))?;
            output.success(&format!("Copied shape {} to {}", name, to));
            Ok(())
        }
        ShapeCommands::List { category } => list(output, category.as_deref()),
    }
}

fn add(output: &Output, name: &str, category: Option<&str>, from: Option<PathBuf>) -> Result<()> {
    let data = match from {
        Some(path) => {
            output.verbose_ctx("shape", &format!("Reading payload from {}", path.display()));
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => Vec::new(),
    };

    let category = with_session(output, |session| session.add_shape(category, name, data))?;
    output.success(&format!("Added shape {} to {}", name, category));
    Ok(())
}

fn remove(output: &Output, name: &str, category: Option<&str>) -> Result<()> {
    with_session(output, |session| session.remove_shape(category, name))?;
    output.success(&format!("Removed shape: {}", name));
    Ok(())
}

fn rename(output: &Output, from: &str, to: &str, category: Option<&str>) -> Result<()> {
    with_session(output, |session| session.rename_shape(category, from, to))?;
    output.success(&format!("Renamed shape: {} -> {}", from, to));
    Ok(())
}

fn list(output: &Output, category: Option<&str>) -> Result<()> {
    with_session(output, |session| {
        let target = session.target(category)?;
        let shapes: Vec<&str> = target.user_shapes().map(|s| s.name.as_str()).collect();

        if output.is_json() {
            output.data(&serde_json::json!({
                "category": target.name,
                "shapes": shapes,
            }));
        } else if shapes.is_empty() {
            println!("No shapes in {}.", target.name);
        } else {
            println!("{}:", target.name);
            for shape in shapes {
                output.row(&["", shape]);
            }
        }

        Ok(())
    })
}
