//! Category CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::with_session;
use super::output::Output;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add an empty category and make it the default
    Add {
        /// Category name
        name: String,
    },

    /// Remove a category, its shapes and its folder
    Remove {
        /// Category name
        name: String,
    },

    /// Rename a category and its folder
    Rename {
        /// Current name
        from: String,

        /// New name
        to: String,
    },

    /// List categories
    List,

    /// Show or set the default category
    Default {
        /// Category to make the default
        name: Option<String>,
    },
}

pub fn run(cmd: CategoryCommands, output: &Output) -> Result<()> {
    match cmd {
        CategoryCommands::Add { name } => add(output, &name),
        CategoryCommands::Remove { name } => remove(output, &name),
        CategoryCommands::Rename { from, to } => rename(output, &from, &to),
        CategoryCommands::List => list(output),
        CategoryCommands::Default { name } => default(output, name.as_deref()),
    }
}

fn add(output: &Output, name: &str) -> Result<()> {
    with_session(output, |session| session.add_category(name))?;
    output.success(&format!("Added category: {}", name));
    Ok(())
}

fn remove(output: &Output, name: &str) -> Result<()> {
    let removed = with_session(output, |session| session.remove_category(name))?;
    output.verbose_ctx(
        "category",
        &format!("Removed {} shapes with {}", removed.user_shapes().count(), name),
    );
    output.success(&format!("Removed category: {}", name));
    Ok(())
}

fn rename(output: &Output, from: &str, to: &str) -> Result<()> {
    with_session(output, |session| session.rename_category(from, to))?;
    output.success(&format!("Renamed category: {} -> {}", from, to));
    Ok(())
}

fn list(output: &Output) -> Result<()> {
    with_session(output, |session| {
        let default = session.default_category();
        let categories = session.categories();

        if output.is_json() {
            output.data(&serde_json::json!({
                "categories": categories,
                "default": default,
            }));
        } else if categories.is_empty() {
            println!("No categories found.");
        } else {
            for name in categories {
                let marker = if Some(name) == default { "*" } else { " " };
                output.row(&[marker, name]);
            }
        }

        Ok(())
    })
}

fn default(output: &Output, name: Option<&str>) -> Result<()> {
    let current = with_session(output, |session| {
        if let Some(name) = name {
            session.set_default_category(name)?;
        }
        Ok(session.default_category().map(str::to_string))
    })?;

    match (name, current) {
        (Some(name), _) => output.success(&format!("Default category: {}", name)),
        (None, Some(current)) => output.success(&current),
        (None, None) => output.success("No default category"),
    }

    Ok(())
}
