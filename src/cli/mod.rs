//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Gallery lifecycle | `init`, `open`, `close`, `check`, `status` |
//! | Category | Category management | `category add`, `category list`, `category default` |
//! | Shape | Shape management | `shape add`, `shape move`, `shape list` |
//! | Import | Merge another gallery | `import other.gallery` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including every finding of
//! the consistency check:
//! ```bash
//! gallery --verbose check
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod category;
mod output;
mod shape_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
