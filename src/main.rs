//! Shape Gallery - categorized shapes with a self-repairing image mirror

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shape_gallery::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
