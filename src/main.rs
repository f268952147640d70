#![forbid(unsafe_code)]

//! Teaching Notebook Publisher
//!
//! This program exports Jupyter notebooks to an instructor-facing HTML file and
//! a cleaned, student-facing notebook. In the cleaned notebook, cells tagged
//! with `remove` are dropped, code cells tagged with `keep` are copied
//! verbatim, and in all other code cells only the content enclosed by
//! `#<keep>` and `#</keep>` marker lines survives. The HTML file keeps the
//! full solutions but gets a style injected that discourages copy-paste of the
//! code input areas.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

// Import modules
mod commands;
mod errors;
mod markers;
mod notebook;
mod present;
mod redact;
mod render;
mod utils;

use crate::commands::export::export_notebooks;
use crate::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "nbpublish")]
#[command(about = "Export teaching notebooks to instructor HTML and redacted student copies")]
struct Cli {
    /// Notebook files or directories containing notebooks
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// File extension to filter by
    #[arg(short, long, default_value = "ipynb")]
    extension: String,

    /// Output directory (files are exported to subdirectory 'build')
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

/// Main function
///
/// This function parses command-line arguments, initializes the logger,
/// and runs the export over all selected notebook files.
fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    export_notebooks(&cli.paths, &cli.extension, &cli.outdir)
}
