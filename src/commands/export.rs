//! Export command implementation
//!
//! This module drives the two exports for each input notebook:
//!
//! 1. the instructor HTML (full solutions, copy-guard style) under
//!    `<outdir>/build/solutions/<stem>.html`, and
//! 2. the redacted student notebook under `<outdir>/build/<stem>.<ext>`.
//!
//! Each input file is read once; both artifacts are derived independently from
//! that single parsed document.

use log::{debug, info};
use std::{fs, path::Path, path::PathBuf};

use crate::{
    errors::AppError,
    notebook::Notebook,
    present::present,
    redact::redact,
    utils::find_notebook_files,
};

/// Export all notebooks found under `paths`
///
/// This function:
/// 1. Collects notebook files from the given paths (directories are listed
///    non-recursively, filtered by `extension`)
/// 2. Creates `<outdir>/build` and `<outdir>/build/solutions`
/// 3. For each notebook, writes the instructor HTML and the redacted copy
///
/// # Arguments
///
/// * `paths` - Input files or directories
/// * `extension` - File extension to filter by (without the leading dot)
/// * `outdir` - Output root directory; artifacts go to its `build` subdirectory
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if something goes wrong.
///
/// # Errors
///
/// Returns an error if:
/// - The output directories cannot be created
/// - An input file cannot be read or parsed as a notebook
/// - An output file cannot be written
pub fn export_notebooks(
    paths: &[PathBuf],
    extension: &str,
    outdir: &Path,
) -> Result<(), AppError> {
    let files = find_notebook_files(paths, extension)?;
    info!("Found {} notebook(s) to export", files.len());

    let build_dir = outdir.join("build");
    let solutions_dir = build_dir.join("solutions");
    if !solutions_dir.exists() {
        debug!("Creating output directory: {:?}", solutions_dir);
        fs::create_dir_all(&solutions_dir)?;
    }

    for file in files {
        info!("Processing {:?}", file.file_name().unwrap_or_default());
        export_notebook(&file, extension, &build_dir, &solutions_dir)?;
    }

    info!("Export completed successfully");
    Ok(())
}

/// Export a single notebook file to both artifacts
fn export_notebook(
    file: &Path,
    extension: &str,
    build_dir: &Path,
    solutions_dir: &Path,
) -> Result<(), AppError> {
    let stem = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| AppError::InvalidNotebook {
            file: file.display().to_string(),
            reason: "File name is not valid UTF-8".to_string(),
        })?;

    let content = fs::read_to_string(file)?;
    let notebook = Notebook::from_str(&content)?;

    // instructor copy: full solutions rendered to HTML
    let html = present(&notebook, stem)?;
    let html_path = solutions_dir.join(format!("{stem}.html"));
    fs::write(&html_path, html)?;
    info!("Writing file {:?}", html_path);

    // student copy: redacted notebook, default (non-pretty) JSON
    let redacted = redact(&notebook)?;
    let clean_path = build_dir.join(format!("{stem}.{extension}"));
    fs::write(&clean_path, redacted.to_json_string()?)?;
    info!("Writing file {:?}", clean_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample_notebook_json() -> String {
        json!({
            "cells": [
                {
                    "cell_type": "markdown",
                    "source": ["# Exercise 1\n"],
                    "metadata": {}
                },
                {
                    "cell_type": "code",
                    "source": [
                        "#<keep>\n",
                        "x = ...\n",
                        "#</keep>\n",
                        "x = secret()\n"
                    ],
                    "metadata": {"tags": ["exercise"]},
                    "execution_count": 2,
                    "outputs": [
                        {"output_type": "stream", "name": "stdout", "text": ["42\n"]}
                    ]
                }
            ],
            "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3"}},
            "nbformat": 4,
            "nbformat_minor": 5
        })
        .to_string()
    }

    #[test]
    fn test_export_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lecture1.ipynb");
        fs::write(&input, sample_notebook_json()).unwrap();

        export_notebooks(&[input], "ipynb", dir.path()).unwrap();

        let html_path = dir.path().join("build/solutions/lecture1.html");
        let clean_path = dir.path().join("build/lecture1.ipynb");
        assert!(html_path.is_file());
        assert!(clean_path.is_file());

        // instructor copy keeps the solution, student copy does not
        let html = fs::read_to_string(html_path).unwrap();
        assert!(html.contains("secret()"));
        assert!(html.contains("user-select: none"));

        let clean: Value =
            serde_json::from_str(&fs::read_to_string(clean_path).unwrap()).unwrap();
        assert_eq!(clean["cells"][1]["source"], json!("x = ...\n"));
        assert_eq!(clean["cells"][1]["metadata"]["tags"], json!([]));
        assert_eq!(clean["cells"][1]["execution_count"], Value::Null);
        assert_eq!(clean["cells"][1]["outputs"], json!([]));
        assert_eq!(clean["metadata"]["kernelspec"]["name"], json!("python3"));
    }

    #[test]
    fn test_export_skips_non_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a notebook").unwrap();

        export_notebooks(&[dir.path().to_path_buf()], "ipynb", dir.path()).unwrap();

        assert!(!dir.path().join("build/notes.html").exists());
        assert!(!dir.path().join("build/solutions/notes.html").exists());
    }

    #[test]
    fn test_export_propagates_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.ipynb");
        fs::write(&input, "{ not json").unwrap();

        let result = export_notebooks(&[input], "ipynb", dir.path());
        assert!(matches!(result, Err(AppError::JsonError(_))));
    }
}
