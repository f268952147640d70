//! Error types for the application
//!
//! This module defines all error types used throughout the application using the
//! `thiserror` crate. Each error variant provides detailed context about what went wrong.

use thiserror::Error;

/// Application error types
///
/// This enum represents all possible errors that can occur during the execution
/// of the program. Each variant includes relevant context information.
#[derive(Error, Debug)]
pub enum AppError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Regex error
    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// A notebook file that could not be interpreted
    #[error("Invalid notebook {file}: {reason}")]
    InvalidNotebook { file: String, reason: String },
    /// HTML parsing error
    #[error("HTML parsing error in {file}: {reason}")]
    HtmlParsingError { file: String, reason: String },
}
