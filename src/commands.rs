//! Command implementations
//!
//! This module contains the implementation of all CLI commands.
//!
//! # Available Commands
//!
//! - [`export`] - Export notebooks to instructor HTML and redacted student copies

pub mod export;
