//! Notebook data model
//!
//! This module defines a serde model for the Jupyter notebook JSON tree
//! (nbformat v4). Only the fields the transformations interpret are typed;
//! everything else (cell ids, attachments, custom metadata) is carried through
//! untouched via `#[serde(flatten)]` so that round-tripping a notebook does not
//! lose information.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::errors::AppError;

/// A parsed notebook document
///
/// Cell order is significant and preserved across transformation. The
/// document-level `metadata`, `nbformat` and `nbformat_minor` fields pass
/// through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Value,
    pub nbformat: i64,
    pub nbformat_minor: i64,
}

impl Notebook {
    /// Parse a notebook from its JSON text
    pub fn from_str(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the notebook back to JSON with default (non-pretty) formatting
    pub fn to_json_string(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One notebook cell, discriminated by `cell_type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cell_type")]
pub enum Cell {
    #[serde(rename = "code")]
    Code(CodeCell),
    #[serde(rename = "markdown")]
    Markdown(TextCell),
    #[serde(rename = "raw")]
    Raw(TextCell),
}

impl Cell {
    /// Cell metadata, regardless of cell type
    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Cell::Code(cell) => &cell.metadata,
            Cell::Markdown(cell) | Cell::Raw(cell) => &cell.metadata,
        }
    }

    /// Mutable cell metadata, regardless of cell type
    pub fn metadata_mut(&mut self) -> &mut CellMetadata {
        match self {
            Cell::Code(cell) => &mut cell.metadata,
            Cell::Markdown(cell) | Cell::Raw(cell) => &mut cell.metadata,
        }
    }

    /// The cell's literal source text
    pub fn source(&self) -> &str {
        match self {
            Cell::Code(cell) => &cell.source,
            Cell::Markdown(cell) | Cell::Raw(cell) => &cell.source,
        }
    }
}

/// An executable code cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeCell {
    #[serde(default, deserialize_with = "string_or_lines")]
    pub source: String,
    #[serde(default)]
    pub metadata: CellMetadata,
    pub execution_count: Option<i64>,
    #[serde(default)]
    pub outputs: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A markdown or raw cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextCell {
    #[serde(default, deserialize_with = "string_or_lines")]
    pub source: String,
    #[serde(default)]
    pub metadata: CellMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cell metadata
///
/// Tags drive the redaction policy and are modeled as an unordered string set.
/// All other metadata fields are carried through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(default)]
    pub tags: HashSet<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserialize a cell source that is either a single string or a list of lines
///
/// The nbformat serialization allows both; the on-disk convention is a list of
/// lines with embedded newlines, which concatenates back to the literal text.
fn string_or_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Source {
        Text(String),
        Lines(Vec<String>),
    }

    Ok(match Source::deserialize(deserializer)? {
        Source::Text(text) => text,
        Source::Lines(lines) => lines.concat(),
    })
}
