//! Redaction of solution code for the student-facing notebook
//!
//! This module produces the cleaned notebook handed out to students:
//!
//! - cells tagged `remove` are dropped regardless of type,
//! - code cells tagged `keep` are copied verbatim,
//! - all other code cells retain only their `#<keep>`/`#</keep>` regions,
//! - execution counts and outputs are cleared,
//! - tags never leak into the output,
//! - runs of empty code cells collapse to a single empty cell.

use crate::errors::AppError;
use crate::markers::extract_kept_regions;
use crate::notebook::{Cell, Notebook};

/// Tag that drops a cell from the student notebook entirely
const TAG_REMOVE: &str = "remove";
/// Tag that copies a code cell's source verbatim, bypassing marker extraction
const TAG_KEEP: &str = "keep";

/// Produce the redacted student notebook
///
/// The input is not mutated; the result is derived from a fresh copy. Cell
/// order is preserved. Document-level metadata passes through unchanged.
///
/// # Errors
///
/// Returns an error only if the marker regex fails to compile; malformed
/// marker pairs are not an error and simply yield no kept content.
pub fn redact(notebook: &Notebook) -> Result<Notebook, AppError> {
    let mut redacted = notebook.clone();
    let cells = std::mem::take(&mut redacted.cells);

    let mut accumulator = CellAccumulator::new();
    for mut cell in cells {
        // obtain the tags, then clear them so none leak to students
        let tags = std::mem::take(&mut cell.metadata_mut().tags);

        // removal wins over every other rule
        if tags.contains(TAG_REMOVE) {
            continue;
        }

        if let Cell::Code(code) = &mut cell {
            code.execution_count = None;
            code.outputs.clear();

            if !tags.contains(TAG_KEEP) {
                code.source = extract_kept_regions(&code.source)?;
            }
        }

        accumulator.push(cell);
    }

    redacted.cells = accumulator.into_cells();
    Ok(redacted)
}

/// Accumulator implementing the empty-code-cell collapse rule
///
/// An emitted code cell with empty source is suppressed when the previously
/// emitted cell was also an empty code cell. Any non-code cell resets the
/// tracking, so empty code cells separated by narrative survive.
#[derive(Debug, Default)]
pub struct CellAccumulator {
    cells: Vec<Cell>,
    last_was_empty_code_cell: bool,
}

impl CellAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transformed cell, applying the collapse rule
    pub fn push(&mut self, cell: Cell) {
        match &cell {
            Cell::Code(code) => {
                let is_empty = code.source.is_empty();
                if is_empty && self.last_was_empty_code_cell {
                    return;
                }
                self.last_was_empty_code_cell = is_empty;
            }
            _ => self.last_was_empty_code_cell = false,
        }

        self.cells.push(cell);
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
