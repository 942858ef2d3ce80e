//! Immutable snapshot of one loaded sheet export.

use crate::cell::{Cell, GridLine};
use crate::error::{Result, SheetError};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Rows, columns and cells of one successfully loaded export.
///
/// Cells are keyed by name and keep document order, so everything derived
/// from a snapshot iterates deterministically. A snapshot is never patched:
/// reloading produces a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetSnapshot {
    rows: Vec<GridLine>,
    cols: Vec<GridLine>,
    cells: IndexMap<String, Cell>,
}

impl SheetSnapshot {
    /// Build a snapshot from already-decoded parts, enforcing the sheet invariants.
    pub fn from_parts(rows: Vec<GridLine>, cols: Vec<GridLine>, cells: Vec<Cell>) -> Result<Self> {
        validate_lines("rows", &rows)?;
        validate_lines("cols", &cols)?;

        let mut by_name = IndexMap::with_capacity(cells.len());
        for cell in cells {
            if !cell.weight.is_finite() || cell.weight < 0.0 {
                return Err(SheetError::malformed(format!(
                    "cell '{}' has invalid weight {}",
                    cell.name, cell.weight
                )));
            }
            if by_name.contains_key(&cell.name) {
                return Err(SheetError::malformed(format!(
                    "duplicate cell name '{}'",
                    cell.name
                )));
            }
            by_name.insert(cell.name.clone(), cell);
        }

        Ok(Self {
            rows,
            cols,
            cells: by_name,
        })
    }

    /// Parse a decoded export document of the form `{"sheet": {"rows", "cols", "cells"}}`.
    ///
    /// `rows` and `cols` must be present and be arrays; a missing `cells` list
    /// is treated as an empty sheet.
    pub fn parse(raw: &Value) -> Result<Self> {
        let sheet = raw
            .get("sheet")
            .ok_or_else(|| SheetError::malformed("missing 'sheet' object"))?;

        let rows = grid_lines(sheet, "rows")?;
        let cols = grid_lines(sheet, "cols")?;

        let cells = match sheet.get("cells") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    Cell::deserialize(item).map_err(|e| {
                        SheetError::malformed(format!("cell at index {idx}: {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(SheetError::malformed("'cells' must be an array")),
        };

        let snapshot = Self::from_parts(rows, cols, cells)?;
        tracing::debug!(
            rows = snapshot.rows.len(),
            cols = snapshot.cols.len(),
            cells = snapshot.cells.len(),
            "parsed sheet snapshot"
        );
        Ok(snapshot)
    }

    /// Parse an export document from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| SheetError::Parse(format!("Invalid JSON: {e}")))?;
        Self::parse(&value)
    }

    pub fn rows(&self) -> &[GridLine] {
        &self.rows
    }

    pub fn cols(&self) -> &[GridLine] {
        &self.cols
    }

    /// Cells in document order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.cells.values()
    }

    /// Look up a cell by name.
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Largest cell weight, or 0 for a sheet without cells.
    pub fn max_weight(&self) -> f64 {
        self.cells.values().map(|c| c.weight).fold(0.0, f64::max)
    }
}

fn grid_lines(sheet: &Value, field: &str) -> Result<Vec<GridLine>> {
    let items = sheet
        .get(field)
        .ok_or_else(|| SheetError::malformed(format!("missing '{field}'")))?
        .as_array()
        .ok_or_else(|| SheetError::malformed(format!("'{field}' must be an array")))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            GridLine::deserialize(item)
                .map_err(|e| SheetError::malformed(format!("{field}[{idx}]: {e}")))
        })
        .collect()
}

fn validate_lines(field: &str, lines: &[GridLine]) -> Result<()> {
    for (idx, line) in lines.iter().enumerate() {
        if line.path.len() < 2 {
            return Err(SheetError::malformed(format!(
                "{field}[{idx}] needs at least 2 points, got {}",
                line.path.len()
            )));
        }
    }
    Ok(())
}
