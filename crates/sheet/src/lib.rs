//! Sheet model for citysheet
//!
//! Reads a spreadsheet export (grid lines plus non-empty cells with their
//! `used_by` dependents) into an immutable [`SheetSnapshot`].
//!
//! # Examples
//!
//! ```
//! use citysheet_sheet::SheetSnapshot;
//!
//! let snapshot = SheetSnapshot::from_json_str(r#"{
//!     "sheet": {
//!         "rows": [{"path": [[0, 0], [100, 0]]}],
//!         "cols": [{"path": [[0, 0], [0, -20]]}],
//!         "cells": [
//!             {"name": "A1", "coord": [0, 0], "weight": 1, "width": 14, "height": 14,
//!              "value": "10", "used_by": ["B1"]},
//!             {"name": "B1", "coord": [14, 0], "weight": 2, "width": 14, "height": 14,
//!              "value": "=A1*2"}
//!         ]
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(snapshot.cell_count(), 2);
//! assert_eq!(snapshot.cell("A1").unwrap().used_by, vec!["B1".to_string()]);
//! ```

mod cell;
mod error;
mod snapshot;

/// Re-export cell and grid types.
pub use cell::{Cell, GridLine, Point};
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export the snapshot type.
pub use snapshot::SheetSnapshot;
