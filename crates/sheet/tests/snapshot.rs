use citysheet_sheet::{SheetError, SheetSnapshot};
use serde_json::json;

fn document() -> serde_json::Value {
    json!({
        "sheet": {
            "rows": [
                {"path": [[0, 0], [42, 0]]},
                {"path": [[0, -14], [42, -14]]}
            ],
            "cols": [
                {"path": [[0, 0], [0, -14]]},
                {"path": [[14, 0], [14, -14]]}
            ],
            "cells": [
                {"name": "A", "coord": [0, 0], "weight": 1, "width": 14, "height": 14,
                 "value": "1", "font": "Arial", "font_size": 10, "color": "#000000",
                 "background_color": "#ffffff", "used_by": ["B"]},
                {"name": "B", "coord": [14, 0], "weight": 2, "width": 14, "height": 14,
                 "value": "2", "used_by": ["C"]},
                {"name": "C", "coord": [28, 0], "weight": 3, "width": 14, "height": 14,
                 "value": "3", "used_by": []}
            ]
        }
    })
}

// ===== Successful loads =====

#[test]
fn test_parse_full_document() {
    let snapshot = SheetSnapshot::parse(&document()).unwrap();

    assert_eq!(snapshot.rows().len(), 2);
    assert_eq!(snapshot.cols().len(), 2);
    assert_eq!(snapshot.cell_count(), 3);

    let a = snapshot.cell("A").unwrap();
    assert_eq!(a.font, "Arial");
    assert_eq!(a.background_color, "#ffffff");
    assert_eq!(a.center(), [7.0, -7.0]);
}

#[test]
fn test_cells_keep_document_order() {
    let snapshot = SheetSnapshot::parse(&document()).unwrap();
    let names: Vec<&str> = snapshot.cells().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_lookup_unknown_name() {
    let snapshot = SheetSnapshot::parse(&document()).unwrap();
    assert!(snapshot.cell("Z").is_none());
    assert!(!snapshot.contains("Z"));
    assert!(snapshot.contains("B"));
}

#[test]
fn test_null_cosmetics_are_carried_as_empty() {
    let raw = json!({"sheet": {"rows": [], "cols": [], "cells": [
        {"name": "A", "coord": [0, 0], "weight": 1, "value": "x",
         "font": null, "font_size": null, "color": null, "background_color": null,
         "used_by": ["B"]},
        {"name": "B", "coord": [14, 0], "weight": 2, "used_by": null}
    ]}});
    let snapshot = SheetSnapshot::parse(&raw).unwrap();

    let a = snapshot.cell("A").unwrap();
    assert_eq!(a.display_value, "x");
    assert!(a.font.is_empty());
    assert!(a.color.is_empty());
    assert!(a.background_color.is_empty());
    assert_eq!(a.used_by, vec!["B".to_string()]);
    assert!(snapshot.cell("B").unwrap().used_by.is_empty());
}

// ===== Malformed documents =====

#[test]
fn test_missing_rows_is_malformed() {
    let raw = json!({"sheet": {"cols": [], "cells": []}});
    let err = SheetSnapshot::parse(&raw).unwrap_err();
    assert!(matches!(err, SheetError::MalformedSheet(msg) if msg.contains("rows")));
}

#[test]
fn test_non_array_cols_is_malformed() {
    let raw = json!({"sheet": {"rows": [], "cols": {"path": []}}});
    let err = SheetSnapshot::parse(&raw).unwrap_err();
    assert!(matches!(err, SheetError::MalformedSheet(msg) if msg.contains("cols")));
}

#[test]
fn test_missing_sheet_is_malformed() {
    let err = SheetSnapshot::parse(&json!({"rows": [], "cols": []})).unwrap_err();
    assert!(matches!(err, SheetError::MalformedSheet(_)));
}

#[test]
fn test_bad_cell_record_is_malformed() {
    let raw = json!({"sheet": {"rows": [], "cols": [], "cells": [{"coord": [0, 0]}]}});
    let err = SheetSnapshot::parse(&raw).unwrap_err();
    assert!(matches!(err, SheetError::MalformedSheet(msg) if msg.contains("index 0")));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let err = SheetSnapshot::from_json_str("{\"sheet\": [").unwrap_err();
    assert!(matches!(err, SheetError::Parse(_)));
}
