use serde::{Deserialize, Deserializer, Serialize};

/// A point in grid space.
pub type Point = [f64; 2];

/// One row or column boundary of the ground grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub path: Vec<Point>,
}

/// A non-empty spreadsheet cell as exported by the sheet dumper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    #[serde(rename = "coord")]
    pub position: Point,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(rename = "value", default, deserialize_with = "display_string")]
    pub display_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub font: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub font_size: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub background_color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_by: Vec<String>,
}

impl Cell {
    /// Create a cell with an empty label and no dependents.
    pub fn new(name: impl Into<String>, position: Point, weight: f64) -> Self {
        Self {
            name: name.into(),
            position,
            weight,
            width: 0.0,
            height: 0.0,
            display_value: String::new(),
            font: String::new(),
            font_size: 0.0,
            color: String::new(),
            background_color: String::new(),
            used_by: Vec::new(),
        }
    }

    /// Set the footprint extents.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the names of the cells that consume this cell's value.
    #[must_use]
    pub fn with_used_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used_by = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the label text.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.display_value = value.into();
        self
    }

    /// Visual center of the footprint.
    ///
    /// The export places `coord` at the top-left corner with y growing
    /// downward, so the footprint extends toward negative y.
    pub fn center(&self) -> Point {
        [
            self.position[0] + self.width / 2.0,
            self.position[1] - self.height / 2.0,
        ]
    }
}

// Exporters write `null` for unset fields; treat it like an absent one.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Labels are usually strings, but numeric cells are sometimes exported raw.
fn display_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
