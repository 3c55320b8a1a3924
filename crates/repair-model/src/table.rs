use std::collections::BTreeMap;

use crate::RowId;

/// A single cell of a dataset.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

static MISSING_CELL: CellValue = CellValue::Missing;

impl CellValue {
    /// Parse a raw cell into a typed value.
    ///
    /// A cell becomes `Number` only when the canonical numeric rendering
    /// round-trips to the trimmed input ("45" does, "0045" does not), so
    /// loading never rewrites what the file said.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Ok(number) = trimmed.parse::<f64>()
            && number.is_finite()
            && format_numeric(number) == trimmed
        {
            return Self::Number(number);
        }
        Self::Text(trimmed.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Render the cell for output and logging. Missing renders empty.
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_numeric(*value),
            Self::Missing => String::new(),
        }
    }
}

/// Formats a floating-point number without trailing zeros ("10.50" -> "10.5").
pub fn format_numeric(value: f64) -> String {
    let s = format!("{value}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING_CELL)
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }

    /// One-line rendering of the full row in dataset column order, used as
    /// the old-value snapshot of a deduplication change record.
    pub fn snapshot(&self, columns: &[String]) -> String {
        let mut out = String::new();
        for (idx, column) in columns.iter().enumerate() {
            if idx > 0 {
                out.push_str("; ");
            }
            out.push_str(column);
            out.push('=');
            out.push_str(&self.get(column).render());
        }
        out
    }
}

/// An ordered tabular dataset with a fixed column schema.
///
/// Row order is stable across passes except where duplicate removal
/// deletes rows; the column list only grows (derived columns append).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Append a column to the schema if it is not already present.
    pub fn add_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}
