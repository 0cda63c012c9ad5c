//! Wire Models
//!
//! Data structures matching the budget-table API schema.

use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;

/// Time-period column (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: u32,
    pub name: String,
    pub order: i32,
}

/// Value of one (row, period) pair (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: u32,
    pub row_id: u32,
    pub period_id: u32,
    pub value: Option<f64>,
}

/// Budget line; the server inlines child rows recursively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: u32,
    pub order: i32,
    pub level: u32,
    pub parent_id: Option<u32>,
    pub entity: String,
    pub article: String,
    pub project: String,
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub children: Vec<Row>,
}

/// Full table snapshot returned by `GET /api/table/`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    pub periods: Vec<Period>,
    pub rows: Vec<Row>,
}

/// Request body for `POST /api/table/rows`; omitted text fields stay empty
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RowCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u32>,
    pub entity: String,
    pub article: String,
    pub project: String,
}

/// The single text field a row-field update touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Entity,
    Article,
    Project,
}

impl RowField {
    /// Query-parameter name on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            RowField::Entity => "entity",
            RowField::Article => "article",
            RowField::Project => "project",
        }
    }
}

/// Parse raw cell input: empty input clears the cell, anything else must be a
/// float. An unparseable string is an error, not a cleared cell.
pub fn parse_cell_value(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<f64>().map(Some)
}

/// Format a cell value for its input field; an absent value renders empty.
pub fn format_cell_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
