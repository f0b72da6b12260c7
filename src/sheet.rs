use std::collections::HashMap;

/// One spreadsheet row: column header -> cell text. Cells are always text;
/// typing happens in the coercion layer.
pub type Row = HashMap<String, String>;

/// Full snapshot of one sheet plus the optimistic-concurrency version it
/// was read at.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub version: i64,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn empty() -> Self {
        Self {
            version: 0,
            rows: Vec::new(),
        }
    }
}

/// What a synthesized cell looks like when the backing sheet is missing
/// the column entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Numeric,
    Flag,
    Link,
}

impl CellKind {
    pub fn default_cell(self) -> &'static str {
        match self {
            CellKind::Text => "",
            CellKind::Numeric => "0",
            CellKind::Flag => "No",
            CellKind::Link => "None",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: CellKind,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, kind: CellKind) -> Self {
        Self { name, kind }
    }
}

/// Cell lookup that never fails: an absent column reads as empty text.
pub fn cell<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}
