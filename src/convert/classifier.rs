//! Row classification: where does the data region start, and is a row still data?

use crate::types::RawRow;

/// How a header cell is compared against its expected text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Whole (trimmed) cell equals the text, ignoring case
    Equals,
    /// Cell contains the text anywhere, ignoring case
    Contains,
}

/// Expectation for one cell of the header marker row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMatch {
    pub column: usize,
    pub text: &'static str,
    pub kind: MatchKind,
}

impl CellMatch {
    pub const fn equals(column: usize, text: &'static str) -> Self {
        Self { column, text, kind: MatchKind::Equals }
    }

    pub const fn contains(column: usize, text: &'static str) -> Self {
        Self { column, text, kind: MatchKind::Contains }
    }

    /// A row too short to hold the column never matches
    pub fn matches(&self, row: &RawRow) -> bool {
        let Some(cell) = row.get(self.column) else {
            return false;
        };
        match self.kind {
            MatchKind::Equals => cell.trim().eq_ignore_ascii_case(self.text),
            MatchKind::Contains => cell.to_lowercase().contains(&self.text.to_lowercase()),
        }
    }
}

/// Recognizes the row immediately preceding the first data row.
///
/// Every cell expectation must hold. A column-title row and a dash separator
/// row are both expressed this way (the latter as `contains(0, "----")`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule {
    pub cells: &'static [CellMatch],
}

impl HeaderRule {
    pub fn is_data_header(&self, row: &RawRow) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|cell| cell.matches(row))
    }
}

/// Structural signature of a well-formed data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRule {
    /// Fewer than `n` exactly-empty fields
    FewerEmptyThan(usize),
    /// Exactly `n` fields
    FieldCount(usize),
}

impl DataRule {
    /// A blank row is never data, whatever the rule
    pub fn contains_data(&self, row: &RawRow) -> bool {
        if row.is_blank() {
            return false;
        }
        match *self {
            DataRule::FewerEmptyThan(limit) => row.empty_fields() < limit,
            DataRule::FieldCount(count) => row.len() == count,
        }
    }
}

/// Pair of header/data predicates for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClassifier {
    pub header: HeaderRule,
    pub data: DataRule,
}

impl RowClassifier {
    pub const fn new(header: &'static [CellMatch], data: DataRule) -> Self {
        Self {
            header: HeaderRule { cells: header },
            data,
        }
    }

    pub fn is_data_header(&self, row: &RawRow) -> bool {
        self.header.is_data_header(row)
    }

    pub fn contains_data(&self, row: &RawRow) -> bool {
        self.data.contains_data(row)
    }
}
