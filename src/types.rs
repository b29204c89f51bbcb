use std::fmt;

use serde::Serialize;

/// One tokenized input line, tagged with its 1-based physical line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Convenience constructor used by tests and in-memory sources
    pub fn from_strs(line: u64, fields: &[&str]) -> Self {
        Self {
            line,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// No fields, or only whitespace in every field
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    /// Number of fields that are exactly empty
    pub fn empty_fields(&self) -> usize {
        self.fields.iter().filter(|f| f.is_empty()).count()
    }
}

/// Whether a rate moved relative to the provider's previous table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeIndicator {
    #[serde(rename = "=")]
    Unchanged,
    #[serde(rename = "+")]
    Increased,
    #[serde(rename = "-")]
    Decreased,
}

impl ChangeIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ChangeIndicator::Unchanged => "=",
            ChangeIndicator::Increased => "+",
            ChangeIndicator::Decreased => "-",
        }
    }

    /// Infer the change from a free-text comment.
    ///
    /// "increase" is checked before "decrease"; the first match wins.
    pub fn from_comment(comment: &str) -> Self {
        let comment = comment.to_lowercase();
        if comment.contains("increase") {
            ChangeIndicator::Increased
        } else if comment.contains("decrease") {
            ChangeIndicator::Decreased
        } else {
            ChangeIndicator::Unchanged
        }
    }
}

impl fmt::Display for ChangeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The five-field, provider independent output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub destination: String,
    pub prefix: String,
    pub rate: String,
    /// YYYYMMDD
    pub effective_date: String,
    pub change_indicator: ChangeIndicator,
}

/// Output field names, used when reporting extraction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Destination,
    Prefix,
    Rate,
    EffectiveDate,
    ChangeIndicator,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Destination => "destination",
            Field::Prefix => "prefix",
            Field::Rate => "rate",
            Field::EffectiveDate => "effective_date",
            Field::ChangeIndicator => "change_indicator",
        };
        f.write_str(name)
    }
}
