use crate::convert::classifier::RowClassifier;
use crate::convert::date::DateNormalizer;
use crate::convert::extract::{self, FieldExtractor};
use crate::error::Result;
use crate::types::{NormalizedRecord, RawRow};

/// Everything needed to read one provider's export.
///
/// Profiles are plain data built once and shared read-only for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub name: &'static str,
    pub delimiter: u8,
    pub classifier: RowClassifier,
    pub extractor: FieldExtractor,
    pub dates: DateNormalizer,
}

impl ProviderProfile {
    pub fn is_data_header(&self, row: &RawRow) -> bool {
        self.classifier.is_data_header(row)
    }

    pub fn contains_data(&self, row: &RawRow) -> bool {
        self.classifier.contains_data(row)
    }

    pub fn extract(&self, row: &RawRow) -> Result<NormalizedRecord> {
        extract::extract(self, row)
    }
}
