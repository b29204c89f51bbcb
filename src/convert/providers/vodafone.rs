use crate::constants::{COMMA, VODAFONE, VODAFONE_DATE_FORMAT};
use crate::convert::classifier::{CellMatch, DataRule, RowClassifier};
use crate::convert::date::DateNormalizer;
use crate::convert::extract::{ChangeRule, FieldExtractor, RateRule, TextRule};
use crate::convert::profile::ProviderProfile;

const HEADER: &[CellMatch] = &[CellMatch::equals(0, "country"), CellMatch::equals(1, "destination")];

/// Vodafone: country and region in separate columns, prefix split in two,
/// rate in GBP, change noted in a trailing comment column.
pub fn profile() -> ProviderProfile {
    ProviderProfile {
        name: VODAFONE,
        delimiter: COMMA,
        classifier: RowClassifier::new(HEADER, DataRule::FewerEmptyThan(4)),
        extractor: FieldExtractor {
            destination: TextRule::Joined {
                first: 0,
                second: 1,
                separator: "-",
            },
            prefix: TextRule::Joined {
                first: 3,
                second: 4,
                separator: "",
            },
            rate: RateRule::Decimal(5),
            date_column: 6,
            change: ChangeRule::Comment(8),
        },
        dates: DateNormalizer::new(VODAFONE_DATE_FORMAT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRow;

    #[test]
    fn test_header_and_footer_detection() {
        let profile = profile();
        let header = RawRow::from_strs(
            4,
            &["Country", "Destination", "Type", "CC", "NDC", "Rate GBP", "Effective", "", "Comment"],
        );
        assert!(profile.is_data_header(&header));

        let title = RawRow::from_strs(1, &["Vodafone Carrier Services price list", "", "", "", ""]);
        assert!(!profile.is_data_header(&title));
        assert!(!profile.contains_data(&title));

        let data = RawRow::from_strs(
            5,
            &["Spain", "Mobile", "", "34", "6", "0.0456", "01-Feb-2012", "", ""],
        );
        assert!(profile.contains_data(&data));
    }
}
