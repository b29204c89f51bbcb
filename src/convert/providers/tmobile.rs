use crate::constants::{COMMA, TMOBILE, TMOBILE_DATE_FORMAT};
use crate::convert::classifier::{CellMatch, DataRule, RowClassifier};
use crate::convert::date::DateNormalizer;
use crate::convert::extract::{ChangeRule, FieldExtractor, RateRule, TextRule};
use crate::convert::profile::ProviderProfile;

const HEADER: &[CellMatch] = &[CellMatch::contains(0, "destination"), CellMatch::contains(2, "code")];

/// T-Mobile: rate embedded in a price description ("$ 0.0123 per min").
pub fn profile() -> ProviderProfile {
    ProviderProfile {
        name: TMOBILE,
        delimiter: COMMA,
        classifier: RowClassifier::new(HEADER, DataRule::FewerEmptyThan(4)),
        extractor: FieldExtractor {
            destination: TextRule::Column(0),
            prefix: TextRule::Column(2),
            rate: RateRule::CurrencyAmount(5),
            date_column: 6,
            change: ChangeRule::Comment(7),
        },
        dates: DateNormalizer::new(TMOBILE_DATE_FORMAT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRow;

    #[test]
    fn test_header_substring_match() {
        let profile = profile();
        let header = RawRow::from_strs(
            6,
            &["Destination Name", "Type", "Dial Code", "", "", "Price", "Effective Date", "Notes"],
        );
        assert!(profile.is_data_header(&header));

        let legend = RawRow::from_strs(2, &["Destinations marked * are new", "", ""]);
        assert!(!profile.is_data_header(&legend));
    }
}
