use crate::constants::{SPRINT, SPRINT_DATE_FORMAT, TAB};
use crate::convert::classifier::{CellMatch, DataRule, RowClassifier};
use crate::convert::date::{DateNormalizer, DatePreprocess};
use crate::convert::extract::{ChangeRule, FieldExtractor, RateRule, TextRule};
use crate::convert::profile::ProviderProfile;
use crate::types::ChangeIndicator;

const HEADER: &[CellMatch] = &[CellMatch::contains(0, "----")];

/// Sprint: tab separated, data starts after a dashed separator line,
/// dates written as "Jan 02 2012", no change information.
pub fn profile() -> ProviderProfile {
    ProviderProfile {
        name: SPRINT,
        delimiter: TAB,
        classifier: RowClassifier::new(HEADER, DataRule::FieldCount(6)),
        extractor: FieldExtractor {
            destination: TextRule::Column(0),
            prefix: TextRule::Column(1),
            rate: RateRule::Column(2),
            date_column: 5,
            change: ChangeRule::Constant(ChangeIndicator::Unchanged),
        },
        dates: DateNormalizer::new(SPRINT_DATE_FORMAT)
            .with_preprocess(DatePreprocess::JoinWhitespace),
    }
}
