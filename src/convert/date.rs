use std::borrow::Cow;

use chrono::NaiveDate;

use crate::constants::TARGET_DATE_FORMAT;

/// Cleanup applied to a raw date cell before it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreprocess {
    None,
    /// "Jan  02 2012" -> "Jan_02_2012"
    JoinWhitespace,
}

impl DatePreprocess {
    pub fn apply<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self {
            DatePreprocess::None => Cow::Borrowed(raw.trim()),
            DatePreprocess::JoinWhitespace => {
                Cow::Owned(raw.split_whitespace().collect::<Vec<_>>().join("_"))
            }
        }
    }

    /// Undo `apply` on a string rendered in the source format
    pub fn restore(&self, rendered: String) -> String {
        match self {
            DatePreprocess::None => rendered,
            DatePreprocess::JoinWhitespace => rendered.replace('_', " "),
        }
    }
}

/// Reparse `date` from `source_format` and render it in `target_format`
pub fn reformat_date(
    date: &str,
    source_format: &str,
    target_format: &str,
) -> Result<String, chrono::ParseError> {
    NaiveDate::parse_from_str(date, source_format).map(|d| d.format(target_format).to_string())
}

/// Converts a provider's date cells to the canonical YYYYMMDD form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    pub source_format: &'static str,
    pub preprocess: DatePreprocess,
}

impl DateNormalizer {
    pub const fn new(source_format: &'static str) -> Self {
        Self {
            source_format,
            preprocess: DatePreprocess::None,
        }
    }

    pub const fn with_preprocess(self, preprocess: DatePreprocess) -> Self {
        Self { preprocess, ..self }
    }

    pub fn normalize(&self, raw: &str) -> Result<String, chrono::ParseError> {
        let prepared = self.preprocess.apply(raw);
        reformat_date(&prepared, self.source_format, TARGET_DATE_FORMAT)
    }

    /// Render a canonical date back in the provider's own convention
    pub fn to_source_format(&self, canonical: &str) -> Result<String, chrono::ParseError> {
        reformat_date(canonical, TARGET_DATE_FORMAT, self.source_format)
            .map(|rendered| self.preprocess.restore(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SPRINT_DATE_FORMAT, TMOBILE_DATE_FORMAT, VODAFONE_DATE_FORMAT};

    #[test]
    fn test_reformat_each_source_convention() {
        let vodafone = DateNormalizer::new(VODAFONE_DATE_FORMAT);
        assert_eq!(vodafone.normalize("02-Jan-2012").unwrap(), "20120102");

        let tmobile = DateNormalizer::new(TMOBILE_DATE_FORMAT);
        assert_eq!(tmobile.normalize("03/15/2012").unwrap(), "20120315");
        assert_eq!(tmobile.normalize(" 3/5/2012 ").unwrap(), "20120305");

        let sprint =
            DateNormalizer::new(SPRINT_DATE_FORMAT).with_preprocess(DatePreprocess::JoinWhitespace);
        assert_eq!(sprint.normalize("Jan 02 2012").unwrap(), "20120102");
        assert_eq!(sprint.normalize("Feb   29  2012").unwrap(), "20120229");
    }

    #[test]
    fn test_rejects_mismatched_format() {
        let tmobile = DateNormalizer::new(TMOBILE_DATE_FORMAT);
        assert!(tmobile.normalize("2012-01-02").is_err());
        assert!(tmobile.normalize("").is_err());

        let vodafone = DateNormalizer::new(VODAFONE_DATE_FORMAT);
        assert!(vodafone.normalize("31-Feb-2012").is_err());
    }

    #[test]
    fn test_round_trip_to_source_format() {
        let sprint =
            DateNormalizer::new(SPRINT_DATE_FORMAT).with_preprocess(DatePreprocess::JoinWhitespace);
        let canonical = sprint.normalize("Jan 02 2012").unwrap();
        assert_eq!(sprint.to_source_format(&canonical).unwrap(), "Jan 02 2012");

        let vodafone = DateNormalizer::new(VODAFONE_DATE_FORMAT);
        let canonical = vodafone.normalize("15-Mar-2012").unwrap();
        assert_eq!(vodafone.to_source_format(&canonical).unwrap(), "15-Mar-2012");

        let tmobile = DateNormalizer::new(TMOBILE_DATE_FORMAT);
        let canonical = tmobile.normalize("12/31/2011").unwrap();
        assert_eq!(tmobile.to_source_format(&canonical).unwrap(), "12/31/2011");
    }
}
