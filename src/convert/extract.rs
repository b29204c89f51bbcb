//! Field extraction: maps a provider's data row onto the five normalized fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::profile::ProviderProfile;
use crate::error::{ConvertError, ExtractionErrorKind, Result};
use crate::types::{ChangeIndicator, Field, NormalizedRecord, RawRow};

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").unwrap());
static CURRENCY_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\s*(\d+\.\d+)").unwrap());

/// Source of a text output field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    Column(usize),
    /// Two cells joined with `separator` (which may be empty)
    Joined {
        first: usize,
        second: usize,
        separator: &'static str,
    },
}

/// Source of the rate field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRule {
    /// Decimal cell passed through as written
    Column(usize),
    /// Decimal cell re-rendered from its parsed value
    Decimal(usize),
    /// First `$ <amount>` found inside a descriptive cell
    CurrencyAmount(usize),
}

/// Source of the change indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRule {
    Constant(ChangeIndicator),
    /// Free-text comment searched for "increase"/"decrease"
    Comment(usize),
}

/// Column map for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldExtractor {
    pub destination: TextRule,
    pub prefix: TextRule,
    pub rate: RateRule,
    pub date_column: usize,
    pub change: ChangeRule,
}

/// Build a normalized record from a row known to contain data
pub fn extract(profile: &ProviderProfile, row: &RawRow) -> Result<NormalizedRecord> {
    let rules = &profile.extractor;
    let ctx = RowContext { profile, row };

    let destination = ctx.text(Field::Destination, rules.destination)?;
    if destination.is_empty() {
        return Err(ctx.fail(Field::Destination, ExtractionErrorKind::EmptyField));
    }

    let prefix = ctx.text(Field::Prefix, rules.prefix)?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ctx.fail(Field::Prefix, ExtractionErrorKind::InvalidPrefix { value: prefix }));
    }

    let rate = ctx.rate(rules.rate)?;

    let raw_date = ctx.cell(Field::EffectiveDate, rules.date_column)?;
    let effective_date = profile.dates.normalize(raw_date).map_err(|_| {
        ctx.fail(
            Field::EffectiveDate,
            ExtractionErrorKind::InvalidDate {
                value: raw_date.to_string(),
                format: profile.dates.source_format.to_string(),
            },
        )
    })?;

    let change_indicator = match rules.change {
        ChangeRule::Constant(indicator) => indicator,
        ChangeRule::Comment(column) => {
            ChangeIndicator::from_comment(ctx.cell(Field::ChangeIndicator, column)?)
        }
    };

    Ok(NormalizedRecord {
        destination,
        prefix,
        rate,
        effective_date,
        change_indicator,
    })
}

struct RowContext<'a> {
    profile: &'a ProviderProfile,
    row: &'a RawRow,
}

impl<'a> RowContext<'a> {
    fn fail(&self, field: Field, kind: ExtractionErrorKind) -> ConvertError {
        ConvertError::Extraction {
            provider: self.profile.name.to_string(),
            line: self.row.line,
            field,
            kind,
            row: self.row.fields.clone(),
        }
    }

    fn cell(&self, field: Field, column: usize) -> Result<&'a str> {
        self.row.get(column).ok_or_else(|| {
            self.fail(
                field,
                ExtractionErrorKind::MissingColumn {
                    column,
                    len: self.row.len(),
                },
            )
        })
    }

    fn text(&self, field: Field, rule: TextRule) -> Result<String> {
        match rule {
            TextRule::Column(column) => Ok(self.cell(field, column)?.trim().to_string()),
            TextRule::Joined {
                first,
                second,
                separator,
            } => {
                let first = self.cell(field, first)?.trim();
                let second = self.cell(field, second)?.trim();
                if first.is_empty() || second.is_empty() {
                    return Err(self.fail(field, ExtractionErrorKind::EmptyField));
                }
                Ok(format!("{}{}{}", first, separator, second))
            }
        }
    }

    fn rate(&self, rule: RateRule) -> Result<String> {
        match rule {
            RateRule::Column(column) => {
                let value = self.cell(Field::Rate, column)?.trim();
                if DECIMAL.is_match(value) {
                    Ok(value.to_string())
                } else {
                    Err(self.invalid_rate(value))
                }
            }
            RateRule::Decimal(column) => {
                let value = self.cell(Field::Rate, column)?.trim();
                if !DECIMAL.is_match(value) {
                    return Err(self.invalid_rate(value));
                }
                value
                    .parse::<f64>()
                    .map(|rate| rate.to_string())
                    .map_err(|_| self.invalid_rate(value))
            }
            RateRule::CurrencyAmount(column) => {
                let value = self.cell(Field::Rate, column)?;
                CURRENCY_AMOUNT
                    .captures(value)
                    .and_then(|caps| caps.get(1))
                    .map(|amount| amount.as_str().to_string())
                    .ok_or_else(|| {
                        self.fail(
                            Field::Rate,
                            ExtractionErrorKind::RateNotFound {
                                value: value.to_string(),
                            },
                        )
                    })
            }
        }
    }

    fn invalid_rate(&self, value: &str) -> ConvertError {
        self.fail(
            Field::Rate,
            ExtractionErrorKind::InvalidRate {
                value: value.to_string(),
            },
        )
    }
}
