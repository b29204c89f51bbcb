//! Conversion counters
//!
//! Counters recorded through the `metrics` facade. No exporter is installed by
//! the CLI; a process embedding the converter can install a recorder and read
//! them.

/// Metric names follow rate_converter_{name}_total
macro_rules! conversion_metric {
    (counter, $name:literal) => {
        concat!("rate_converter_", $name, "_total")
    };
}

pub(crate) use conversion_metric;

/// Metrics collection for conversion runs
pub struct ConversionMetrics;

impl ConversionMetrics {
    pub fn record_row_skipped() {
        ::metrics::counter!(conversion_metric!(counter, "rows_skipped")).increment(1);
    }

    pub fn record_record_written() {
        ::metrics::counter!(conversion_metric!(counter, "records_written")).increment(1);
    }

    /// Record a completed conversion
    pub fn record_conversion_success(provider: &str) {
        ::metrics::counter!(conversion_metric!(counter, "conversions"), "provider" => provider.to_string())
            .increment(1);
    }

    /// Record a failed conversion
    pub fn record_conversion_error(provider: &str, error_type: &'static str) {
        ::metrics::counter!(
            conversion_metric!(counter, "conversion_errors"),
            "provider" => provider.to_string(),
            "error_type" => error_type
        )
        .increment(1);
    }
}
