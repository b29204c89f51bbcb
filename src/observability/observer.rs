use tracing::{debug, info, warn};

use crate::convert::pipeline::{ConversionObserver, ConversionSummary};
use crate::error::ConvertError;
use crate::metrics::ConversionMetrics;
use crate::types::{NormalizedRecord, RawRow};

/// Reports pipeline progress through `tracing` and the conversion counters
#[derive(Debug)]
pub struct TracingObserver {
    provider: &'static str,
}

impl TracingObserver {
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }
}

impl ConversionObserver for TracingObserver {
    fn row_skipped(&mut self, row: &RawRow) {
        debug!("Skipping line {}: {:?}", row.line, row.fields);
        ConversionMetrics::record_row_skipped();
    }

    fn header_found(&mut self, row: &RawRow) {
        info!("Found header at line {}", row.line);
        debug!("Header: {:?}", row.fields);
    }

    fn record_written(&mut self, row: &RawRow, record: &NormalizedRecord) {
        debug!(
            "Processed line {}: {:?} -> {}|{}|{}|{}|{}",
            row.line,
            row.fields,
            record.destination,
            record.prefix,
            record.rate,
            record.effective_date,
            record.change_indicator
        );
        ConversionMetrics::record_record_written();
    }

    fn data_ended(&mut self, row: &RawRow) {
        info!("End of data at line {}", row.line);
        debug!("Trailing row: {:?}", row.fields);
    }

    fn finished(&mut self, summary: &ConversionSummary) {
        if summary.end_of_data_line.is_none() {
            debug!("Input ended inside the data region");
        }
        ConversionMetrics::record_conversion_success(self.provider);
    }

    fn failed(&mut self, error: &ConvertError) {
        warn!(provider = self.provider, error_type = error.kind_label(), "Conversion failed: {}", error);
        ConversionMetrics::record_conversion_error(self.provider, error.kind_label());
    }
}
