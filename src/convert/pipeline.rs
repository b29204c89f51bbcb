//! The scan over an export: skip the preamble, convert the data region, stop at its end.

use crate::convert::profile::ProviderProfile;
use crate::error::{ConvertError, Result};
use crate::types::{NormalizedRecord, RawRow};

/// Where the scan currently is within the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekingHeader,
    InData,
    Done,
}

/// What the pipeline does with the row that caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Preamble row, dropped
    Skip,
    /// Header marker, consumed but not emitted
    Header,
    /// Data row, extracted and written
    Emit,
    /// First non-data row after the header
    EndOfData,
    /// Row after the data region
    Ignore,
}

impl ScanState {
    /// Transition on one input row
    pub fn advance(self, profile: &ProviderProfile, row: &RawRow) -> (ScanState, RowAction) {
        match self {
            ScanState::SeekingHeader if profile.is_data_header(row) => {
                (ScanState::InData, RowAction::Header)
            }
            ScanState::SeekingHeader => (ScanState::SeekingHeader, RowAction::Skip),
            ScanState::InData if profile.contains_data(row) => (ScanState::InData, RowAction::Emit),
            ScanState::InData => (ScanState::Done, RowAction::EndOfData),
            ScanState::Done => (ScanState::Done, RowAction::Ignore),
        }
    }

    /// Transition on end of input. Running out while still looking for the
    /// header means the export holds no data region at all.
    pub fn finish(self, provider: &str) -> Result<ScanState> {
        match self {
            ScanState::SeekingHeader => Err(ConvertError::DataNotFound {
                provider: provider.to_string(),
            }),
            ScanState::InData | ScanState::Done => Ok(ScanState::Done),
        }
    }
}

/// Receives progress events from a conversion run
pub trait ConversionObserver {
    fn row_skipped(&mut self, _row: &RawRow) {}
    fn header_found(&mut self, _row: &RawRow) {}
    fn record_written(&mut self, _row: &RawRow, _record: &NormalizedRecord) {}
    fn data_ended(&mut self, _row: &RawRow) {}
    fn finished(&mut self, _summary: &ConversionSummary) {}
    fn failed(&mut self, _error: &ConvertError) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ConversionObserver for NoopObserver {}

/// Destination for normalized records
pub trait RecordSink {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()>;
}

impl RecordSink for Vec<NormalizedRecord> {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub provider: &'static str,
    pub header_line: Option<u64>,
    /// Line of the row that ended the data region, `None` if input ran out first
    pub end_of_data_line: Option<u64>,
    pub rows_skipped: usize,
    pub records_written: usize,
    pub state: ScanState,
}

impl ConversionSummary {
    fn new(provider: &'static str) -> Self {
        Self {
            provider,
            header_line: None,
            end_of_data_line: None,
            rows_skipped: 0,
            records_written: 0,
            state: ScanState::SeekingHeader,
        }
    }
}

/// Drives one conversion over a stream of rows.
///
/// Rows are pulled one at a time and every record is handed to the sink
/// before the next row is read. The first error aborts the run.
pub struct ConversionPipeline<'a, O: ConversionObserver> {
    profile: &'a ProviderProfile,
    observer: O,
}

impl<'a> ConversionPipeline<'a, NoopObserver> {
    pub fn new(profile: &'a ProviderProfile) -> Self {
        Self::with_observer(profile, NoopObserver)
    }
}

impl<'a, O: ConversionObserver> ConversionPipeline<'a, O> {
    pub fn with_observer(profile: &'a ProviderProfile, observer: O) -> Self {
        Self { profile, observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn run<I, S>(&mut self, rows: I, sink: &mut S) -> Result<ConversionSummary>
    where
        I: IntoIterator<Item = Result<RawRow>>,
        S: RecordSink + ?Sized,
    {
        match self.scan(rows, sink) {
            Ok(summary) => {
                self.observer.finished(&summary);
                Ok(summary)
            }
            Err(e) => {
                self.observer.failed(&e);
                Err(e)
            }
        }
    }

    fn scan<I, S>(&mut self, rows: I, sink: &mut S) -> Result<ConversionSummary>
    where
        I: IntoIterator<Item = Result<RawRow>>,
        S: RecordSink + ?Sized,
    {
        let mut state = ScanState::SeekingHeader;
        let mut summary = ConversionSummary::new(self.profile.name);

        for row in rows {
            let row = row?;
            let (next, action) = state.advance(self.profile, &row);

            match action {
                RowAction::Skip => {
                    summary.rows_skipped += 1;
                    self.observer.row_skipped(&row);
                }
                RowAction::Header => {
                    summary.header_line = Some(row.line);
                    self.observer.header_found(&row);
                }
                RowAction::Emit => {
                    let record = self.profile.extract(&row)?;
                    sink.write_record(&record)?;
                    summary.records_written += 1;
                    self.observer.record_written(&row, &record);
                }
                RowAction::EndOfData => {
                    summary.end_of_data_line = Some(row.line);
                    self.observer.data_ended(&row);
                }
                RowAction::Ignore => {}
            }

            state = next;
            if state == ScanState::Done {
                break;
            }
        }

        summary.state = state.finish(self.profile.name)?;
        Ok(summary)
    }
}
