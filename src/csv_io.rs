//! File adapters around the conversion core: a CSV row source, the pipe
//! delimited record writer, and `convert_file` which owns both handles.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};
use encoding_rs::WINDOWS_1252;
use tracing::{info, warn};

use crate::constants::OUTPUT_DELIMITER;
use crate::convert::pipeline::{ConversionObserver, ConversionPipeline, ConversionSummary, RecordSink};
use crate::convert::profile::ProviderProfile;
use crate::error::{ConvertError, Result};
use crate::observability::TracingObserver;
use crate::types::{NormalizedRecord, RawRow};

/// Streams raw rows out of a delimited text source, one record at a time.
///
/// Every physical line surfaces as a row, blank lines included (as a row with
/// no fields), so the classifier sees the same line sequence as the file. A
/// quoted cell spanning several lines yields one row numbered by its first line.
pub struct CsvRowSource<R: Read> {
    input: BufReader<R>,
    delimiter: u8,
    lines_read: u64,
    buffer: Vec<u8>,
    record: ByteRecord,
    path: PathBuf,
}

impl CsvRowSource<File> {
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        Ok(Self::new(file, delimiter, path))
    }
}

impl<R: Read> CsvRowSource<R> {
    /// `path` is only used to label errors
    pub fn new(reader: R, delimiter: u8, path: impl Into<PathBuf>) -> Self {
        Self {
            input: BufReader::new(reader),
            delimiter,
            lines_read: 0,
            buffer: Vec::new(),
            record: ByteRecord::new(),
            path: path.into(),
        }
    }

    /// Pull physical lines into `buffer` until its quotes balance
    fn read_logical_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        loop {
            let n = self
                .input
                .read_until(b'\n', &mut self.buffer)
                .map_err(|e| ConvertError::io(&self.path, e))?;
            if n == 0 {
                return Ok(!self.buffer.is_empty());
            }
            self.lines_read += 1;
            if quotes_balanced(&self.buffer) {
                return Ok(true);
            }
        }
    }

    fn tokenize(&mut self, line: u64) -> Result<RawRow> {
        let content = trim_line_end(&self.buffer);
        if content.is_empty() {
            return Ok(RawRow::new(line, Vec::new()));
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // Exports mix title, header and data rows of any width
            .from_reader(content);
        let found = reader
            .read_byte_record(&mut self.record)
            .map_err(|e| ConvertError::csv(&self.path, e))?;
        let fields = if found {
            self.record.iter().map(decode_field).collect()
        } else {
            Vec::new()
        };
        Ok(RawRow::new(line, fields))
    }
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines_read + 1;
        match self.read_logical_line() {
            Ok(true) => Some(self.tokenize(line)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// An odd quote count means a quoted cell continues on the next line
fn quotes_balanced(bytes: &[u8]) -> bool {
    bytes.iter().filter(|&&b| b == b'"').count() % 2 == 0
}

fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Excel writes CSV in the machine's ANSI code page, so anything that is not
/// valid UTF-8 is read as Windows-1252.
fn decode_field(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Writes normalized records as `dest|prefix|rate|date|change` lines
pub struct PipeRecordWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
}

impl<W: Write> PipeRecordWriter<W> {
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(OUTPUT_DELIMITER)
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);
        Self {
            writer,
            path: path.into(),
        }
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        let path = self.path;
        self.writer
            .into_inner()
            .map_err(|e| ConvertError::io(path, e.into_error()))
    }
}

impl<W: Write> RecordSink for PipeRecordWriter<W> {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|e| ConvertError::csv(&self.path, e))
    }
}

/// Convert `input` into `output` using the given profile, logging progress
/// through `tracing`.
pub fn convert_file(profile: &ProviderProfile, input: &Path, output: &Path) -> Result<ConversionSummary> {
    convert_file_with_observer(profile, input, output, TracingObserver::new(profile.name))
}

/// Like `convert_file` with a caller supplied observer.
///
/// Both files are closed on every path. On failure the incomplete output file
/// is removed.
pub fn convert_file_with_observer<O: ConversionObserver>(
    profile: &ProviderProfile,
    input: &Path,
    output: &Path,
    observer: O,
) -> Result<ConversionSummary> {
    let rows = CsvRowSource::open(input, profile.delimiter)?;
    let file = File::create(output).map_err(|e| ConvertError::io(output, e))?;

    let result = write_all(profile, rows, file, output, observer);
    match result {
        Ok(summary) => {
            info!("Wrote {} lines to {}", summary.records_written, output.display());
            Ok(summary)
        }
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(output) {
                warn!("Could not remove incomplete output {}: {}", output.display(), remove_err);
            }
            Err(e)
        }
    }
}

fn write_all<O: ConversionObserver>(
    profile: &ProviderProfile,
    rows: CsvRowSource<File>,
    file: File,
    output: &Path,
    observer: O,
) -> Result<ConversionSummary> {
    let mut writer = PipeRecordWriter::new(BufWriter::new(file), output);
    let mut pipeline = ConversionPipeline::with_observer(profile, observer);

    let summary = pipeline.run(rows, &mut writer)?;

    let mut buffered = writer.finish()?;
    buffered.flush().map_err(|e| ConvertError::io(output, e))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeIndicator;

    #[test]
    fn test_row_source_tab_delimited_with_quotes() {
        let input = "title line\n----\t----\nUSA\t1\t0.01\t\"a\tb\"\tx\tJan 02 2012\n";
        let rows: Vec<RawRow> = CsvRowSource::new(input.as_bytes(), b'\t', "mem")
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fields, vec!["title line"]);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].fields[3], "a\tb");
        assert_eq!(rows[2].len(), 6);
    }

    #[test]
    fn test_row_source_surfaces_blank_lines() {
        let input = "a,b\r\n\r\n   \n\"multi\nline\",c\nd,e";
        let rows: Vec<RawRow> = CsvRowSource::new(input.as_bytes(), b',', "mem")
            .collect::<Result<_>>()
            .unwrap();

        let lines: Vec<u64> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 6]);
        assert!(rows[1].fields.is_empty());
        assert_eq!(rows[2].fields, vec!["   "]);
        assert_eq!(rows[3].fields, vec!["multi\nline", "c"]);
        assert_eq!(rows[4].fields, vec!["d", "e"]);
    }

    #[test]
    fn test_blank_line_ends_data_region() {
        let profile = crate::convert::providers::sprint::profile();
        let input = "----\t----\nUSA\t1\t0.01\tx\tx\tJan 02 2012\n\nCAN\t1\t0.02\tx\tx\tJan 03 2012\n";
        let rows = CsvRowSource::new(input.as_bytes(), profile.delimiter, "mem");
        let mut out: Vec<NormalizedRecord> = Vec::new();

        let summary = ConversionPipeline::new(&profile).run(rows, &mut out).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].destination, "USA");
        assert_eq!(summary.end_of_data_line, Some(3));
    }

    #[test]
    fn test_row_source_decodes_windows_1252() {
        // "Curaçao" with ç as 0xE7
        let input: &[u8] = b"Cura\xe7ao,599\n";
        let rows: Vec<RawRow> = CsvRowSource::new(input, b',', "mem")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows[0].fields, vec!["Curaçao", "599"]);
    }

    #[test]
    fn test_row_source_strips_bom() {
        let input = "\u{feff}Country,Destination\n";
        let rows: Vec<RawRow> = CsvRowSource::new(input.as_bytes(), b',', "mem")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows[0].fields[0], "Country");
    }

    #[test]
    fn test_pipe_writer_output() {
        let mut writer = PipeRecordWriter::new(Vec::new(), "mem");
        writer
            .write_record(&NormalizedRecord {
                destination: "United States-California".to_string(),
                prefix: "1310".to_string(),
                rate: "1.512".to_string(),
                effective_date: "20120102".to_string(),
                change_indicator: ChangeIndicator::Increased,
            })
            .unwrap();
        writer
            .write_record(&NormalizedRecord {
                destination: "Pipe|Land".to_string(),
                prefix: "99".to_string(),
                rate: "0.5".to_string(),
                effective_date: "20120103".to_string(),
                change_indicator: ChangeIndicator::Unchanged,
            })
            .unwrap();

        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "United States-California|1310|1.512|20120102|+\n\"Pipe|Land\"|99|0.5|20120103|=\n"
        );
    }
}
