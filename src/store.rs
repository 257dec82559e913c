// 🗄️ Store loader/writer
// Flat delimited file: origin,code,name,cost,quantity - no header.
// Rows are read leniently (any field count) and validated one by one so a
// bad row is skipped and reported instead of aborting the load.

use crate::error::{InventoryError, Result, RowError};
use crate::record::Record;
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Number of positional fields per store row
pub const FIELD_COUNT: usize = 5;

// ============================================================================
// LOAD REPORT
// ============================================================================

/// A row that failed to parse, kept for the operator's diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line in the store file
    pub line: usize,
    /// The row exactly as written, quotes included
    pub raw: String,
    pub reason: RowError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    pub fn summary(&self) -> String {
        format!(
            "{} records loaded, {} rows rejected",
            self.records.len(),
            self.rejected.len()
        )
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse one row into a Record.
///
/// Text fields are kept verbatim; numeric fields tolerate surrounding
/// whitespace. Cost must be finite and non-negative.
pub fn parse_row(fields: &StringRecord) -> std::result::Result<Record, RowError> {
    if fields.len() != FIELD_COUNT {
        return Err(RowError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let unit_cost = parse_cost(&fields[3]).ok_or_else(|| RowError::InvalidCost(fields[3].to_string()))?;
    let quantity = parse_quantity(&fields[4])
        .ok_or_else(|| RowError::InvalidQuantity(fields[4].to_string()))?;

    Ok(Record::new(&fields[0], &fields[1], &fields[2], unit_cost, quantity))
}

/// Non-negative finite decimal, shared with the capture prompt
pub fn parse_cost(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
}

/// Non-negative whole number, shared with the capture and re-stock prompts
pub fn parse_quantity(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok()
}

/// Read every row from `reader`, splitting good rows from rejected ones.
///
/// Only an I/O failure of the underlying reader is an error.
pub fn read_records<R: io::Read>(mut reader: R) -> io::Result<LoadReport> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut report = LoadReport::default();
    let mut bytes = ByteRecord::new();

    while rdr.read_byte_record(&mut bytes).map_err(into_io_error)? {
        let (start, first_line) = bytes
            .position()
            .map(|pos| (pos.byte() as usize, pos.line() as usize))
            .unwrap_or((0, 1));
        let end = rdr.position().byte() as usize;
        let (skipped, raw) = source_text(&data, start, end);
        let line = first_line + skipped;

        let parsed = StringRecord::from_byte_record(bytes.clone())
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(|fields| parse_row(&fields));

        match parsed {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                warn!(line, %reason, "skipping malformed row");
                report.rejected.push(RejectedRow { line, raw, reason });
            }
        }
    }

    Ok(report)
}

/// Load the store file at `path`.
///
/// A missing file is an error here; callers decide whether to start empty.
pub fn load(path: &Path) -> Result<LoadReport> {
    let file = File::open(path).map_err(|e| InventoryError::io(path, e))?;
    let report = read_records(file).map_err(|e| InventoryError::io(path, e))?;

    info!(path = %path.display(), loaded = report.records.len(), rejected = report.rejected.len(), "store loaded");
    Ok(report)
}

// ============================================================================
// WRITING
// ============================================================================

/// Write records in store order, quoting only fields that need it.
pub fn write_records<W: io::Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Overwrite the store file with `records`.
///
/// Writes a sibling `.tmp` file first and renames it into place, so an
/// interrupted save leaves the previous file intact.
pub fn save(path: &Path, records: &[Record]) -> Result<()> {
    let tmp = tmp_path(path);

    let file = File::create(&tmp).map_err(|e| InventoryError::io(&tmp, e))?;
    let written = write_records(&file, records)
        .and_then(|_| file.sync_all().map_err(|e| InventoryError::io(&tmp, e)));

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path).map_err(|e| InventoryError::io(path, e))?;

    info!(path = %path.display(), records = records.len(), "store saved");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Text of one row as it appears in the file, plus the number of blank
/// lines the reader passed over before it
fn source_text(data: &[u8], start: usize, end: usize) -> (usize, String) {
    let span = data.get(start..end).unwrap_or(&[]);
    let is_break = |b: &u8| matches!(b, b'\r' | b'\n');

    let body_start = span.iter().position(|b| !is_break(b)).unwrap_or(span.len());
    let skipped = span[..body_start].iter().filter(|b| **b == b'\n').count();

    let body = &span[body_start..];
    let body_end = body.iter().rposition(|b| !is_break(b)).map_or(0, |i| i + 1);

    (skipped, String::from_utf8_lossy(&body[..body_end]).into_owned())
}

fn into_io_error(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", other)),
    }
}
