//! Catalog ingestion and the in-memory snapshot.
//!
//! The loader is deliberately forgiving: damaged data rows are kept on a
//! best-effort basis (or skipped with a warning when the reader cannot
//! produce them at all), and only an unreadable source fails the load. The
//! caller can therefore always distinguish "zero products" from "failed to
//! load".

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::ProductRecord;

/// Parse delimiter-separated text (header row + data rows) into records.
///
/// Header names become field keys: the known columns map onto
/// [`ProductRecord`] fields, every other column is preserved in `extra`.
/// Row order is dataset order and blank lines are skipped. Returns
/// [`Error::Load`] only when the header itself cannot be read.
pub fn parse_records(input: &str) -> Result<Vec<ProductRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Load(format!("unreadable header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, row) in reader.byte_records().enumerate() {
        match row {
            Ok(row) => records.push(record_from_row(&headers, &row)),
            Err(e) => warn!(row = row_no + 1, "skipping unreadable row: {e}"),
        }
    }
    debug!(count = records.len(), "parsed catalog rows");
    Ok(records)
}

/// Read and parse the catalog at `path`.
///
/// Falls back to a lossy UTF-8 read for files with stray invalid bytes;
/// an unreachable file is a whole-load failure.
pub fn load_csv(path: &Path) -> Result<Vec<ProductRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => String::from_utf8_lossy(
            &fs::read(path).map_err(|e| Error::Load(format!("cannot read {}: {e}", path.display())))?,
        )
        .to_string(),
    };
    parse_records(&text)
}

fn record_from_row(headers: &[String], row: &csv::ByteRecord) -> ProductRecord {
    let mut record = ProductRecord::default();
    for (header, raw) in headers.iter().zip(row.iter()) {
        let value = String::from_utf8_lossy(raw).trim().to_string();
        if value.is_empty() {
            continue;
        }
        match header.as_str() {
            "title" => record.title = value,
            "description" => record.description = Some(value),
            "brand" => record.brand = Some(value),
            "price" => record.price = Some(value),
            "categories" => record.categories = Some(value),
            "images" => record.images = Some(value),
            _ => {
                record.extra.insert(header.clone(), value);
            }
        }
    }
    record
}

/// The full record set as of the last successful load.
///
/// Searches borrow [`Catalog::records`] read-only; a reload replaces the
/// snapshot wholesale. Loads are guarded by numbered tickets so a response
/// that arrives after a newer load completed can never win.
#[derive(Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    installed: u64,
    issued: u64,
}

/// Token tying a load attempt to its place in the issue order.
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a load attempt. Later tickets supersede earlier ones.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket { id: self.issued }
    }

    /// Install a finished load. Returns false (snapshot untouched) when a
    /// newer load already completed.
    pub fn install(&mut self, ticket: LoadTicket, records: Vec<ProductRecord>) -> bool {
        if ticket.id <= self.installed {
            debug!(ticket = ticket.id, installed = self.installed, "stale load dropped");
            return false;
        }
        self.installed = ticket.id;
        self.records = records;
        true
    }
}
