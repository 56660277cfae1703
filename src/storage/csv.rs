// src/storage/csv.rs

//! CSV output for vacancy rows.
//!
//! The file starts with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding. Records are comma-delimited, minimally quoted and CRLF
//! terminated, with no header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::CsvRow;

/// UTF-8 byte-order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Row-at-a-time CSV writer.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer, emitting the byte-order mark immediately.
    pub fn new(mut inner: W) -> Result<Self> {
        inner.write_all(BOM)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        Ok(Self { writer, rows: 0 })
    }

    /// Append one row.
    pub fn write_row(&mut self, row: &CsvRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered rows and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}
