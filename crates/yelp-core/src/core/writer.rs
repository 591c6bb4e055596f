//! `|`-delimited row output with header-on-first-row semantics

use crate::core::records::Record;
use crate::error::ExportError;
use std::fs::File;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

pub const DELIMITER: u8 = b'|';

/// Writes one record kind to a sink. The header goes out right before the
/// first row, so an export that finds nothing leaves the sink empty.
pub struct RowWriter<W: Write, R: Record> {
    inner: csv::Writer<W>,
    header_written: bool,
    rows: usize,
    _record: PhantomData<R>,
}

impl<R: Record> RowWriter<File, R> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self, ExportError> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write, R: Record> RowWriter<W, R> {
    pub fn new(sink: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(sink);

        Self {
            inner,
            header_written: false,
            rows: 0,
            _record: PhantomData,
        }
    }

    pub fn write_record(&mut self, record: &R) -> Result<(), ExportError> {
        if !self.header_written {
            self.inner.write_record(R::HEADERS)?;
            self.header_written = true;
        }
        self.inner.write_record(record.fields())?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the sink
    pub fn finish(self) -> Result<W, ExportError> {
        self.inner
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}
