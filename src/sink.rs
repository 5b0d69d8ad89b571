//! Streaming boundary to the export collaborator.
//!
//! The file-format layer (xlsx writing in the original workflow) lives
//! outside this crate. It consumes an ordered stream of rendered rows
//! through [`RowSink`]: a header describing the column layout, then one
//! [`MaterializedRow`] per nutrient in table order.

use crate::error_codes;
use crate::materialize::MaterializedRow;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Stream schema version, bumped on any breaking change to the header or
/// row records.
pub const STREAM_VERSION: &str = "1";

#[derive(Debug, Error)]
pub enum SinkError {
    #[error(
        "[BLANKGRID_SINK_001] failed to write to the export sink: {message}. Suggestion: check the output destination and retry."
    )]
    WriteFailed { message: String },
}

impl SinkError {
    pub fn code(&self) -> &'static str {
        match self {
            SinkError::WriteFailed { .. } => error_codes::SINK_WRITE_FAILED,
        }
    }

    fn from_display(e: impl std::fmt::Display) -> SinkError {
        SinkError::WriteFailed {
            message: e.to_string(),
        }
    }
}

/// Column layout emitted once before any rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridHeader {
    pub version: &'static str,
    /// Rendered column labels in cell order, e.g. `"Besugo F"`.
    pub columns: Vec<String>,
}

/// Trait for streaming rendered rows to a consumer.
pub trait RowSink {
    /// Called once before any rows are emitted.
    ///
    /// Default is a no-op so sinks that don't need the layout can ignore it.
    fn begin(&mut self, _header: &GridHeader) -> Result<(), SinkError> {
        Ok(())
    }

    fn emit(&mut self, row: MaterializedRow) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A sink that collects rows into a Vec for tests and embedding.
#[derive(Debug, Default)]
pub struct VecSink {
    rows: Vec<MaterializedRow>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn into_rows(self) -> Vec<MaterializedRow> {
        self.rows
    }
}

impl RowSink for VecSink {
    fn emit(&mut self, row: MaterializedRow) -> Result<(), SinkError> {
        self.rows.push(row);
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonLinesHeader<'a> {
    kind: &'static str,
    version: &'static str,
    columns: &'a [String],
}

/// Writes a header record, then one JSON object per row, newline-delimited.
pub struct JsonLinesSink<W: Write> {
    w: W,
    wrote_header: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            wrote_header: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn begin(&mut self, header: &GridHeader) -> Result<(), SinkError> {
        if self.wrote_header {
            return Ok(());
        }

        let record = JsonLinesHeader {
            kind: "Header",
            version: header.version,
            columns: &header.columns,
        };
        serde_json::to_writer(&mut self.w, &record).map_err(SinkError::from_display)?;
        self.w.write_all(b"\n").map_err(SinkError::from_display)?;

        self.wrote_header = true;
        Ok(())
    }

    fn emit(&mut self, row: MaterializedRow) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.w, &row).map_err(SinkError::from_display)?;
        self.w.write_all(b"\n").map_err(SinkError::from_display)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.w.flush().map_err(SinkError::from_display)
    }
}
