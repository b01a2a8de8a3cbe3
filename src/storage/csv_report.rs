// Per-system summary rows written to the results CSV
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::operations::DepositCounts;

/// One CSV record per scanned system. Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemSummaryRow {
    pub symbol: String,
    pub x: i32,
    pub y: i32,
    pub markets: u32,
    pub common_metal: u32,
    pub precious_metal: u32,
    pub rare_metal: u32,
    pub mineral: u32,
    pub ice_crystal: u32,
    pub resource_balance: i64,
}

impl SystemSummaryRow {
    pub fn new(symbol: &str, x: i32, y: i32) -> Self {
        Self {
            symbol: symbol.to_string(),
            x,
            y,
            ..Self::default()
        }
    }

    pub fn add_deposits(&mut self, deposits: &DepositCounts) {
        self.common_metal += deposits.common_metal;
        self.precious_metal += deposits.precious_metal;
        self.rare_metal += deposits.rare_metal;
        self.mineral += deposits.mineral;
        self.ice_crystal += deposits.ice_crystal;
    }
}

/// Headerless CSV writer that lives for a whole run. Rows from every page
/// accumulate in the same file; buffered rows are flushed on drop.
pub struct ReportWriter<W: Write = File> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ReportWriter<File> {
    /// Create (or truncate) the results file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        Self { writer, rows: 0 }
    }

    pub fn write_row(&mut self, row: &SystemSummaryRow) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W, Box<dyn std::error::Error>> {
        let inner = self
            .writer
            .into_inner()
            .map_err(|e| format!("Failed to flush results: {}", e.error()))?;
        Ok(inner)
    }
}
