//! Output storage for exported rows.

pub mod csv;

// Re-export for convenience
pub use self::csv::{BOM, CsvSink};
