//! Pipeline entry points.
//!
//! - `export_to_file`: fetch the previous day's vacancies into the CSV file
//! - `run_export`: the same loop against any source and sink

pub mod export;

pub use export::{ExportSummary, export_to_file, pinned_month_mismatch, run_export};
