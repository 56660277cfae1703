// src/pipeline/export.rs

//! Vacancy export pipeline.
//!
//! Windows → pages → rows → CSV, strictly in that order and one request at a
//! time. Only the page being written is held in memory.

use std::io::Write;
use std::path::PathBuf;
use std::pin::pin;

use chrono::{DateTime, NaiveDateTime, Utc};
use futures::TryStreamExt;

use crate::error::Result;
use crate::models::{ApiConfig, Config, CsvRow, TimeWindow};
use crate::services::{VacancySource, vacancy_pages};
use crate::storage::CsvSink;

/// Counters for a finished export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub window_count: usize,
    pub page_count: usize,
    pub row_count: usize,
    pub output: Option<PathBuf>,
}

impl ExportSummary {
    /// Wall-clock duration of the run in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// Write every vacancy of `windows` to `sink`, in window/page/item order.
///
/// The first failing request aborts the export; rows already written stay
/// in the sink and nothing is written for the failed page.
pub async fn run_export<S, W>(
    source: &S,
    windows: &[TimeWindow],
    api: &ApiConfig,
    sink: &mut CsvSink<W>,
) -> Result<ExportSummary>
where
    S: VacancySource + ?Sized,
    W: Write,
{
    let start_time = Utc::now();
    let mut page_count = 0;
    let mut row_count = 0;

    let mut pages = pin!(vacancy_pages(source, windows, api));
    while let Some(page) = pages.try_next().await? {
        page_count += 1;
        for vacancy in &page.items {
            sink.write_row(&CsvRow::from(vacancy))?;
            row_count += 1;
        }
    }

    Ok(ExportSummary {
        start_time,
        end_time: Utc::now(),
        window_count: windows.len(),
        page_count,
        row_count,
        output: None,
    })
}

/// Returns the real `YYYY-MM` of the queried span when it leaves the pinned
/// month.
///
/// The span runs from yesterday to today, so on the first of a month
/// yesterday already belongs to the previous one.
pub fn pinned_month_mismatch(month: &str, now: NaiveDateTime) -> Option<String> {
    let today = now.date();
    let yesterday = today.pred_opt().unwrap_or(today);
    [yesterday, today]
        .iter()
        .map(|day| day.format("%Y-%m").to_string())
        .find(|actual| actual != month)
}

/// Export the day before `now` to the configured CSV file.
pub async fn export_to_file<S>(
    config: &Config,
    source: &S,
    now: NaiveDateTime,
) -> Result<ExportSummary>
where
    S: VacancySource + ?Sized,
{
    let windows = TimeWindow::partition(now)?;

    if let (Some(first), Some(last)) = (windows.first(), windows.last()) {
        log::info!(
            "Exporting {} hourly windows ({} .. {}) to {}",
            windows.len(),
            first.date_from(&config.api.month),
            last.date_to(&config.api.month),
            config.output.path.display()
        );
    }

    if let Some(actual) = pinned_month_mismatch(&config.api.month, now) {
        log::warn!(
            "Query dates are pinned to {} but the queried day falls in {}; \
             results will not cover the last day",
            config.api.month,
            actual
        );
    }

    let mut sink = CsvSink::create(&config.output.path)?;
    let mut summary = run_export(source, &windows, &config.api, &mut sink).await?;
    sink.finish()?;

    summary.output = Some(config.output.path.clone());
    Ok(summary)
}
