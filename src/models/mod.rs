// src/models/mod.rs

//! Domain models for the vacancy exporter.

mod config;
mod vacancy;
mod window;

// Re-export all public types
pub use config::{ApiConfig, Config, HttpConfig, MAX_PER_PAGE, OutputConfig, parse_month};
pub use vacancy::{Area, CsvRow, Salary, Vacancy, VacancyPage};
pub use window::{TimeWindow, WINDOWS_PER_DAY};
