//! Service layer for the vacancy exporter.
//!
//! - `HhClient`: the live vacancies endpoint
//! - `window_pages` / `vacancy_pages`: lazy page streams over time windows

mod vacancies;

#[cfg(test)]
pub(crate) mod testing;

pub use vacancies::{
    HhClient, VacancyQuery, VacancySource, parse_page, vacancy_pages, window_pages,
};
