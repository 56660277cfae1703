//! Vacancy records as returned by the search endpoint, and their CSV rows.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyPage {
    /// Total number of pages for the query
    pub pages: u32,

    /// Total number of matching vacancies
    #[serde(default)]
    pub found: u64,

    pub items: Vec<Vacancy>,
}

/// A single job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct Vacancy {
    pub name: String,

    #[serde(default)]
    pub salary: Option<Salary>,

    pub area: Area,

    /// ISO 8601 timestamp, kept as sent
    pub published_at: String,
}

/// Salary range; any part may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Salary {
    #[serde(default)]
    pub from: Option<Number>,

    #[serde(default)]
    pub to: Option<Number>,

    #[serde(default)]
    pub currency: Option<String>,
}

/// Region a vacancy is posted in.
#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: String,
}

/// A flattened output row, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub name: String,
    pub salary_from: String,
    pub salary_to: String,
    pub currency: String,
    pub area: String,
    pub published_at: String,
}

impl From<&Vacancy> for CsvRow {
    fn from(vacancy: &Vacancy) -> Self {
        let salary = vacancy.salary.clone().unwrap_or_default();
        let number = |n: Option<Number>| n.map(|n| n.to_string()).unwrap_or_default();

        Self {
            name: vacancy.name.clone(),
            salary_from: number(salary.from),
            salary_to: number(salary.to),
            currency: salary.currency.unwrap_or_default(),
            area: vacancy.area.name.clone(),
            published_at: vacancy.published_at.clone(),
        }
    }
}
