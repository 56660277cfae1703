//! Scripted vacancy source for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::{Vacancy, VacancyPage};
use crate::services::{VacancyQuery, VacancySource};

/// Answers every window with the same number of pages and records each query.
pub struct ScriptedSource {
    pages: u32,
    items_per_page: usize,
    items: Option<Vec<Value>>,
    later_page_count: Option<u32>,
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<VacancyQuery>>,
}

impl ScriptedSource {
    /// Every window reports `pages` pages of `items_per_page` generated items.
    pub fn new(pages: u32, items_per_page: usize) -> Self {
        Self {
            pages,
            items_per_page,
            items: None,
            later_page_count: None,
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve the given raw items on every page instead of generated ones.
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items_per_page = items.len();
        self.items = Some(items);
        self
    }

    /// Report a different page count on pages after the first.
    pub fn with_later_page_count(mut self, pages: u32) -> Self {
        self.later_page_count = Some(pages);
        self
    }

    /// Fail the zero-based `call`-th request with a transport error.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<VacancyQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn items_for(&self, query: &VacancyQuery) -> Vec<Value> {
        match &self.items {
            Some(items) => items.clone(),
            None => (0..self.items_per_page)
                .map(|i| {
                    json!({
                        "name": format!("{} p{} #{}", query.date_from, query.page, i),
                        "salary": null,
                        "area": { "name": "Москва" },
                        "published_at": query.date_from,
                    })
                })
                .collect(),
        }
    }
}

#[async_trait]
impl VacancySource for ScriptedSource {
    async fn fetch_page(&self, query: &VacancyQuery) -> Result<VacancyPage> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(query.clone());
            calls.len() - 1
        };

        if self.fail_on_call == Some(call) {
            return Err(AppError::fetch(query.to_string(), "connection reset by peer"));
        }

        let pages = match (query.page, self.later_page_count) {
            (0, _) | (_, None) => self.pages,
            (_, Some(later)) => later,
        };

        let items = self
            .items_for(query)
            .into_iter()
            .map(serde_json::from_value::<Vacancy>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::fetch(query.to_string(), e))?;

        Ok(VacancyPage {
            pages,
            found: u64::from(pages) * self.items_per_page as u64,
            items,
        })
    }
}
