// src/services/vacancies.rs

//! Vacancy page fetching.
//!
//! Pages are pulled lazily: one request per poll of the stream, never more
//! than one in flight. The first page of a window tells how many pages follow.

use std::fmt;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Config, TimeWindow, VacancyPage};
use crate::utils::http::create_client;

/// Query parameters for one page request, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyQuery {
    pub page: u32,
    pub per_page: u32,
    pub specialization: u32,
    pub date_from: String,
    pub date_to: String,
}

impl VacancyQuery {
    /// Build the page-0 query for a window.
    pub fn for_window(window: &TimeWindow, api: &ApiConfig) -> Self {
        Self {
            page: 0,
            per_page: api.per_page,
            specialization: api.specialization,
            date_from: window.date_from(&api.month),
            date_to: window.date_to(&api.month),
        }
    }

    /// Same window, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

impl fmt::Display for VacancyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} of {}..{}", self.page, self.date_from, self.date_to)
    }
}

/// Something that can answer a vacancy search query.
#[async_trait]
pub trait VacancySource: Send + Sync {
    async fn fetch_page(&self, query: &VacancyQuery) -> Result<VacancyPage>;
}

/// Client for the hh.ru vacancies endpoint.
pub struct HhClient {
    client: Client,
    base_url: String,
}

impl HhClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_client(&config.http)?;
        Ok(Self::new(client, &config.api.base_url))
    }

    /// GET request for one page, parameters encoded in wire order.
    pub fn request(&self, query: &VacancyQuery) -> RequestBuilder {
        self.client.get(&self.base_url).query(query)
    }
}

/// Decode a page body as sent by the endpoint.
pub fn parse_page(body: &[u8], context: &str) -> Result<VacancyPage> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::fetch(context, format!("invalid response body: {e}")))
}

#[async_trait]
impl VacancySource for HhClient {
    async fn fetch_page(&self, query: &VacancyQuery) -> Result<VacancyPage> {
        let context = query.to_string();

        let response = self
            .request(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(&context, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::fetch(&context, e))?;

        parse_page(&body, &context)
    }
}

/// Position within a window's pages.
#[derive(Debug, Clone, Copy, Default)]
struct PageCursor {
    page: u32,
    /// Page count, known once page 0 has been read
    total: Option<u32>,
}

impl PageCursor {
    fn exhausted(&self) -> bool {
        self.total.is_some_and(|total| self.page >= total)
    }

    fn advance(self, reported: u32) -> Self {
        Self {
            page: self.page + 1,
            total: Some(self.total.unwrap_or(reported)),
        }
    }
}

async fn next_page<S>(
    source: &S,
    query: VacancyQuery,
    cursor: PageCursor,
) -> Result<Option<(VacancyPage, PageCursor)>>
where
    S: VacancySource + ?Sized,
{
    if cursor.exhausted() {
        return Ok(None);
    }

    let query = query.with_page(cursor.page);
    let page = source.fetch_page(&query).await?;
    log::debug!(
        "Fetched {} ({} items, {} found over {} pages)",
        query,
        page.items.len(),
        page.found,
        page.pages
    );

    let next = cursor.advance(page.pages);
    Ok(Some((page, next)))
}

/// Stream every page of one window, page 0 first.
///
/// Page 0 is always requested; its `pages` value bounds the rest.
pub fn window_pages<'a, S>(
    source: &'a S,
    query: VacancyQuery,
) -> impl Stream<Item = Result<VacancyPage>> + 'a
where
    S: VacancySource + ?Sized,
{
    stream::try_unfold(PageCursor::default(), move |cursor| {
        next_page(source, query.clone(), cursor)
    })
}

/// Stream the pages of all windows back to back, in window order.
pub fn vacancy_pages<'a, S>(
    source: &'a S,
    windows: &[TimeWindow],
    api: &ApiConfig,
) -> impl Stream<Item = Result<VacancyPage>> + 'a
where
    S: VacancySource + ?Sized,
{
    let queries: Vec<VacancyQuery> = windows
        .iter()
        .map(|window| VacancyQuery::for_window(window, api))
        .collect();

    stream::iter(queries).flat_map(move |query| window_pages(source, query))
}
