//! Subscription aggregation over paginated contract queries.
//!
//! Pages are fetched strictly one after another because every request needs
//! the previous page's end cursor. Filtering by customer and status view
//! happens locally, after each fetch.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Contract, ContractStatus, Page};
use crate::services::admin_api::AdminApiError;
use crate::services::metrics;

/// Source of contract pages, starting at an optional cursor.
#[async_trait]
pub trait ContractPageFetcher: Send + Sync {
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page<Contract>, AdminApiError>;
}

/// Named status filter applied after fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusView {
    #[default]
    All,
    /// Active and failed-billing contracts.
    Active,
    Paused,
    Cancelled,
}

impl StatusView {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusView::All => "all",
            StatusView::Active => "active",
            StatusView::Paused => "paused",
            StatusView::Cancelled => "cancelled",
        }
    }

    /// Unknown view names fall back to `All`.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => StatusView::Active,
            "paused" => StatusView::Paused,
            "cancelled" => StatusView::Cancelled,
            _ => StatusView::All,
        }
    }

    pub fn matches(&self, status: &ContractStatus) -> bool {
        match self {
            StatusView::All => true,
            StatusView::Active => {
                matches!(status, ContractStatus::Active | ContractStatus::Failed)
            }
            StatusView::Paused => *status == ContractStatus::Paused,
            StatusView::Cancelled => *status == ContractStatus::Cancelled,
        }
    }
}

/// Outcome of one aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub total_count: u64,
    /// Matching contracts of the first fetched page.
    pub sample: Vec<Contract>,
    /// Latest event timestamp among matching contracts, as sent by the API.
    pub latest_event_timestamp: Option<String>,
    /// The page ceiling stopped the walk while more pages were available.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("customer id is required")]
    MissingCustomerId,

    #[error("invalid customer id: {0}")]
    InvalidCustomerId(String),

    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] AdminApiError),
}

/// Count contracts matching `view` (and `customer_id`, when given) across at
/// most `page_ceiling` pages.
pub async fn aggregate<F>(
    fetcher: &F,
    view: StatusView,
    customer_id: Option<&str>,
    page_ceiling: u32,
) -> Result<AggregationResult, AggregationError>
where
    F: ContractPageFetcher + ?Sized,
{
    let mut pages_fetched: u32 = 0;
    let outcome = walk_pages(fetcher, view, customer_id, page_ceiling, &mut pages_fetched).await;

    metrics::record_pages_fetched(pages_fetched);
    metrics::record_aggregation(view.as_str(), if outcome.is_ok() { "ok" } else { "error" });

    outcome
}

async fn walk_pages<F>(
    fetcher: &F,
    view: StatusView,
    customer_id: Option<&str>,
    page_ceiling: u32,
    pages_fetched: &mut u32,
) -> Result<AggregationResult, AggregationError>
where
    F: ContractPageFetcher + ?Sized,
{
    let mut result = AggregationResult::default();
    if page_ceiling == 0 {
        return Ok(result);
    }

    let mut cursor: Option<String> = None;
    let mut sample: Option<Vec<Contract>> = None;
    let mut latest: Option<(DateTime<FixedOffset>, String)> = None;

    loop {
        let page = fetcher.fetch_page(cursor.as_deref()).await.map_err(|e| {
            tracing::error!(
                customer_id = ?customer_id,
                page = *pages_fetched + 1,
                error = %e,
                "Subscription page fetch failed"
            );
            e
        })?;
        *pages_fetched += 1;

        let filtered: Vec<Contract> = page
            .items
            .into_iter()
            .filter(|c| customer_id.is_none_or(|id| c.customer.id == id))
            .filter(|c| view.matches(&c.status))
            .collect();

        result.total_count += filtered.len() as u64;

        for contract in &filtered {
            let Some(instant) = contract.event_instant() else {
                continue;
            };
            if latest.as_ref().is_none_or(|(current, _)| instant > *current) {
                if let Some(raw) = contract.event_time() {
                    latest = Some((instant, raw.to_string()));
                }
            }
        }

        tracing::debug!(
            customer_id = ?customer_id,
            page = *pages_fetched,
            matched = filtered.len(),
            has_next_page = page.page_info.has_next_page,
            "Fetched subscription page"
        );

        if sample.is_none() {
            sample = Some(filtered);
        }

        let Some(next) = page.page_info.next_cursor() else {
            break;
        };
        if *pages_fetched >= page_ceiling {
            result.truncated = true;
            tracing::debug!(
                customer_id = ?customer_id,
                page_ceiling,
                "Stopped at page ceiling"
            );
            break;
        }
        cursor = Some(next.to_string());
    }

    result.sample = sample.unwrap_or_default();
    result.latest_event_timestamp = latest.map(|(_, raw)| raw);
    Ok(result)
}

/// Order contracts most-recent-first by event time; contracts without a usable
/// timestamp go last, keeping their relative order.
pub fn sort_by_event_time(contracts: &mut [Contract]) {
    contracts.sort_by(|a, b| b.event_instant().cmp(&a.event_instant()));
}
