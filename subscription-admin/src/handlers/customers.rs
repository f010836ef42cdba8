//! Customer and customer-subscription endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;

use crate::models::{CustomerListing, CustomerSubscriptions, SubscriptionSort, SubscriptionsView};
use crate::services::{AggregationError, StatusView};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersParams {
    pub after: Option<String>,
    pub subs_view: Option<String>,
    pub subs_sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSubscriptionsParams {
    pub saved_view: Option<String>,
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::MissingCustomerId | AggregationError::InvalidCustomerId(_) => {
                AppError::BadRequest(anyhow::Error::new(err))
            }
            AggregationError::Upstream(e) => {
                tracing::warn!(error = %e, "Upstream Admin API failure");
                AppError::BadGateway(e.public_message())
            }
        }
    }
}

/// List one page of customers with their subscription counts.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListCustomersParams>,
) -> Result<Json<CustomerListing>, AppError> {
    let view = SubscriptionsView::from_string(params.subs_view.as_deref().unwrap_or("all"));
    let sort = SubscriptionSort::from_string(params.subs_sort.as_deref().unwrap_or("subs desc"));
    let after = params.after.as_deref().filter(|a| !a.is_empty());

    let listing = state.customers.list_customers(after, view, sort).await?;

    Ok(Json(listing))
}

/// Subscription contracts of one customer.
pub async fn customer_subscriptions(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(params): Query<CustomerSubscriptionsParams>,
) -> Result<Json<CustomerSubscriptions>, AppError> {
    let view = StatusView::from_string(params.saved_view.as_deref().unwrap_or("all"));

    let subscriptions = state
        .customers
        .customer_subscriptions(Some(&customer_id), view)
        .await?;

    Ok(Json(subscriptions))
}
