//! Customer listing and per-customer subscription views.

use futures::future::try_join_all;

use crate::config::AggregationConfig;
use crate::dtos::ContractSummary;
use crate::models::gid::{compose_gid, parse_numeric_gid};
use crate::models::{
    CustomerListing, CustomerNode, CustomerSubscriptions, CustomerSummary, SubscriptionSort,
    SubscriptionsView,
};
use crate::services::admin_api::{AdminApiClient, CustomerContractsFetcher};
use crate::services::aggregator::{aggregate, sort_by_event_time, AggregationError, StatusView};

#[derive(Clone)]
pub struct CustomerService {
    client: AdminApiClient,
    aggregation: AggregationConfig,
}

impl CustomerService {
    pub fn new(client: AdminApiClient, aggregation: AggregationConfig) -> Self {
        Self {
            client,
            aggregation,
        }
    }

    /// One page of customers with their subscription counts.
    ///
    /// Customers are aggregated concurrently; a failure for any of them fails
    /// the whole listing.
    pub async fn list_customers(
        &self,
        after: Option<&str>,
        view: SubscriptionsView,
        sort: SubscriptionSort,
    ) -> Result<CustomerListing, AggregationError> {
        let page = self
            .client
            .customers(self.aggregation.customers_page_size, after)
            .await?;

        let summaries = try_join_all(page.items.into_iter().map(|node| self.summarize(node))).await?;

        let mut customers: Vec<CustomerSummary> = summaries
            .into_iter()
            .flatten()
            .filter(|c| view.matches(c.subscription_count))
            .collect();
        sort.apply(&mut customers);

        tracing::info!(
            customers = customers.len(),
            has_next_page = page.page_info.has_next_page,
            view = ?view,
            "Listed customers"
        );

        Ok(CustomerListing {
            customers,
            page_info: page.page_info,
        })
    }

    async fn summarize(&self, node: CustomerNode) -> Result<Option<CustomerSummary>, AggregationError> {
        let Some(numeric_id) = parse_numeric_gid(&node.id) else {
            tracing::warn!(customer_id = %node.id, "Skipping customer with non-numeric id");
            return Ok(None);
        };

        let fetcher = CustomerContractsFetcher::new(
            &self.client,
            &node.id,
            self.aggregation.contracts_page_size,
        );
        let result = aggregate(
            &fetcher,
            StatusView::All,
            Some(&node.id),
            self.aggregation.page_ceiling,
        )
        .await?;

        Ok(Some(CustomerSummary {
            id: node.id,
            numeric_id,
            display_name: node.display_name,
            email: node.email,
            subscription_count: result.total_count,
            last_order_date: result.latest_event_timestamp,
        }))
    }

    /// Subscription contracts of one customer under a status view.
    pub async fn customer_subscriptions(
        &self,
        numeric_id: Option<&str>,
        view: StatusView,
    ) -> Result<CustomerSubscriptions, AggregationError> {
        let numeric_id = parse_customer_id(numeric_id)?;
        let customer_gid = compose_gid("Customer", numeric_id);

        let fetcher = CustomerContractsFetcher::new(
            &self.client,
            &customer_gid,
            self.aggregation.contracts_page_size,
        );
        let result = aggregate(
            &fetcher,
            view,
            Some(&customer_gid),
            self.aggregation.page_ceiling,
        )
        .await?;

        let customer_name = match result
            .sample
            .first()
            .and_then(|c| c.customer.display_name.clone())
            .filter(|name| !name.is_empty())
        {
            Some(name) => name,
            None => self
                .lookup_customer_name(&customer_gid)
                .await
                .unwrap_or_else(|| numeric_id.to_string()),
        };

        let mut sample = result.sample;
        sort_by_event_time(&mut sample);

        tracing::info!(
            customer_id = %customer_gid,
            view = view.as_str(),
            total_count = result.total_count,
            "Aggregated customer subscriptions"
        );

        Ok(CustomerSubscriptions {
            customer_id: numeric_id.to_string(),
            customer_name,
            total_count: result.total_count,
            contracts: sample.iter().map(ContractSummary::from_contract).collect(),
        })
    }

    /// Best-effort name lookup; failures only cost the display name.
    async fn lookup_customer_name(&self, customer_gid: &str) -> Option<String> {
        match self.client.customer_display_name(customer_gid).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(customer_id = %customer_gid, error = %e, "Customer name lookup failed");
                None
            }
        }
    }
}

/// Validate the numeric customer id taken from the request path.
pub fn parse_customer_id(raw: Option<&str>) -> Result<u64, AggregationError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(AggregationError::MissingCustomerId);
    };
    raw.parse()
        .map_err(|_| AggregationError::InvalidCustomerId(raw.to_string()))
}
