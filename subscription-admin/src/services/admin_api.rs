//! GraphQL Admin API client.
//!
//! Every call is a single POST of `{query, variables}` to the shop's GraphQL
//! endpoint. Failures are returned as-is; nothing here retries.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use service_core::observability::TracedClientExt;
use thiserror::Error;

use crate::config::AdminApiConfig;
use crate::graphql::documents;
use crate::graphql::wire::{
    CustomerNameData, CustomersData, GraphQlResponse, SubscriptionContractsData,
};
use crate::models::{Contract, CustomerNode, Page};
use crate::services::aggregator::ContractPageFetcher;
use crate::services::metrics;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, Error)]
pub enum AdminApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Admin API {operation} returned status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Admin API response contained no data")]
    MissingData,

    #[error("Failed to decode Admin API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdminApiError {
    /// Summary safe to hand back to callers. Upstream bodies stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AdminApiError::Transport(_) => "Admin API request failed".to_string(),
            AdminApiError::Status {
                operation, status, ..
            } => format!("Admin API {} returned status {}", operation, status),
            AdminApiError::GraphQl(_) => "Admin API returned GraphQL errors".to_string(),
            AdminApiError::MissingData => "Admin API response contained no data".to_string(),
            AdminApiError::Decode(_) => "Failed to decode Admin API response".to_string(),
        }
    }
}

/// Client for the shop's GraphQL Admin API.
#[derive(Clone)]
pub struct AdminApiClient {
    client: Client,
    config: AdminApiConfig,
}

impl AdminApiClient {
    pub fn new(config: AdminApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if an access token is set.
    pub fn is_configured(&self) -> bool {
        !self.config.access_token.expose_secret().is_empty()
    }

    /// Fetch one page of subscription contracts.
    ///
    /// `query` is the Admin API search expression, e.g. `customer_id:"gid://..."`.
    pub async fn subscription_contracts(
        &self,
        first: u32,
        after: Option<&str>,
        query: Option<&str>,
    ) -> Result<Page<Contract>, AdminApiError> {
        let data: SubscriptionContractsData = self
            .execute(
                "subscription_contracts",
                documents::SUBSCRIPTION_CONTRACTS,
                json!({ "first": first, "after": after, "query": query }),
            )
            .await?;

        Ok(data.subscription_contracts.into())
    }

    /// Fetch one page of customers.
    pub async fn customers(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<Page<CustomerNode>, AdminApiError> {
        let data: CustomersData = self
            .execute(
                "customers",
                documents::CUSTOMERS,
                json!({ "first": first, "after": after }),
            )
            .await?;

        Ok(data.customers.into())
    }

    /// Look up a customer's display name. `None` when the customer does not exist.
    pub async fn customer_display_name(
        &self,
        customer_gid: &str,
    ) -> Result<Option<String>, AdminApiError> {
        let data: CustomerNameData = self
            .execute(
                "customer_name",
                documents::CUSTOMER_NAME,
                json!({ "id": customer_gid }),
            )
            .await?;

        Ok(data
            .customer
            .and_then(|c| c.display_name)
            .filter(|name| !name.is_empty()))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AdminApiError> {
        let result = self.send(operation, query, variables).await;
        metrics::record_admin_api_request(operation, if result.is_ok() { "ok" } else { "error" });

        result.map_err(|e| {
            tracing::error!(operation, error = %e, "Admin API request failed");
            e
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AdminApiError> {
        let url = self.config.graphql_url();

        let response = self
            .client
            .traced_post(&url)
            .header(ACCESS_TOKEN_HEADER, self.config.access_token.expose_secret())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, "Admin API response");

        if !status.is_success() {
            return Err(AdminApiError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = serde_json::from_str(&body)?;

        if !envelope.errors.is_empty() {
            return Err(AdminApiError::GraphQl(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope.data.ok_or(AdminApiError::MissingData)
    }
}

/// Pages through one customer's contracts, filtered server-side by customer id.
pub struct CustomerContractsFetcher<'a> {
    client: &'a AdminApiClient,
    query: String,
    page_size: u32,
}

impl<'a> CustomerContractsFetcher<'a> {
    pub fn new(client: &'a AdminApiClient, customer_gid: &str, page_size: u32) -> Self {
        Self {
            client,
            query: documents::customer_contracts_filter(customer_gid),
            page_size,
        }
    }
}

#[async_trait]
impl ContractPageFetcher for CustomerContractsFetcher<'_> {
    async fn fetch_page(&self, after: Option<&str>) -> Result<Page<Contract>, AdminApiError> {
        self.client
            .subscription_contracts(self.page_size, after, Some(&self.query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

    fn client_for(server: &MockServer) -> AdminApiClient {
        AdminApiClient::new(AdminApiConfig {
            shop_domain: "test.myshopify.com".to_string(),
            api_version: "2025-01".to_string(),
            access_token: Secret::new("shpat_test".to_string()),
            base_url: Some(server.uri()),
        })
    }

    #[test]
    fn test_is_configured() {
        let config = AdminApiConfig {
            shop_domain: "test.myshopify.com".to_string(),
            api_version: "2025-01".to_string(),
            access_token: Secret::new(String::new()),
            base_url: None,
        };
        assert!(!AdminApiClient::new(config).is_configured());
    }

    #[tokio::test]
    async fn test_customers_sends_token_and_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header(ACCESS_TOKEN_HEADER, "shpat_test"))
            .and(body_partial_json(json!({ "variables": { "first": 10, "after": "abc" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "customers": {
                    "edges": [{ "node": { "id": "gid://shopify/Customer/1", "displayName": "Ada", "email": "ada@example.com" } }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).customers(10, Some("abc")).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].email.as_deref(), Some("ada@example.com"));
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "Throttled" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).customers(10, None).await.unwrap_err();

        assert!(matches!(err, AdminApiError::GraphQl(ref msgs) if msgs == &["Throttled".to_string()]));
    }

    #[tokio::test]
    async fn test_http_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .subscription_contracts(50, None, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdminApiError::Status { operation: "subscription_contracts", status: 401, .. }
        ));
        assert_eq!(
            err.public_message(),
            "Admin API subscription_contracts returned status 401"
        );
    }

    #[tokio::test]
    async fn test_missing_customer_name_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "customer": null } })),
            )
            .mount(&server)
            .await;

        let name = client_for(&server)
            .customer_display_name("gid://shopify/Customer/404")
            .await
            .unwrap();

        assert!(name.is_none());
    }

    #[tokio::test]
    async fn test_fetcher_scopes_query_to_customer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": {
                "first": 50,
                "query": "customer_id:\"gid://shopify/Customer/9\""
            } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "subscriptionContracts": {
                    "edges": [],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let fetcher = CustomerContractsFetcher::new(&client, "gid://shopify/Customer/9", 50);
        let page = fetcher.fetch_page(None).await.unwrap();

        assert!(page.items.is_empty());
    }
}
