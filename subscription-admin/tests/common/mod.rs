//! Test helper module for subscription-admin integration tests.
//!
//! Spawns the service on a random port against a wiremock Admin API.

#![allow(dead_code)]

use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use subscription_admin::config::{AdminApiConfig, AggregationConfig, SubscriptionAdminConfig};
use subscription_admin::startup::Application;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_VERSION: &str = "2025-01";
pub const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub http_address: String,
    pub port: u16,
    pub admin_api: MockServer,
}

impl TestApp {
    /// Spawn a new test application on a random port.
    pub async fn spawn() -> Self {
        Self::spawn_with(AggregationConfig::default()).await
    }

    pub async fn spawn_with(aggregation: AggregationConfig) -> Self {
        let admin_api = MockServer::start().await;

        let config = SubscriptionAdminConfig {
            common: CoreConfig { port: 0 },
            service_name: "subscription-admin-test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            admin_api: AdminApiConfig {
                shop_domain: "test.myshopify.com".to_string(),
                api_version: API_VERSION.to_string(),
                access_token: Secret::new("shpat_test".to_string()),
                base_url: Some(admin_api.uri()),
            },
            aggregation,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        Self {
            http_address: format!("http://127.0.0.1:{}", port),
            port,
            admin_api,
        }
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.http_address, path_and_query))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Serve one page of customers.
    pub async fn mock_customers(&self, customers: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) {
        let edges: Vec<Value> = customers.into_iter().map(|c| json!({ "node": c })).collect();
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_string_contains("query Customers("))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "customers": {
                    "edges": edges,
                    "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
                } }
            })))
            .mount(&self.admin_api)
            .await;
    }

    /// Serve one page of a customer's contracts, requested with cursor `after`.
    pub async fn mock_contract_page(
        &self,
        customer_gid: &str,
        after: Option<&str>,
        contracts: Vec<Value>,
        end_cursor: Option<&str>,
    ) {
        let edges: Vec<Value> = contracts.into_iter().map(|c| json!({ "node": c })).collect();
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_string_contains("query SubscriptionContracts("))
            .and(body_partial_json(json!({ "variables": {
                "after": after,
                "query": format!("customer_id:\"{}\"", customer_gid)
            } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "subscriptionContracts": {
                    "edges": edges,
                    "pageInfo": { "hasNextPage": end_cursor.is_some(), "endCursor": end_cursor }
                } }
            })))
            .mount(&self.admin_api)
            .await;
    }

    pub async fn mock_customer_name(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_string_contains("query CustomerName("))
            .respond_with(response)
            .mount(&self.admin_api)
            .await;
    }
}

pub fn customer_gid(id: u64) -> String {
    format!("gid://shopify/Customer/{}", id)
}

pub fn customer_node(id: u64, name: &str) -> Value {
    json!({
        "id": customer_gid(id),
        "displayName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
    })
}

/// A contract node in Admin API shape.
pub fn contract_node(
    id: u64,
    customer_id: u64,
    status: &str,
    origin_order_created_at: Option<&str>,
    next_billing_date: Option<&str>,
) -> Value {
    json!({
        "id": format!("gid://shopify/SubscriptionContract/{}", id),
        "currencyCode": "USD",
        "customer": { "id": customer_gid(customer_id), "displayName": "Ada Lovelace" },
        "status": status,
        "nextBillingDate": next_billing_date,
        "originOrder": origin_order_created_at.map(|c| json!({ "createdAt": c })),
        "deliveryPolicy": { "interval": "MONTH", "intervalCount": 1 },
        "linesCount": { "count": 1 },
        "lines": { "edges": [{ "node": {
            "id": format!("gid://shopify/SubscriptionLine/{}", id),
            "productId": "gid://shopify/Product/500",
            "title": "Coffee Beans",
            "variantTitle": "1kg",
            "quantity": 1,
            "currentPrice": { "amount": "20.00", "currencyCode": "USD" },
            "variantImage": null,
            "lineDiscountedPrice": { "amount": "20.00", "currencyCode": "USD" },
            "pricingPolicy": null
        } }] }
    })
}
