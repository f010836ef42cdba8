use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionAdminConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub admin_api: AdminApiConfig,
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminApiConfig {
    /// Shop domain, e.g. `my-shop.myshopify.com`.
    pub shop_domain: String,
    pub api_version: String,
    pub access_token: Secret<String>,
    /// Overrides the URL derived from `shop_domain`. Used by tests and proxies.
    pub base_url: Option<String>,
}

impl AdminApiConfig {
    /// GraphQL endpoint for this shop.
    pub fn graphql_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!(
                "{}/admin/api/{}/graphql.json",
                base.trim_end_matches('/'),
                self.api_version
            ),
            None => format!(
                "https://{}/admin/api/{}/graphql.json",
                self.shop_domain, self.api_version
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AggregationConfig {
    /// Contracts requested per subscription page.
    #[validate(range(min = 1, max = 250))]
    pub contracts_page_size: u32,
    /// Customers requested per listing page.
    #[validate(range(min = 1, max = 250))]
    pub customers_page_size: u32,
    /// Maximum subscription pages fetched per customer.
    #[validate(range(min = 1))]
    pub page_ceiling: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            contracts_page_size: 50,
            customers_page_size: 10,
            page_ceiling: 5,
        }
    }
}

impl SubscriptionAdminConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";
        let defaults = AggregationConfig::default();

        let aggregation = AggregationConfig {
            contracts_page_size: parse_env("CONTRACTS_PAGE_SIZE", defaults.contracts_page_size)?,
            customers_page_size: parse_env("CUSTOMERS_PAGE_SIZE", defaults.customers_page_size)?,
            page_ceiling: parse_env("SUBSCRIPTION_PAGE_CEILING", defaults.page_ceiling)?,
        };
        validate_aggregation(&aggregation)?;

        Ok(SubscriptionAdminConfig {
            common: common_config,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "subscription-admin".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok(),
            admin_api: AdminApiConfig {
                shop_domain: get_env("SHOP_DOMAIN", Some("localhost:3457"), is_prod)?,
                api_version: env::var("ADMIN_API_VERSION")
                    .unwrap_or_else(|_| "2025-01".to_string()),
                access_token: Secret::new(get_env("ADMIN_API_ACCESS_TOKEN", Some(""), is_prod)?),
                base_url: env::var("ADMIN_API_BASE_URL").ok(),
            },
            aggregation,
        })
    }
}

fn validate_aggregation(aggregation: &AggregationConfig) -> Result<(), AppError> {
    aggregation
        .validate()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid aggregation settings: {}", e)))
}

fn parse_env(key: &str, default: u32) -> Result<u32, AppError> {
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!("{} must be a positive integer, got {:?}", key, val))
        }),
        Err(_) => Ok(default),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
