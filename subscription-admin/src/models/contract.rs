//! Subscription contract model.
//!
//! Contracts are owned by the platform's subscription service and are only
//! ever read here; every value lives for the duration of one request.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Contract status as reported by the Admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractStatus {
    Active,
    Paused,
    Cancelled,
    Failed,
    Expired,
    Stale,
    /// A status this build does not know about yet.
    Other(String),
}

impl ContractStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ContractStatus::Active => "ACTIVE",
            ContractStatus::Paused => "PAUSED",
            ContractStatus::Cancelled => "CANCELLED",
            ContractStatus::Failed => "FAILED",
            ContractStatus::Expired => "EXPIRED",
            ContractStatus::Stale => "STALE",
            ContractStatus::Other(s) => s,
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => ContractStatus::Active,
            "PAUSED" => ContractStatus::Paused,
            "CANCELLED" => ContractStatus::Cancelled,
            "FAILED" => ContractStatus::Failed,
            "EXPIRED" => ContractStatus::Expired,
            "STALE" => ContractStatus::Stale,
            _ => ContractStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for ContractStatus {
    fn from(s: String) -> Self {
        ContractStatus::from_string(&s)
    }
}

impl From<ContractStatus> for String {
    fn from(status: ContractStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Monetary amount. The API sends decimal strings; they are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/// Customer reference embedded in a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCustomer {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPolicy {
    /// DAY, WEEK, MONTH or YEAR.
    pub interval: String,
    pub interval_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleDiscount {
    /// PERCENTAGE, FIXED_AMOUNT or PRICE.
    pub adjustment_type: String,
    pub adjustment_value: AdjustmentValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdjustmentValue {
    Percentage { percentage: f64 },
    Money(Money),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub base_price: Option<Money>,
    #[serde(default)]
    pub cycle_discounts: Vec<CycleDiscount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractLine {
    pub id: String,
    pub product_id: Option<String>,
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub current_price: Option<Money>,
    pub line_discounted_price: Option<Money>,
    pub pricing_policy: Option<PricingPolicy>,
    pub variant_image_url: Option<String>,
}

/// Subscription contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub currency_code: String,
    pub customer: ContractCustomer,
    pub status: ContractStatus,
    pub next_billing_date: Option<String>,
    pub origin_order_created_at: Option<String>,
    pub delivery_policy: Option<DeliveryPolicy>,
    #[serde(default)]
    pub lines: Vec<ContractLine>,
    pub lines_count: Option<u32>,
}

impl Contract {
    /// Raw event timestamp: the origin order's creation time, else the next billing date.
    pub fn event_time(&self) -> Option<&str> {
        self.origin_order_created_at
            .as_deref()
            .or(self.next_billing_date.as_deref())
    }

    /// Parsed event timestamp. Malformed values are treated as absent.
    pub fn event_instant(&self) -> Option<DateTime<FixedOffset>> {
        self.event_time().and_then(parse_timestamp)
    }

    /// The line shown when a contract is summarized.
    pub fn representative_line(&self) -> Option<&ContractLine> {
        self.lines.first()
    }
}

/// Parse an ISO-8601 timestamp, tolerating a missing offset (read as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts);
    }
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}
