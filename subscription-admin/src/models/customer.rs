//! Customer listing models.

use serde::{Deserialize, Serialize};

use super::PageInfo;
use crate::dtos::ContractSummary;

/// Customer node as returned by the customers query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNode {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// One row of the customer listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub numeric_id: u64,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub subscription_count: u64,
    /// Latest subscription event, as the ISO string received.
    pub last_order_date: Option<String>,
}

/// A page of customers with their subscription counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListing {
    pub customers: Vec<CustomerSummary>,
    pub page_info: PageInfo,
}

/// Subscription contracts of a single customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSubscriptions {
    pub customer_id: String,
    pub customer_name: String,
    pub total_count: u64,
    pub contracts: Vec<ContractSummary>,
}

/// Customer filter by subscription count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionsView {
    #[default]
    All,
    With,
    Without,
}

impl SubscriptionsView {
    /// Unknown names fall back to `All`.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "with" => SubscriptionsView::With,
            "without" => SubscriptionsView::Without,
            _ => SubscriptionsView::All,
        }
    }

    pub fn matches(&self, subscription_count: u64) -> bool {
        match self {
            SubscriptionsView::All => true,
            SubscriptionsView::With => subscription_count > 0,
            SubscriptionsView::Without => subscription_count == 0,
        }
    }
}

/// Ordering of the customer listing by subscription count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionSort {
    Ascending,
    #[default]
    Descending,
}

impl SubscriptionSort {
    /// Parses `subs asc` / `subs desc`; anything without `asc` sorts descending.
    pub fn from_string(s: &str) -> Self {
        if s.to_ascii_lowercase().contains("asc") {
            SubscriptionSort::Ascending
        } else {
            SubscriptionSort::Descending
        }
    }

    pub fn apply(&self, customers: &mut [CustomerSummary]) {
        match self {
            SubscriptionSort::Ascending => {
                customers.sort_by_key(|c| c.subscription_count);
            }
            SubscriptionSort::Descending => {
                customers.sort_by(|a, b| b.subscription_count.cmp(&a.subscription_count));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, count: u64) -> CustomerSummary {
        CustomerSummary {
            id: format!("gid://shopify/Customer/{}", id),
            numeric_id: id,
            display_name: None,
            email: None,
            subscription_count: count,
            last_order_date: None,
        }
    }

    #[test]
    fn test_subscriptions_view() {
        assert_eq!(SubscriptionsView::from_string("WITH"), SubscriptionsView::With);
        assert_eq!(SubscriptionsView::from_string("bogus"), SubscriptionsView::All);
        assert!(SubscriptionsView::With.matches(1));
        assert!(!SubscriptionsView::With.matches(0));
        assert!(SubscriptionsView::Without.matches(0));
        assert!(SubscriptionsView::All.matches(0));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows = vec![summary(1, 2), summary(2, 5), summary(3, 2), summary(4, 0)];
        SubscriptionSort::from_string("subs desc").apply(&mut rows);
        let ids: Vec<u64> = rows.iter().map(|c| c.numeric_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);

        SubscriptionSort::from_string("subs asc").apply(&mut rows);
        let ids: Vec<u64> = rows.iter().map(|c| c.numeric_id).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);
    }
}
