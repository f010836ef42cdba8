//! Response DTOs.

use serde::{Deserialize, Serialize};

use crate::models::gid::parse_gid;
use crate::models::{AdjustmentValue, Contract, CycleDiscount, Money};

/// Display-ready view of a contract, built from its first line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub id: String,
    pub numeric_id: String,
    pub status: String,
    /// Product title, or the contract's numeric id when there is no line.
    pub title: String,
    pub product_id: Option<String>,
    pub variant_title: Option<String>,
    pub variant_image_url: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Money>,
    pub line_total: Option<Money>,
    pub one_time_purchase_price: Option<Money>,
    pub discount: Option<DiscountDescription>,
    pub delivery_frequency: Option<DeliveryFrequency>,
    pub event_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountDescription {
    /// Lines carry different discounts; none is singled out.
    MultipleLines,
    Percentage { percentage: f64 },
    AmountOff { amount: Money },
    FixedPrice { amount: Money },
}

impl DiscountDescription {
    fn from_cycle_discount(discount: &CycleDiscount) -> Self {
        match (&discount.adjustment_value, discount.adjustment_type.as_str()) {
            (AdjustmentValue::Percentage { percentage }, _) => DiscountDescription::Percentage {
                percentage: *percentage,
            },
            (AdjustmentValue::Money(amount), "PRICE") => DiscountDescription::FixedPrice {
                amount: amount.clone(),
            },
            (AdjustmentValue::Money(amount), _) => DiscountDescription::AmountOff {
                amount: amount.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFrequency {
    /// `day`, `week`, `month` or `year`.
    pub interval: String,
    pub interval_count: u32,
}

impl ContractSummary {
    pub fn from_contract(contract: &Contract) -> Self {
        let numeric_id = parse_gid(&contract.id).to_string();
        let line = contract.representative_line();

        let discount = if contract.lines.len() > 1 {
            Some(DiscountDescription::MultipleLines)
        } else {
            line.and_then(|l| l.pricing_policy.as_ref())
                .and_then(|p| p.cycle_discounts.first())
                .map(DiscountDescription::from_cycle_discount)
        };

        ContractSummary {
            id: contract.id.clone(),
            status: contract.status.as_str().to_string(),
            title: line
                .map(|l| l.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| numeric_id.clone()),
            numeric_id,
            product_id: line
                .and_then(|l| l.product_id.as_deref())
                .map(|p| parse_gid(p).to_string()),
            variant_title: line.and_then(|l| l.variant_title.clone()),
            variant_image_url: line.and_then(|l| l.variant_image_url.clone()),
            quantity: line.map(|l| l.quantity).filter(|q| *q > 0),
            unit_price: line.and_then(|l| l.current_price.clone()),
            line_total: line.and_then(|l| l.line_discounted_price.clone()),
            one_time_purchase_price: line
                .and_then(|l| l.pricing_policy.as_ref())
                .and_then(|p| p.base_price.clone()),
            discount,
            delivery_frequency: contract.delivery_policy.as_ref().map(|d| DeliveryFrequency {
                interval: d.interval.to_ascii_lowercase(),
                interval_count: d.interval_count,
            }),
            event_date: contract.event_time().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContractCustomer, ContractLine, ContractStatus, DeliveryPolicy, PricingPolicy,
    };

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn line(discount: Option<CycleDiscount>) -> ContractLine {
        ContractLine {
            id: "gid://shopify/SubscriptionLine/1".to_string(),
            product_id: Some("gid://shopify/Product/8".to_string()),
            title: "Coffee".to_string(),
            variant_title: Some("1kg".to_string()),
            quantity: 2,
            current_price: Some(money("12.50")),
            line_discounted_price: Some(money("25.00")),
            pricing_policy: Some(PricingPolicy {
                base_price: Some(money("14.00")),
                cycle_discounts: discount.into_iter().collect(),
            }),
            variant_image_url: None,
        }
    }

    fn contract(lines: Vec<ContractLine>) -> Contract {
        Contract {
            id: "gid://shopify/SubscriptionContract/31".to_string(),
            currency_code: "USD".to_string(),
            customer: ContractCustomer {
                id: "gid://shopify/Customer/1".to_string(),
                display_name: None,
            },
            status: ContractStatus::Paused,
            next_billing_date: Some("2024-08-01T00:00:00Z".to_string()),
            origin_order_created_at: None,
            delivery_policy: Some(DeliveryPolicy {
                interval: "WEEK".to_string(),
                interval_count: 2,
            }),
            lines,
            lines_count: None,
        }
    }

    #[test]
    fn test_summary_uses_first_line() {
        let summary = ContractSummary::from_contract(&contract(vec![line(Some(CycleDiscount {
            adjustment_type: "PERCENTAGE".to_string(),
            adjustment_value: AdjustmentValue::Percentage { percentage: 15.0 },
        }))]));

        assert_eq!(summary.numeric_id, "31");
        assert_eq!(summary.title, "Coffee");
        assert_eq!(summary.product_id.as_deref(), Some("8"));
        assert_eq!(summary.quantity, Some(2));
        assert_eq!(summary.one_time_purchase_price, Some(money("14.00")));
        assert_eq!(
            summary.discount,
            Some(DiscountDescription::Percentage { percentage: 15.0 })
        );
        assert_eq!(
            summary.delivery_frequency,
            Some(DeliveryFrequency {
                interval: "week".to_string(),
                interval_count: 2
            })
        );
        assert_eq!(summary.event_date.as_deref(), Some("2024-08-01T00:00:00Z"));
        assert_eq!(summary.status, "PAUSED");
    }

    #[test]
    fn test_multiple_lines_discount() {
        let summary = ContractSummary::from_contract(&contract(vec![line(None), line(None)]));
        assert_eq!(summary.discount, Some(DiscountDescription::MultipleLines));
    }

    #[test]
    fn test_fixed_price_discount() {
        let summary = ContractSummary::from_contract(&contract(vec![line(Some(CycleDiscount {
            adjustment_type: "PRICE".to_string(),
            adjustment_value: AdjustmentValue::Money(money("9.99")),
        }))]));
        assert_eq!(
            summary.discount,
            Some(DiscountDescription::FixedPrice {
                amount: money("9.99")
            })
        );
    }

    #[test]
    fn test_contract_without_lines_falls_back_to_id() {
        let summary = ContractSummary::from_contract(&contract(vec![]));
        assert_eq!(summary.title, "31");
        assert!(summary.product_id.is_none());
        assert!(summary.discount.is_none());
        assert!(summary.quantity.is_none());
    }
}
