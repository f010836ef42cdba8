//! Query documents.

pub const SUBSCRIPTION_CONTRACTS: &str = r#"
query SubscriptionContracts($first: Int, $after: String, $query: String) {
  subscriptionContracts(first: $first, after: $after, query: $query) {
    edges {
      node {
        id
        currencyCode
        customer {
          id
          displayName
        }
        status
        nextBillingDate
        originOrder {
          createdAt
        }
        deliveryPolicy {
          interval
          intervalCount
        }
        linesCount {
          count
        }
        lines(first: 50) {
          edges {
            node {
              id
              productId
              title
              variantTitle
              quantity
              currentPrice {
                amount
                currencyCode
              }
              variantImage {
                url
              }
              lineDiscountedPrice {
                amount
                currencyCode
              }
              pricingPolicy {
                basePrice {
                  amount
                  currencyCode
                }
                cycleDiscounts {
                  adjustmentType
                  adjustmentValue {
                    ... on MoneyV2 {
                      amount
                      currencyCode
                    }
                    ... on SellingPlanPricingPolicyPercentageValue {
                      percentage
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

pub const CUSTOMERS: &str = r#"
query Customers($first: Int!, $after: String) {
  customers(first: $first, after: $after) {
    edges {
      node {
        id
        displayName
        email
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

pub const CUSTOMER_NAME: &str = r#"
query CustomerName($id: ID!) {
  customer(id: $id) {
    displayName
  }
}
"#;

/// Server-side filter selecting one customer's contracts.
pub fn customer_contracts_filter(customer_gid: &str) -> String {
    format!("customer_id:\"{}\"", customer_gid)
}
