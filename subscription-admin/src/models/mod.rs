//! Domain models for subscription-admin.

mod contract;
mod customer;
pub mod gid;
mod page;

pub use contract::{
    parse_timestamp, AdjustmentValue, Contract, ContractCustomer, ContractLine, ContractStatus,
    CycleDiscount, DeliveryPolicy, Money, PricingPolicy,
};
pub use customer::{
    CustomerListing, CustomerNode, CustomerSubscriptions, CustomerSummary, SubscriptionSort,
    SubscriptionsView,
};
pub use page::{Page, PageInfo};
