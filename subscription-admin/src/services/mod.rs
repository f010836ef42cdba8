pub mod admin_api;
pub mod aggregator;
pub mod customers;
pub mod metrics;

pub use admin_api::{AdminApiClient, AdminApiError, CustomerContractsFetcher};
pub use aggregator::{
    aggregate, sort_by_event_time, AggregationError, AggregationResult, ContractPageFetcher,
    StatusView,
};
pub use customers::CustomerService;
pub use metrics::{get_metrics, init_metrics};
