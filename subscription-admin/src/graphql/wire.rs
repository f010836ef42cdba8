//! Response shapes of the Admin API, flattened into domain models.

use serde::Deserialize;

use crate::models::{
    Contract, ContractCustomer, ContractLine, ContractStatus, CustomerNode, DeliveryPolicy, Money,
    Page, PageInfo, PricingPolicy,
};

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

impl<T, U> From<Connection<T>> for Page<U>
where
    U: From<T>,
{
    fn from(conn: Connection<T>) -> Self {
        let page_info = conn.page_info.unwrap_or_default();
        Page {
            items: conn.edges.into_iter().map(|e| U::from(e.node)).collect(),
            page_info,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionContractsData {
    pub subscription_contracts: Connection<ContractNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersData {
    pub customers: Connection<CustomerNode>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerNameData {
    pub customer: Option<CustomerName>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerName {
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractNode {
    pub id: String,
    pub currency_code: String,
    pub customer: ContractCustomer,
    pub status: ContractStatus,
    pub next_billing_date: Option<String>,
    pub origin_order: Option<OriginOrder>,
    pub delivery_policy: Option<DeliveryPolicy>,
    pub lines_count: Option<Count>,
    pub lines: Option<Connection<LineNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginOrder {
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Count {
    pub count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineNode {
    pub id: String,
    pub product_id: Option<String>,
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub current_price: Option<Money>,
    pub variant_image: Option<Image>,
    pub line_discounted_price: Option<Money>,
    pub pricing_policy: Option<PricingPolicy>,
}

#[derive(Debug, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

impl From<LineNode> for ContractLine {
    fn from(node: LineNode) -> Self {
        ContractLine {
            id: node.id,
            product_id: node.product_id,
            title: node.title,
            variant_title: node.variant_title,
            quantity: node.quantity,
            current_price: node.current_price,
            line_discounted_price: node.line_discounted_price,
            pricing_policy: node.pricing_policy,
            variant_image_url: node.variant_image.and_then(|i| i.url),
        }
    }
}

impl From<ContractNode> for Contract {
    fn from(node: ContractNode) -> Self {
        Contract {
            id: node.id,
            currency_code: node.currency_code,
            customer: node.customer,
            status: node.status,
            next_billing_date: node.next_billing_date,
            origin_order_created_at: node.origin_order.and_then(|o| o.created_at),
            delivery_policy: node.delivery_policy,
            lines: node
                .lines
                .map(|l| l.into_nodes().into_iter().map(ContractLine::from).collect())
                .unwrap_or_default(),
            lines_count: node.lines_count.map(|c| c.count),
        }
    }
}
