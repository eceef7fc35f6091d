use crate::shared::{Money, Page as Paging};

/// Orders placed by customers.
pub trait Orders {
  /// Lists orders page by page.
  fn list(&self, request: ListOrdersRequest) -> ListOrdersResponse;
  fn place(&self, request: PlaceOrderRequest) -> PlaceOrderResponse;
}

/// Operations for support staff only.
pub trait Internal {
  fn audit(&self, request: AuditRequest) -> AuditResponse;
  fn refund(&self, request: PlaceOrderRequest) -> RefundResponse;
}

pub struct ListOrdersRequest {
  pub page: Paging,
}

pub struct ListOrdersResponse {
  pub orders: Vec<Order>,
  pub next: Option<Paging>,
}

pub struct Order {
  pub id: String,
  pub total: Money,
  pub lines: Vec<crate::shared::LineItem>,
}

pub struct PlaceOrderRequest {
  pub lines: Vec<crate::shared::LineItem>,
}

pub struct PlaceOrderResponse {
  pub order: Order,
}

pub struct AuditRequest {
  pub actor: String,
}

pub struct AuditResponse {
  pub entries: Vec<AuditEntry>,
}

pub struct AuditEntry {
  pub message: String,
}

pub struct RefundResponse {
  pub amount: Money,
}
