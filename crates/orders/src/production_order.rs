use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressdesk_core::{CustomerId, DepartmentId, LineItemId, ProductId};

/// Production-order status lifecycle. Later transitions belong to the
/// order-management collaborator; the splitter only ever emits `NewOrder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    NewOrder,
    InProduction,
    Ready,
    Completed,
    Cancelled,
}

/// Scheduling priority for the production floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    Low,
    Normal,
    High,
    Rush,
}

/// How the finished job reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
    Shipping,
}

/// Status of a single item within a production order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderItemStatus {
    Pending,
    InProgress,
    Done,
}

/// One work item, derived 1:1 from an invoice line. The id carries over
/// from the source line, preserving provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: LineItemId,
    pub name: String,
    pub quantity: f64,
    pub status: OrderItemStatus,
    pub department_id: DepartmentId,
    pub total_price: f64,
    pub unit_price: f64,
    pub product_id: Option<ProductId>,
}

/// Audit-trail entry. The splitter writes the first, provenance entry;
/// the order-management system appends the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    pub action: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

impl OrderHistoryEntry {
    /// System-authored entry (no human actor).
    pub fn system(action: impl Into<String>, notes: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            action: action.into(),
            user_id: "system".to_string(),
            user_name: "system".to_string(),
            user_role: "system".to_string(),
            notes: notes.into(),
            timestamp,
        }
    }
}

/// Fulfillment work order draft.
///
/// Created exclusively by the splitter, then handed off; this crate never
/// mutates an emitted order. `group_id` is present only when the source
/// invoice split across more than one department; all siblings share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub order_number: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub department_id: DepartmentId,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub delivery_method: DeliveryMethod,
    pub due_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub group_id: Option<String>,
    pub history: Vec<OrderHistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_as_kebab_case_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::NewOrder).unwrap(),
            "\"new-order\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProduction).unwrap(),
            "\"in-production\""
        );
        assert_eq!(
            serde_json::to_string(&OrderItemStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&DeliveryMethod::Pickup).unwrap(),
            "\"pickup\""
        );
    }

    #[test]
    fn system_history_entry_has_system_actor_fields() {
        let entry = OrderHistoryEntry::system("order-created", "from INV-2026-0001", Utc::now());
        assert_eq!(entry.user_id, "system");
        assert_eq!(entry.user_name, "system");
        assert_eq!(entry.user_role, "system");
        assert_eq!(entry.action, "order-created");
    }
}
