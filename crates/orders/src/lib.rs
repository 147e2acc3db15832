//! Production-order domain module.
//!
//! Converts a priced invoice into fulfillment work orders, one per
//! production department when line items span several. Emitted drafts are
//! handed off to the external order-management system, which owns their
//! subsequent lifecycle.

pub mod production_order;
pub mod splitter;

pub use production_order::{
    DeliveryMethod, OrderHistoryEntry, OrderItem, OrderItemStatus, OrderPriority, OrderStatus,
    ProductionOrder,
};
pub use splitter::convert_invoice_to_orders;
