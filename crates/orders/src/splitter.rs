//! Invoice-to-order conversion and department splitting.

use chrono::{DateTime, Utc};

use pressdesk_core::DepartmentId;
use pressdesk_documents::Invoice;
use pressdesk_pricing::LineItem;

use crate::production_order::{
    DeliveryMethod, OrderHistoryEntry, OrderItem, OrderItemStatus, OrderPriority, OrderStatus,
    ProductionOrder,
};

/// History action for a single-department creation.
pub const ACTION_CREATED: &str = "order-created";
/// History action for a department-split creation.
pub const ACTION_CREATED_SPLIT: &str = "order-created-split";

/// Convert an invoice into production-order drafts, one per department.
///
/// Lines without a department tag fall to `default_department`. With a
/// single resulting group the invoice becomes one order numbered
/// `ORD-{invoice suffix}`; with two or more, one order per department in
/// first-seen order, numbered `-A`, `-B`, and so on, sharing a generated
/// group id. An empty invoice yields a single zero-total order rather than
/// an error.
///
/// No ordering constraint is imposed on the caller: a draft invoice splits
/// as readily as a paid one.
pub fn convert_invoice_to_orders(
    invoice: &Invoice,
    default_department: &DepartmentId,
    now: DateTime<Utc>,
) -> Vec<ProductionOrder> {
    let items: Vec<OrderItem> = invoice
        .line_items()
        .iter()
        .map(|line| order_item_from_line(line, default_department))
        .collect();

    // Partition by department, preserving first-seen key order.
    let mut groups: Vec<(DepartmentId, Vec<OrderItem>)> = Vec::new();
    for item in items {
        match groups.iter().position(|(dept, _)| *dept == item.department_id) {
            Some(index) => groups[index].1.push(item),
            None => groups.push((item.department_id.clone(), vec![item])),
        }
    }

    let base_number = base_order_number(invoice.invoice_number());

    if groups.len() <= 1 {
        let items = groups.pop().map(|(_, members)| members).unwrap_or_default();
        let order = assemble_order(
            invoice,
            base_number,
            default_department.clone(),
            items,
            None,
            now,
        );
        return vec![order];
    }

    let group_id = format!("GRP-{}", now.timestamp_millis());
    groups
        .into_iter()
        .enumerate()
        .map(|(position, (department, members))| {
            let order_number = format!("{}-{}", base_number, split_suffix(position));
            assemble_order(
                invoice,
                order_number,
                department,
                members,
                Some(group_id.clone()),
                now,
            )
        })
        .collect()
}

fn order_item_from_line(line: &LineItem, default_department: &DepartmentId) -> OrderItem {
    OrderItem {
        id: line.id,
        name: line.description.clone(),
        quantity: line.quantity,
        status: OrderItemStatus::Pending,
        department_id: line
            .department_id
            .clone()
            .unwrap_or_else(|| default_department.clone()),
        total_price: line.total,
        unit_price: line.unit_price,
        product_id: line.product_id,
    }
}

fn assemble_order(
    invoice: &Invoice,
    order_number: String,
    department_id: DepartmentId,
    items: Vec<OrderItem>,
    group_id: Option<String>,
    now: DateTime<Utc>,
) -> ProductionOrder {
    let provenance = match &group_id {
        Some(group) => OrderHistoryEntry::system(
            ACTION_CREATED_SPLIT,
            format!(
                "Created from invoice {} (split group {group})",
                invoice.invoice_number()
            ),
            now,
        ),
        None => OrderHistoryEntry::system(
            ACTION_CREATED,
            format!("Created from invoice {}", invoice.invoice_number()),
            now,
        ),
    };

    let total_amount = items.iter().map(|item| item.total_price).sum();
    let customer = invoice.customer();

    ProductionOrder {
        order_number,
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        customer_email: customer.email.clone(),
        department_id,
        status: OrderStatus::NewOrder,
        priority: OrderPriority::Normal,
        delivery_method: DeliveryMethod::Pickup,
        due_date: invoice.due_date(),
        items,
        total_amount,
        paid_amount: 0.0,
        group_id,
        history: vec![provenance],
        created_at: now,
        updated_at: now,
    }
}

/// `INV-2024-0001` → `ORD-2024-0001`. A number without the invoice prefix
/// is used as-is after the `ORD-` marker.
fn base_order_number(invoice_number: &str) -> String {
    let suffix = invoice_number
        .strip_prefix("INV-")
        .unwrap_or(invoice_number);
    format!("ORD-{suffix}")
}

/// Alphabetic split suffix by first-seen position: `A`…`Z`, then `AA`, `AB`…
fn split_suffix(position: usize) -> String {
    let mut n = position;
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
