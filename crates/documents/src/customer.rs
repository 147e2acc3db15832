use serde::{Deserialize, Serialize};

use pressdesk_core::{CustomerId, ValueObject};

/// Snapshot of a customer-directory record, embedded at document-assembly
/// time. The directory itself is an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl CustomerRef {
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl ValueObject for CustomerRef {}
