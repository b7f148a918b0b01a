use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storefront_core::{Entity, PurchaseId};

/// Body of `POST /purchase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: u32,
    /// Total price in major currency units.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stored purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(rename = "_id")]
    pub id: PurchaseId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub shipped: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Purchase {
    /// New orders start unpaid and unshipped, whatever the body says.
    pub fn from_new(id: PurchaseId, mut new: NewPurchase) -> Self {
        for reserved in ["_id", "paid", "transactionId", "shipped"] {
            new.extra.remove(reserved);
        }
        Self {
            id,
            email: new.email,
            customer_name: new.customer_name,
            product_id: new.product_id,
            product_name: new.product_name,
            quantity: new.quantity,
            price: new.price,
            address: new.address,
            phone: new.phone,
            paid: false,
            transaction_id: None,
            shipped: false,
            extra: new.extra,
        }
    }

    /// Set `paid` and the provider transaction id. Returns whether anything changed.
    pub fn mark_paid(&mut self, transaction_id: &str) -> bool {
        if self.paid && self.transaction_id.as_deref() == Some(transaction_id) {
            return false;
        }
        self.paid = true;
        self.transaction_id = Some(transaction_id.to_string());
        true
    }

    /// Returns whether anything changed.
    pub fn mark_shipped(&mut self) -> bool {
        let changed = !self.shipped;
        self.shipped = true;
        changed
    }
}

impl Entity for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> PurchaseId {
        self.id
    }
}
