use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, PaymentId, PurchaseId};

/// Body of `PATCH /purchase/:email/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayment {
    pub transaction_id: String,
}

/// Stored payment record, written before the purchase is marked paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: PaymentId,
    pub purchase_id: PurchaseId,
    pub email: String,
    pub transaction_id: String,
    pub recorded_at: DateTime<Utc>,
}

impl Payment {
    pub fn record(
        purchase_id: PurchaseId,
        email: impl Into<String>,
        body: RecordPayment,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            purchase_id,
            email: email.into(),
            transaction_id: body.transaction_id,
            recorded_at,
        }
    }
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        self.id
    }
}
