use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use storefront_core::{Entity, ProductId};

/// Body of `POST /product`.
///
/// Absent optional fields stay absent, and fields outside the schema are kept
/// as posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price in major currency units.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stored product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn from_new(id: ProductId, mut new: NewProduct) -> Self {
        new.extra.remove("_id");
        Self {
            id,
            name: new.name,
            description: new.description,
            image: new.image,
            price: new.price,
            minimum_order: new.minimum_order,
            available_quantity: new.available_quantity,
            extra: new.extra,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
