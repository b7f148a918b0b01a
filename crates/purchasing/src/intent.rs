//! Amount coercion for provider payment intents.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Currency requested from the payment provider.
pub const PAYMENT_CURRENCY: &str = "usd";

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Price in major currency units.
    pub price: f64,
}

/// Convert a major-unit price into provider minor units (`price * 100`, rounded).
pub fn to_minor_units(price: f64) -> DomainResult<i64> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation(format!("price must be a non-negative number, got {price}")));
    }

    let minor = (price * 100.0).round();
    if minor > i64::MAX as f64 {
        return Err(DomainError::validation("price is too large"));
    }
    Ok(minor as i64)
}
