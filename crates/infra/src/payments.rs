//! Payment-provider client (Stripe REST API).
//!
//! Only one call is needed: create a payment intent for an amount in minor
//! units and hand its client secret back to the browser.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Provider-side representation of an in-progress charge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("payment provider is not configured")]
    NotConfigured,

    #[error("payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payment provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Outbound payment-intent creation, a trait so tests can substitute a fake.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, PaymentGatewayError>;
}

/// Stripe client authenticated with the account's secret key.
pub struct StripeGateway {
    base_url: String,
    secret_key: String,
    client: reqwest::Client,
}

impl StripeGateway {
    pub fn new(base_url: &str, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl core::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, PaymentGatewayError> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        let form = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let intent = response.json::<PaymentIntent>().await?;
            tracing::info!(intent_id = %intent.id, amount, "payment intent created");
            return Ok(intent);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PaymentGatewayError::Provider {
            status: status.as_u16(),
            body,
        })
    }
}

/// Stand-in used when no provider key is configured; every call fails.
#[derive(Debug, Default)]
pub struct UnconfiguredGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredGateway {
    async fn create_payment_intent(&self, _amount: i64, _currency: &str) -> Result<PaymentIntent, PaymentGatewayError> {
        Err(PaymentGatewayError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_gateway_always_fails() {
        let err = UnconfiguredGateway.create_payment_intent(100, "usd").await.unwrap_err();
        assert!(matches!(err, PaymentGatewayError::NotConfigured));
    }

    #[test]
    fn debug_hides_secret_key() {
        let gateway = StripeGateway::new("https://api.stripe.com/", "sk_test_secret");
        let debug = format!("{gateway:?}");
        assert!(!debug.contains("sk_test"));
        assert!(debug.contains("https://api.stripe.com\""));
    }
}
