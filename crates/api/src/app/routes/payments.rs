use axum::{extract::Extension, Json};

use storefront_purchasing::{to_minor_units, PaymentIntentRequest, PAYMENT_CURRENCY};

use crate::app::dto::ClientSecretResponse;
use crate::app::errors::ApiResult;
use crate::context::AppContext;

/// Open a card payment intent for `price` and return its client secret.
pub async fn create_payment_intent(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<PaymentIntentRequest>,
) -> ApiResult<Json<ClientSecretResponse>> {
    let amount = to_minor_units(body.price)?;
    let intent = ctx.gateway.create_payment_intent(amount, PAYMENT_CURRENCY).await?;

    Ok(Json(ClientSecretResponse {
        client_secret: intent.client_secret,
    }))
}
