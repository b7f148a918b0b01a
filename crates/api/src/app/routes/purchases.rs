use axum::{
    extract::{Extension, Path},
    Json,
};
use chrono::Utc;

use storefront_core::{DeleteResult, InsertResult, PurchaseId, UpdateResult};
use storefront_purchasing::{NewPurchase, Payment, Purchase, RecordPayment};

use crate::app::errors::ApiResult;
use crate::context::AppContext;

pub async fn create_purchase(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<NewPurchase>,
) -> ApiResult<Json<InsertResult>> {
    let purchase = Purchase::from_new(PurchaseId::new(), body);
    Ok(Json(ctx.purchases.insert_purchase(purchase).await?))
}

pub async fn list_purchases(Extension(ctx): Extension<AppContext>) -> ApiResult<Json<Vec<Purchase>>> {
    Ok(Json(ctx.purchases.list_purchases().await?))
}

pub async fn purchases_for_email(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Purchase>>> {
    Ok(Json(ctx.purchases.purchases_by_email(&email).await?))
}

/// Record a payment, then mark the purchase paid.
///
/// The two writes are not atomic: if the purchase update fails the payment
/// record stays and the caller gets a 500.
pub async fn record_payment(
    Extension(ctx): Extension<AppContext>,
    Path((email, id)): Path<(String, String)>,
    Json(body): Json<RecordPayment>,
) -> ApiResult<Json<UpdateResult>> {
    let purchase_id: PurchaseId = id.parse()?;
    let transaction_id = body.transaction_id.clone();

    let payment = Payment::record(purchase_id, email.as_str(), body, Utc::now());
    ctx.payments.insert_payment(payment).await?;

    let result = ctx
        .purchases
        .mark_paid(purchase_id, &email, &transaction_id)
        .await
        .inspect_err(|e| {
            tracing::warn!(%purchase_id, error = %e, "payment recorded but purchase not updated");
        })?;

    tracing::info!(%purchase_id, %transaction_id, matched = result.matched_count, "payment recorded");
    Ok(Json(result))
}

pub async fn mark_shipped(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let purchase_id: PurchaseId = id.parse()?;
    Ok(Json(ctx.purchases.mark_shipped(purchase_id).await?))
}

/// Delete the oldest purchase placed by `email`.
pub async fn delete_purchase(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    Ok(Json(ctx.purchases.delete_purchase_by_email(&email).await?))
}
