use axum::{
    extract::{Extension, Path},
    Json,
};
use chrono::Utc;

use storefront_auth::{lookup_admin_status, Role, UserPatch, UserRecord};
use storefront_core::UpdateResult;

use crate::app::dto::{AdminStatus, UpsertUserResponse};
use crate::app::errors::ApiResult;
use crate::context::AppContext;

/// Create or update the record for `email` and issue a session token for it.
pub async fn upsert_user(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
    Json(body): Json<UserPatch>,
) -> ApiResult<Json<UpsertUserResponse>> {
    let result = ctx.users.upsert_user(&email, &body).await?;
    let token = ctx.keys.sign(&email, Utc::now())?;

    tracing::info!(%email, upserted = result.upserted_count, "user upserted");
    Ok(Json(UpsertUserResponse { result, token }))
}

pub async fn list_users(Extension(ctx): Extension<AppContext>) -> ApiResult<Json<Vec<UserRecord>>> {
    Ok(Json(ctx.users.list_users().await?))
}

pub async fn get_user(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<Option<UserRecord>>> {
    Ok(Json(ctx.users.find_user(&email).await?))
}

/// Admin status of whichever email is in the path; no credential involved.
pub async fn admin_status(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<AdminStatus>> {
    let admin = lookup_admin_status(&email, &ctx.directory).await?;
    Ok(Json(AdminStatus { admin }))
}

pub async fn make_admin(
    Extension(ctx): Extension<AppContext>,
    Path(email): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let result = ctx.users.set_role(&email, Role::Admin).await?;
    tracing::info!(%email, matched = result.matched_count, "promoted to admin");
    Ok(Json(result))
}
