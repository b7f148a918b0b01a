use axum::{
    extract::{Extension, Path},
    Json,
};

use storefront_core::{DeleteResult, InsertResult, ProductId};
use storefront_products::{NewProduct, Product};

use crate::app::dto::CountResponse;
use crate::app::errors::ApiResult;
use crate::context::AppContext;

pub async fn create_product(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<NewProduct>,
) -> ApiResult<Json<InsertResult>> {
    let product = Product::from_new(ProductId::new(), body);
    Ok(Json(ctx.products.insert_product(product).await?))
}

pub async fn list_products(Extension(ctx): Extension<AppContext>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(ctx.products.list_products().await?))
}

/// `null` when no product has this id.
pub async fn get_product(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Product>>> {
    let id: ProductId = id.parse()?;
    Ok(Json(ctx.products.find_product(id).await?))
}

pub async fn count_products(Extension(ctx): Extension<AppContext>) -> ApiResult<Json<CountResponse>> {
    let count = ctx.products.count_products().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn delete_product(
    Extension(ctx): Extension<AppContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id: ProductId = id.parse()?;
    let result = ctx.products.delete_product(id).await?;
    tracing::info!(product_id = %id, deleted = result.deleted_count, "product deleted");
    Ok(Json(result))
}
