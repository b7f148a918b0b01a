use axum::{extract::Extension, Json};

use storefront_core::{InsertResult, ReviewId};
use storefront_products::{NewReview, Review};

use crate::app::errors::ApiResult;
use crate::context::AppContext;

pub async fn create_review(
    Extension(ctx): Extension<AppContext>,
    Json(body): Json<NewReview>,
) -> ApiResult<Json<InsertResult>> {
    let review = Review::from_new(ReviewId::new(), body);
    Ok(Json(ctx.reviews.insert_review(review).await?))
}

pub async fn list_reviews(Extension(ctx): Extension<AppContext>) -> ApiResult<Json<Vec<Review>>> {
    Ok(Json(ctx.reviews.list_reviews().await?))
}
