//! Review API endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
};

use super::{error, parse_id, success, ApiResult};
use crate::errors::AppError;
use crate::models::{NewReview, Review};
use crate::AppState;

/// GET /fetchReviews - List all reviews.
pub async fn fetch_reviews(State(state): State<AppState>) -> ApiResult<Vec<Review>> {
    match state.repo.list_reviews().await {
        Ok(reviews) => success(reviews),
        Err(e) => error(e, "Error fetching documents"),
    }
}

/// GET /fetchReviews/dealer/:id - List the reviews of one dealership.
pub async fn fetch_reviews_by_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Review>> {
    let dealer_id = match parse_id(&id, "dealer") {
        Ok(dealer_id) => dealer_id,
        Err(e) => return error(e, "Error fetching documents"),
    };

    match state.repo.list_reviews_by_dealer(dealer_id).await {
        Ok(reviews) => success(reviews),
        Err(e) => error(e, "Error fetching documents"),
    }
}

/// POST /insert_review - Insert a review.
///
/// The body is parsed as JSON whatever its content type.
pub async fn insert_review(State(state): State<AppState>, body: Bytes) -> ApiResult<Review> {
    let request: NewReview = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return error(
                AppError::InvalidPayload(format!("Invalid review payload: {}", e)),
                "Error inserting review",
            )
        }
    };

    match state.repo.insert_review(request).await {
        Ok(review) => {
            tracing::info!(id = review.id, dealership = review.dealership, "Review saved");
            success(review)
        }
        Err(e) => error(e, "Error inserting review"),
    }
}
