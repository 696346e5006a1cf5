//! Dealership API endpoints.

use axum::extract::{Path, State};

use super::{error, parse_id, success, ApiResult};
use crate::errors::AppError;
use crate::models::Dealership;
use crate::AppState;

/// GET /fetchDealers - List all dealerships.
pub async fn fetch_dealers(State(state): State<AppState>) -> ApiResult<Vec<Dealership>> {
    match state.repo.list_dealerships().await {
        Ok(dealers) => success(dealers),
        Err(e) => error(e, "Error fetching dealerships"),
    }
}

/// GET /fetchDealers/:state - List dealerships in a state.
pub async fn fetch_dealers_by_state(
    State(state): State<AppState>,
    Path(dealer_state): Path<String>,
) -> ApiResult<Vec<Dealership>> {
    match state.repo.list_dealerships_by_state(&dealer_state).await {
        Ok(dealers) => success(dealers),
        Err(e) => error(e, "Error fetching dealerships by state"),
    }
}

/// GET /fetchDealer/:id - Get a single dealership.
pub async fn fetch_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Dealership> {
    let dealer_id = match parse_id(&id, "dealer") {
        Ok(dealer_id) => dealer_id,
        Err(e) => return error(e, "Error fetching dealer by id"),
    };

    match state.repo.get_dealership(dealer_id).await {
        Ok(Some(dealer)) => success(dealer),
        Ok(None) => error(
            AppError::NotFound("Dealer not found".to_string()),
            "Error fetching dealer by id",
        ),
        Err(e) => error(e, "Error fetching dealer by id"),
    }
}
