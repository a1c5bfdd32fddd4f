use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    domain::{
        reconcile, EmployeeId, RequestQueue, Role, ShiftAPIError, ShiftId,
    },
    routes::restaurant_view,
    services::{self, RestaurantView},
    utils::auth::require_role,
    AppState,
};

async fn current_queue(view: &RestaurantView) -> RequestQueue {
    let snapshot = view.snapshot().read().await;
    reconcile(&snapshot.shifts(), snapshot.employees())
}

#[tracing::instrument(name = "Request queue route handler", skip_all)]
pub async fn get_request_queue(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<RequestQueue>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    Ok((StatusCode::OK, Json(current_queue(&view).await)))
}

#[derive(Debug, Deserialize)]
pub struct RequestDecision {
    #[serde(rename = "shiftId")]
    pub shift_id: ShiftId,
    #[serde(rename = "employeeId")]
    pub employee_id: EmployeeId,
}

#[tracing::instrument(name = "Accept request route handler", skip_all)]
pub async fn accept_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(decision): Json<RequestDecision>,
) -> Result<(StatusCode, Json<RequestQueue>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    services::accept_request(
        &session.restaurant_id,
        &decision.shift_id,
        &decision.employee_id,
        &state.shift_store,
        view.snapshot(),
    )
    .await?;

    Ok((StatusCode::OK, Json(current_queue(&view).await)))
}

#[tracing::instrument(name = "Reject request route handler", skip_all)]
pub async fn reject_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(decision): Json<RequestDecision>,
) -> Result<(StatusCode, Json<RequestQueue>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    services::reject_request(
        &session.restaurant_id,
        &decision.shift_id,
        &decision.employee_id,
        &state.shift_store,
        view.snapshot(),
    )
    .await?;

    Ok((StatusCode::OK, Json(current_queue(&view).await)))
}
