use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Role, ShiftAPIError, ShiftId},
    routes::{employee::session_employee_id, restaurant_view},
    services::{submit_request, SubmitOutcome},
    utils::auth::require_role,
    AppState,
};

#[tracing::instrument(name = "Submit shift request route handler", skip_all)]
pub async fn request_shift(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ShiftRequestBody>,
) -> Result<(StatusCode, Json<ShiftRequestResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Employee).await?;
    let employee_id = session_employee_id(&state, &session).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    let outcome = submit_request(
        &session.restaurant_id,
        employee_id.as_ref(),
        &request.shift_id,
        &state.shift_store,
        view.snapshot(),
        &state.submit_statuses,
    )
    .await?;

    let response = ShiftRequestResponse {
        shift_id: request.shift_id,
        outcome,
    };
    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct ShiftRequestBody {
    #[serde(rename = "shiftId")]
    pub shift_id: ShiftId,
}

#[derive(Debug, Serialize)]
pub struct ShiftRequestResponse {
    #[serde(rename = "shiftId")]
    pub shift_id: ShiftId,
    pub outcome: SubmitOutcome,
}
