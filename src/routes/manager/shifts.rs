use std::str::FromStr;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{Role, Shift, ShiftAPIError, ShiftDate, ShiftType},
    routes::restaurant_view,
    utils::auth::require_role,
    AppState,
};

#[tracing::instrument(name = "Add shift route handler", skip_all)]
pub async fn add_shift(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddShiftRequest>,
) -> Result<(StatusCode, Json<Shift>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let date = ShiftDate::parse(&request.date)?;
    let shift_type = ShiftType::from_str(&request.shift_type)?;
    let shift = Shift::new(date, shift_type, request.needed_employees);

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    state
        .shift_store
        .write()
        .await
        .add_shift(&session.restaurant_id, &shift)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error adding shift");
            ShiftAPIError::UnexpectedError(eyre!(e))
        })?;

    view.snapshot().write().await.apply_local(shift.clone());

    Ok((StatusCode::CREATED, Json(shift)))
}

#[derive(Debug, Deserialize)]
pub struct AddShiftRequest {
    pub date: String,
    #[serde(rename = "shiftType")]
    pub shift_type: String,
    #[serde(rename = "neededEmployees")]
    pub needed_employees: u32,
}
