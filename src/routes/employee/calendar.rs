use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    domain::{open_dates, registered_dates, Role, ShiftAPIError, ShiftDate},
    routes::{employee::session_employee_id, restaurant_view},
    utils::auth::require_role,
    AppState,
};

#[tracing::instrument(name = "Employee calendar route handler", skip_all)]
pub async fn get_employee_calendar(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<EmployeeCalendarResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Employee).await?;
    let employee_id = session_employee_id(&state, &session).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;
    let shifts = view.snapshot().read().await.shifts();

    let response = EmployeeCalendarResponse {
        open_dates: open_dates(&shifts),
        registered_dates: employee_id
            .map(|id| registered_dates(&shifts, &id))
            .unwrap_or_default(),
    };
    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Serialize)]
pub struct EmployeeCalendarResponse {
    #[serde(rename = "openDates")]
    pub open_dates: Vec<ShiftDate>,
    #[serde(rename = "registeredDates")]
    pub registered_dates: Vec<ShiftDate>,
}
