use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{
    domain::{scheduled_dates, Role, ShiftAPIError, ShiftDate},
    routes::restaurant_view,
    utils::auth::require_role,
    AppState,
};

#[tracing::instrument(name = "Manager calendar route handler", skip_all)]
pub async fn get_manager_calendar(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<ManagerCalendarResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;
    let shifts = view.snapshot().read().await.shifts();

    let response = ManagerCalendarResponse {
        scheduled_dates: scheduled_dates(&shifts),
    };
    Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Serialize)]
pub struct ManagerCalendarResponse {
    #[serde(rename = "scheduledDates")]
    pub scheduled_dates: Vec<ShiftDate>,
}
