use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        shifts_on, Role, Shift, ShiftAPIError, ShiftDate, SubmitStatus,
    },
    routes::{employee::session_employee_id, restaurant_view},
    utils::auth::require_role,
    AppState,
};

#[derive(Deserialize)]
pub struct EmployeeDayQueryParams {
    pub date: String,
}

#[tracing::instrument(name = "Employee day view route handler", skip_all)]
pub async fn get_employee_day(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<EmployeeDayQueryParams>,
) -> Result<(StatusCode, Json<EmployeeDayResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Employee).await?;
    let date = ShiftDate::parse(&params.date)?;
    let employee_id = session_employee_id(&state, &session).await?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;
    let shifts = shifts_on(&view.snapshot().read().await.shifts(), &date);

    let statuses = state.submit_statuses.read().await;
    let now = Instant::now();
    let shifts = shifts
        .into_iter()
        .map(|shift| {
            let (requested, submit_status) = match &employee_id {
                Some(id) => (
                    shift.has_request_from(id),
                    statuses.get(id, &shift.id, now),
                ),
                None => (false, None),
            };
            EmployeeShift {
                shift,
                requested,
                submit_status,
            }
        })
        .collect();

    Ok((StatusCode::OK, Json(EmployeeDayResponse { date, shifts })))
}

#[derive(Debug, Serialize)]
pub struct EmployeeDayResponse {
    pub date: ShiftDate,
    pub shifts: Vec<EmployeeShift>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeShift {
    #[serde(flatten)]
    pub shift: Shift,
    pub requested: bool,
    #[serde(rename = "submitStatus")]
    pub submit_status: Option<SubmitStatus>,
}
