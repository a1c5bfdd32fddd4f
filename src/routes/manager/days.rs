use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        shifts_on, DayEdit, DaySlot, Role, Shift, ShiftAPIError, ShiftDate,
        ShiftType,
    },
    routes::restaurant_view,
    services::save_day_edit,
    utils::auth::require_role,
    AppState,
};

#[derive(Deserialize)]
pub struct DayQueryParams {
    pub date: String,
}

#[tracing::instrument(name = "Manager day view route handler", skip_all)]
pub async fn get_manager_day(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<DayQueryParams>,
) -> Result<(StatusCode, Json<ManagerDayResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;
    let date = ShiftDate::parse(&params.date)?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;
    let shifts = view.snapshot().read().await.shifts();

    Ok((StatusCode::OK, Json(ManagerDayResponse::new(date, &shifts))))
}

/// Saves the three slots of a day. A slot left out of the request keeps
/// its current count.
#[tracing::instrument(name = "Save day route handler", skip_all)]
pub async fn save_manager_day(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SaveDayRequest>,
) -> Result<(StatusCode, Json<ManagerDayResponse>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;
    let date = ShiftDate::parse(&request.date)?;

    let view = restaurant_view(&state, &session.restaurant_id)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;
    let shifts = view.snapshot().read().await.shifts();

    let mut edit = DayEdit::open(date.clone(), &shifts);
    for slot in &request.slots {
        edit.set_needed(slot.shift_type, slot.needed_employees);
    }

    save_day_edit(
        &session.restaurant_id,
        &edit,
        &state.shift_store,
        view.snapshot(),
    )
    .await?;

    let shifts = view.snapshot().read().await.shifts();
    Ok((StatusCode::OK, Json(ManagerDayResponse::new(date, &shifts))))
}

#[derive(Debug, Deserialize)]
pub struct SaveDayRequest {
    pub date: String,
    pub slots: Vec<SlotUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct SlotUpdate {
    #[serde(rename = "shiftType")]
    pub shift_type: ShiftType,
    #[serde(rename = "neededEmployees")]
    pub needed_employees: u32,
}

#[derive(Debug, Serialize)]
pub struct ManagerDayResponse {
    pub date: ShiftDate,
    pub shifts: Vec<Shift>,
    pub slots: Vec<DaySlot>,
}

impl ManagerDayResponse {
    fn new(date: ShiftDate, shifts: &[Shift]) -> Self {
        let slots = DayEdit::open(date.clone(), shifts).slots();
        Self {
            shifts: shifts_on(shifts, &date),
            date,
            slots,
        }
    }
}
