mod calendar;
mod days;
mod requests;

pub use calendar::*;
pub use days::*;
pub use requests::*;

use color_eyre::eyre::eyre;

use crate::{
    app_state::AppState,
    domain::{EmployeeId, EmployeeStoreError, Session, ShiftAPIError},
};

/// The employee record behind `session`, or `None` if it no longer exists.
pub(crate) async fn session_employee_id(
    state: &AppState,
    session: &Session,
) -> Result<Option<EmployeeId>, ShiftAPIError> {
    match state
        .employee_store
        .read()
        .await
        .get_employee_by_username(&session.restaurant_id, &session.username)
        .await
    {
        Ok(employee) => Ok(Some(employee.id)),
        Err(EmployeeStoreError::EmployeeNotFound) => Ok(None),
        Err(e) => Err(ShiftAPIError::UnexpectedError(eyre!(e))),
    }
}
