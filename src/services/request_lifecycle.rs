use std::time::Instant;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::app_state::ShiftStoreType;
use crate::domain::{
    EmployeeId, LayeredSnapshot, RestaurantId, ShiftAPIError, ShiftId,
    ShiftStoreError, SubmitStatus, SubmitStatusBoard, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitOutcome {
    Submitted,
    AlreadySubmitted,
}

fn shift_store_error(e: ShiftStoreError, shift_id: &ShiftId) -> ShiftAPIError {
    match e {
        ShiftStoreError::ShiftNotFound => {
            ShiftAPIError::IDNotFoundError(*shift_id.as_ref())
        }
        e => ShiftAPIError::UnexpectedError(e.into()),
    }
}

/// An employee asks to work `shift_id`. Requests are a set, so asking
/// twice is reported as success without writing again.
///
/// The submit status moves through `submitting` to `submitted` or `error`
/// on `statuses`.
#[tracing::instrument(name = "Submitting shift request", skip_all)]
pub async fn submit_request(
    restaurant_id: &RestaurantId,
    employee_id: Option<&EmployeeId>,
    shift_id: &ShiftId,
    shift_store: &ShiftStoreType,
    snapshot: &RwLock<LayeredSnapshot>,
    statuses: &RwLock<SubmitStatusBoard>,
) -> Result<SubmitOutcome, ShiftAPIError> {
    let employee_id = employee_id.ok_or_else(|| {
        ValidationError::new(
            "No employee record for the current session".to_owned(),
        )
    })?;

    statuses.write().await.set(
        employee_id,
        shift_id,
        SubmitStatus::Submitting,
        Instant::now(),
    );

    let result =
        write_request(restaurant_id, employee_id, shift_id, shift_store, snapshot)
            .await;

    let status = match result {
        Ok(_) => SubmitStatus::Submitted,
        Err(_) => SubmitStatus::Error,
    };
    statuses
        .write()
        .await
        .set(employee_id, shift_id, status, Instant::now());
    result
}

async fn write_request(
    restaurant_id: &RestaurantId,
    employee_id: &EmployeeId,
    shift_id: &ShiftId,
    shift_store: &ShiftStoreType,
    snapshot: &RwLock<LayeredSnapshot>,
) -> Result<SubmitOutcome, ShiftAPIError> {
    let mut store = shift_store.write().await;
    let mut shift = store
        .get_shift(restaurant_id, shift_id)
        .await
        .map_err(|e| shift_store_error(e, shift_id))?;

    if shift.has_request_from(employee_id) {
        return Ok(SubmitOutcome::AlreadySubmitted);
    }

    store
        .add_request(restaurant_id, shift_id, employee_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error requesting shift");
            shift_store_error(e, shift_id)
        })?;
    drop(store);

    shift.add_request(employee_id);
    snapshot.write().await.apply_local(shift);
    Ok(SubmitOutcome::Submitted)
}

/// Moves `employee_id` from the shift's requests to its assigned
/// employees in a single store update, so requests that arrive meanwhile
/// are kept.
#[tracing::instrument(name = "Accepting shift request", skip_all)]
pub async fn accept_request(
    restaurant_id: &RestaurantId,
    shift_id: &ShiftId,
    employee_id: &EmployeeId,
    shift_store: &ShiftStoreType,
    snapshot: &RwLock<LayeredSnapshot>,
) -> Result<(), ShiftAPIError> {
    let accepted = shift_store
        .write()
        .await
        .accept_request(restaurant_id, shift_id, employee_id)
        .await
        .map_err(|e| match e {
            ShiftStoreError::RequestNotFound => ShiftAPIError::RequestNotFound {
                shift_id: *shift_id.as_ref(),
                employee_id: *employee_id.as_ref(),
            },
            e => {
                tracing::error!(error = %e, "Error accepting request");
                shift_store_error(e, shift_id)
            }
        })?;

    snapshot.write().await.apply_local(accepted);
    Ok(())
}

/// Drops the request without assigning anyone.
#[tracing::instrument(name = "Rejecting shift request", skip_all)]
pub async fn reject_request(
    restaurant_id: &RestaurantId,
    shift_id: &ShiftId,
    employee_id: &EmployeeId,
    shift_store: &ShiftStoreType,
    snapshot: &RwLock<LayeredSnapshot>,
) -> Result<(), ShiftAPIError> {
    let mut store = shift_store.write().await;
    let mut shift = store
        .get_shift(restaurant_id, shift_id)
        .await
        .map_err(|e| shift_store_error(e, shift_id))?;

    store
        .remove_request(restaurant_id, shift_id, employee_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error rejecting request");
            shift_store_error(e, shift_id)
        })?;
    drop(store);

    shift.reject_request(employee_id);
    snapshot.write().await.apply_local(shift);
    Ok(())
}
