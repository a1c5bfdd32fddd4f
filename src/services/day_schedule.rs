use tokio::sync::RwLock;

use crate::app_state::ShiftStoreType;
use crate::domain::{
    DayEdit, DayEditAction, LayeredSnapshot, RestaurantId, Shift,
    ShiftAPIError, ShiftStoreError,
};

/// Applies a manager's day edit slot by slot. Slots already applied stay
/// applied if a later one fails.
#[tracing::instrument(name = "Saving day edit", skip_all)]
pub async fn save_day_edit(
    restaurant_id: &RestaurantId,
    edit: &DayEdit,
    shift_store: &ShiftStoreType,
    snapshot: &RwLock<LayeredSnapshot>,
) -> Result<Vec<Shift>, ShiftAPIError> {
    let mut saved = Vec::new();
    for action in edit.plan() {
        let mut store = shift_store.write().await;
        let result = match &action {
            DayEditAction::Create(shift) => {
                store.add_shift(restaurant_id, shift).await
            }
            DayEditAction::Overwrite(shift) => {
                store.overwrite_shift(restaurant_id, shift).await
            }
            DayEditAction::Delete(shift_id) => {
                store.delete_shift(restaurant_id, shift_id).await
            }
        };
        drop(store);

        result.map_err(|e| {
            tracing::error!(error = %e, "Error saving shifts");
            match e {
                ShiftStoreError::ShiftNotFound => {
                    ShiftAPIError::IDNotFoundError(match &action {
                        DayEditAction::Create(s)
                        | DayEditAction::Overwrite(s) => *s.id.as_ref(),
                        DayEditAction::Delete(id) => *id.as_ref(),
                    })
                }
                e => ShiftAPIError::UnexpectedError(e.into()),
            }
        })?;

        match action {
            DayEditAction::Create(shift) | DayEditAction::Overwrite(shift) => {
                snapshot.write().await.apply_local(shift.clone());
                saved.push(shift);
            }
            DayEditAction::Delete(shift_id) => {
                snapshot.write().await.apply_local_delete(&shift_id);
            }
        }
    }
    Ok(saved)
}
