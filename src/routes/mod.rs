pub mod auth;
pub mod employee;
pub mod manager;
mod restaurants;

pub use restaurants::*;

use std::sync::Arc;

use color_eyre::eyre::Report;

use crate::{
    app_state::AppState, domain::RestaurantId, services::RestaurantView,
};

/// The live view of `restaurant_id`, opening it on first use.
pub(crate) async fn restaurant_view(
    state: &AppState,
    restaurant_id: &RestaurantId,
) -> Result<Arc<RestaurantView>, Report> {
    state
        .views
        .write()
        .await
        .get_or_open(restaurant_id, &state.shift_store, &state.employee_store)
        .await
}
