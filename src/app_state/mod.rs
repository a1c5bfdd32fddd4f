use secrecy::Secret;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    BannedTokenStore, EmployeeStore, RestaurantStore, ShiftStore,
    SubmitStatusBoard,
};
use crate::services::RestaurantViews;

pub type RestaurantStoreType = Arc<RwLock<dyn RestaurantStore + Send + Sync>>;
pub type EmployeeStoreType = Arc<RwLock<dyn EmployeeStore + Send + Sync>>;
pub type ShiftStoreType = Arc<RwLock<dyn ShiftStore + Send + Sync>>;
pub type BannedTokenStoreType = Arc<RwLock<dyn BannedTokenStore + Send + Sync>>;
pub type SubmitStatusBoardType = Arc<RwLock<SubmitStatusBoard>>;
pub type RestaurantViewsType = Arc<RwLock<RestaurantViews>>;

#[derive(Clone)]
pub struct AppState {
    pub restaurant_store: RestaurantStoreType,
    pub employee_store: EmployeeStoreType,
    pub shift_store: ShiftStoreType,
    pub banned_token_store: BannedTokenStoreType,
    pub submit_statuses: SubmitStatusBoardType,
    pub views: RestaurantViewsType,
    pub jwt_secret: Secret<String>,
}

impl AppState {
    pub fn new(
        restaurant_store: RestaurantStoreType,
        employee_store: EmployeeStoreType,
        shift_store: ShiftStoreType,
        banned_token_store: BannedTokenStoreType,
        submit_statuses: SubmitStatusBoardType,
        jwt_secret: Secret<String>,
    ) -> Self {
        Self {
            restaurant_store,
            employee_store,
            shift_store,
            banned_token_store,
            submit_statuses,
            views: Arc::new(RwLock::new(RestaurantViews::default())),
            jwt_secret,
        }
    }
}
