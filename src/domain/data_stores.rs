use super::{
    Employee, EmployeeId, Restaurant, RestaurantCode, RestaurantId, Shift,
    ShiftId, Subscription, Username,
};
use color_eyre::eyre::{Report, Result};
use secrecy::Secret;
use thiserror::Error;

#[async_trait::async_trait]
pub trait RestaurantStore {
    async fn add_restaurant(
        &mut self,
        restaurant: Restaurant,
    ) -> Result<(), RestaurantStoreError>;
    async fn get_restaurant(
        &self,
        id: &RestaurantId,
    ) -> Result<Restaurant, RestaurantStoreError>;
    async fn get_restaurant_by_code(
        &self,
        code: &RestaurantCode,
    ) -> Result<Restaurant, RestaurantStoreError>;
}

#[derive(Debug, Error)]
pub enum RestaurantStoreError {
    #[error("Restaurant code already exists")]
    RestaurantCodeExists,
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for RestaurantStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::RestaurantCodeExists, Self::RestaurantCodeExists)
                | (Self::RestaurantNotFound, Self::RestaurantNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// The employees collection of each restaurant.
#[async_trait::async_trait]
pub trait EmployeeStore {
    async fn add_employee(
        &mut self,
        restaurant_id: &RestaurantId,
        employee: Employee,
    ) -> Result<(), EmployeeStoreError>;
    async fn get_employees(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Employee>, EmployeeStoreError>;
    async fn get_employee_by_username(
        &self,
        restaurant_id: &RestaurantId,
        username: &Username,
    ) -> Result<Employee, EmployeeStoreError>;
    /// Live feed of the whole collection, starting with its current state.
    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Employee>, EmployeeStoreError>;
}

#[derive(Debug, Error)]
pub enum EmployeeStoreError {
    #[error("Employee not found")]
    EmployeeNotFound,
    #[error("Username already exists")]
    UsernameExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for EmployeeStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmployeeNotFound, Self::EmployeeNotFound)
                | (Self::UsernameExists, Self::UsernameExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// The shifts collection of each restaurant. Every successful write
/// publishes a fresh snapshot to subscribers.
#[async_trait::async_trait]
pub trait ShiftStore {
    async fn add_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError>;
    async fn get_shift(
        &self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<Shift, ShiftStoreError>;
    async fn get_shifts(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Shift>, ShiftStoreError>;
    /// Replaces every field of an existing shift document.
    async fn overwrite_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError>;
    async fn delete_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<(), ShiftStoreError>;
    /// Set-union of `employee_id` into the shift's `requests`.
    async fn add_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError>;
    /// Removes every occurrence of `employee_id` from `requests`.
    async fn remove_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError>;
    /// Moves `employee_id` from `requests` to `assignedEmployees` in one
    /// update against the stored document and returns the result. Fails
    /// with `RequestNotFound`, writing nothing, if there is no such request.
    async fn accept_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<Shift, ShiftStoreError>;
    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Shift>, ShiftStoreError>;
}

#[derive(Debug, Error)]
pub enum ShiftStoreError {
    #[error("Shift ID exists")]
    ShiftIdExists,
    #[error("Shift not found")]
    ShiftNotFound,
    #[error("Request not found")]
    RequestNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ShiftStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ShiftIdExists, Self::ShiftIdExists)
                | (Self::ShiftNotFound, Self::ShiftNotFound)
                | (Self::RequestNotFound, Self::RequestNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait BannedTokenStore {
    /// Bans `token` until `expires_at` (unix seconds), after which the
    /// token is rejected on its own merits.
    async fn ban_token(
        &mut self,
        token: &Secret<String>,
        expires_at: i64,
    ) -> Result<(), BannedTokenStoreError>;
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError>;
}

#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Token is banned")]
    BannedToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BannedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BannedToken, Self::BannedToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
