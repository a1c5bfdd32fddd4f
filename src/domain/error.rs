use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthAPIError {
    #[error("Invalid restaurant code")]
    InvalidRestaurantCode,
    #[error("Invalid manager credentials")]
    InvalidManagerCredentials,
    #[error("Invalid employee credentials")]
    InvalidEmployeeCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Missing token")]
    MissingToken,
    #[error("Role not permitted: {0}")]
    Forbidden(String),
    #[error("Restaurant code already exists")]
    RestaurantCodeExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ShiftAPIError {
    #[error("Authentication error")]
    AuthenticationError(#[from] AuthAPIError),
    #[error("Resource with ID not found: {0}")]
    IDNotFoundError(uuid::Uuid),
    #[error("Username already exists: {0}")]
    UsernameExists(String),
    #[error("No pending request from {employee_id} on shift {shift_id}")]
    RequestNotFound {
        shift_id: uuid::Uuid,
        employee_id: uuid::Uuid,
    },
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
