use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        CredentialHash, Employee, EmployeeId, EmployeeStoreError, Password,
        PersonName, Role, ShiftAPIError, Username,
    },
    utils::auth::require_role,
    AppState,
};

#[tracing::instrument(name = "List employees route handler", skip_all)]
pub async fn list_employees(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<Vec<EmployeeSummary>>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let employees = state
        .employee_store
        .read()
        .await
        .get_employees(&session.restaurant_id)
        .await
        .map_err(|e| ShiftAPIError::UnexpectedError(eyre!(e)))?;

    let response = employees.iter().map(EmployeeSummary::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[tracing::instrument(name = "Add employee route handler", skip_all)]
pub async fn add_employee(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AddEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeSummary>), ShiftAPIError> {
    let session = require_role(&jar, &state, Role::Manager).await?;

    let first_name = PersonName::parse(request.first_name)?;
    let last_name = PersonName::parse(request.last_name)?;
    let username = Username::parse(&request.username)?;
    let password = Password::parse(request.password)?;
    let password_hash = CredentialHash::from_password(&password)
        .await
        .map_err(ShiftAPIError::UnexpectedError)?;

    let employee = Employee::new(first_name, last_name, username, password_hash);
    let response = EmployeeSummary::from(&employee);

    state
        .employee_store
        .write()
        .await
        .add_employee(&session.restaurant_id, employee)
        .await
        .map_err(|e| match e {
            EmployeeStoreError::UsernameExists => {
                ShiftAPIError::UsernameExists(response.username.clone())
            }
            e => {
                tracing::error!(error = %e, "Error adding employee");
                ShiftAPIError::UnexpectedError(eyre!(e))
            }
        })?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Deserialize)]
pub struct AddEmployeeRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub username: String,
    pub password: Secret<String>,
}

/// An employee as shown to the manager, without the password hash.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub username: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            first_name: employee.first_name.as_ref().to_owned(),
            last_name: employee.last_name.as_ref().to_owned(),
            username: employee.username.as_ref().to_owned(),
        }
    }
}
