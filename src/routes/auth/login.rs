use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{
        AuthAPIError, CredentialHash, EmployeeStoreError, Password, Restaurant,
        RestaurantCode, RestaurantStoreError, Role, Session, Username,
    },
    utils::auth::generate_auth_cookie,
};

/// Looks the restaurant up by code, then checks the credentials for the
/// chosen role. Each stage has its own failure message.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<Session>), AuthAPIError> {
    let restaurant = find_restaurant(&state, &request.restaurant_code).await?;

    let session = match request.role {
        Role::Manager => login_manager(&restaurant, &request).await?,
        Role::Employee => login_employee(&state, &restaurant, &request).await?,
    };

    let auth_cookie = generate_auth_cookie(&session, &state.jwt_secret)
        .map_err(AuthAPIError::UnexpectedError)?;
    let updated_jar = jar.add(auth_cookie);

    Ok((StatusCode::OK, updated_jar, Json(session)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "restaurantCode")]
    pub restaurant_code: String,
    pub role: Role,
    pub username: String,
    pub password: Secret<String>,
}

async fn find_restaurant(
    state: &AppState,
    code: &str,
) -> Result<Restaurant, AuthAPIError> {
    let code = RestaurantCode::parse(code)
        .map_err(|_| AuthAPIError::InvalidRestaurantCode)?;

    state
        .restaurant_store
        .read()
        .await
        .get_restaurant_by_code(&code)
        .await
        .map_err(|e| match e {
            RestaurantStoreError::RestaurantNotFound => {
                AuthAPIError::InvalidRestaurantCode
            }
            e => AuthAPIError::UnexpectedError(eyre!(e)),
        })
}

/// Username and password as typed, or `None` if either could never match.
fn parse_credentials(request: &LoginRequest) -> Option<(Username, Password)> {
    let username = Username::parse(&request.username).ok()?;
    let password = Password::parse(request.password.clone()).ok()?;
    Some((username, password))
}

#[tracing::instrument(name = "Manager login", skip_all)]
async fn login_manager(
    restaurant: &Restaurant,
    request: &LoginRequest,
) -> Result<Session, AuthAPIError> {
    let (username, password) = parse_credentials(request)
        .ok_or(AuthAPIError::InvalidManagerCredentials)?;

    // Hash before comparing usernames so both failures cost the same.
    let verified = restaurant.manager.password_hash.verify(&password).await;
    if username != restaurant.manager.username || verified.is_err() {
        return Err(AuthAPIError::InvalidManagerCredentials);
    }

    Ok(Session::new(restaurant.id.clone(), Role::Manager, username))
}

#[tracing::instrument(name = "Employee login", skip_all)]
async fn login_employee(
    state: &AppState,
    restaurant: &Restaurant,
    request: &LoginRequest,
) -> Result<Session, AuthAPIError> {
    let (username, password) = parse_credentials(request)
        .ok_or(AuthAPIError::InvalidEmployeeCredentials)?;

    let lookup = state
        .employee_store
        .read()
        .await
        .get_employee_by_username(&restaurant.id, &username)
        .await;
    let employee = match lookup {
        Ok(employee) => employee,
        Err(EmployeeStoreError::EmployeeNotFound) => {
            let _ = CredentialHash::verify_unknown(&password).await;
            return Err(AuthAPIError::InvalidEmployeeCredentials);
        }
        Err(e) => return Err(AuthAPIError::UnexpectedError(eyre!(e))),
    };

    employee
        .password_hash
        .verify(&password)
        .await
        .map_err(|_| AuthAPIError::InvalidEmployeeCredentials)?;

    Ok(Session::new(restaurant.id.clone(), Role::Employee, username))
}
