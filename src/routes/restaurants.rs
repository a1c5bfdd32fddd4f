use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AuthAPIError, CredentialHash, ManagerCredentials, Password, Restaurant,
        RestaurantCode, RestaurantId, RestaurantStoreError, Username,
    },
};

#[tracing::instrument(name = "Register restaurant route handler", skip_all)]
pub async fn register_restaurant(
    State(state): State<AppState>,
    Json(request): Json<RegisterRestaurantRequest>,
) -> Result<(StatusCode, Json<RegisterRestaurantResponse>), AuthAPIError> {
    let code = RestaurantCode::parse(&request.restaurant_code)?;
    let username = Username::parse(&request.manager_username)?;
    let password = Password::parse(request.manager_password)?;
    let password_hash = CredentialHash::from_password(&password)
        .await
        .map_err(AuthAPIError::UnexpectedError)?;

    let restaurant = Restaurant::new(
        code,
        ManagerCredentials {
            username,
            password_hash,
        },
    );
    let response = RegisterRestaurantResponse {
        restaurant_id: restaurant.id.clone(),
        restaurant_code: restaurant.code.as_ref().to_owned(),
    };

    state
        .restaurant_store
        .write()
        .await
        .add_restaurant(restaurant)
        .await
        .map_err(|e| match e {
            RestaurantStoreError::RestaurantCodeExists => {
                AuthAPIError::RestaurantCodeExists
            }
            e => AuthAPIError::UnexpectedError(eyre!(e)),
        })?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Deserialize)]
pub struct RegisterRestaurantRequest {
    #[serde(rename = "restaurantCode")]
    pub restaurant_code: String,
    #[serde(rename = "managerUsername")]
    pub manager_username: String,
    #[serde(rename = "managerPassword")]
    pub manager_password: Secret<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRestaurantResponse {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: RestaurantId,
    #[serde(rename = "restaurantCode")]
    pub restaurant_code: String,
}
