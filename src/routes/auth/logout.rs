use axum::{extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{cookie, CookieJar};
use color_eyre::eyre::eyre;

use crate::{
    domain::{AuthAPIError, Role},
    utils::{
        auth::{session_token, validate_token},
        constants::JWT_COOKIE_NAME,
    },
    AppState,
};

#[tracing::instrument(name = "Logout route handler", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Result<impl IntoResponse, AuthAPIError>) {
    let token = match session_token(&jar) {
        Ok(token) => token,
        Err(e) => return (jar, Err(e)),
    };

    let claims = match validate_token(
        &token,
        &state.banned_token_store,
        &state.jwt_secret,
    )
    .await
    {
        Ok(claims) => claims,
        Err(_) => return (jar, Err(AuthAPIError::InvalidToken)),
    };

    if let Err(err) = state
        .banned_token_store
        .write()
        .await
        .ban_token(&token, claims.exp as i64)
        .await
    {
        return (jar, Err(AuthAPIError::UnexpectedError(eyre!(err))));
    }

    if let Ok(session) = claims.session() {
        if session.is(Role::Manager) {
            state.views.write().await.close(&session.restaurant_id);
        }
    }

    let removal = cookie::Cookie::build((JWT_COOKIE_NAME, "")).path("/");
    let jar = jar.remove(removal);

    (jar, Ok(StatusCode::OK))
}
