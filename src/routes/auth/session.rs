use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::{
    domain::{AuthAPIError, Session},
    utils::auth::get_session,
    AppState,
};

#[tracing::instrument(name = "Session route handler", skip_all)]
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Session>, AuthAPIError> {
    let (session, _) = get_session(&jar, &state).await?;
    Ok(Json(session))
}
