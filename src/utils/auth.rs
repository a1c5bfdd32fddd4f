use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::{AppState, BannedTokenStoreType},
    domain::{
        AuthAPIError, BannedTokenStoreError, RestaurantId, Role, Session,
        Username, ValidationError,
    },
};

use super::constants::{JWT_COOKIE_NAME, TOKEN_TTL_SECONDS};

// Create cookie with a new JWT session token
#[tracing::instrument(name = "Generating auth cookie", skip_all)]
pub fn generate_auth_cookie(
    session: &Session,
    jwt_secret: &Secret<String>,
) -> Result<Cookie<'static>> {
    let token = generate_auth_token(session, jwt_secret)?;
    Ok(create_auth_cookie(token))
}

#[tracing::instrument(name = "Creating auth cookie", skip_all)]
fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[tracing::instrument(name = "Generating auth token", skip_all)]
fn generate_auth_token(
    session: &Session,
    jwt_secret: &Secret<String>,
) -> Result<Secret<String>> {
    let exp = Utc::now().timestamp() + TOKEN_TTL_SECONDS;
    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: session.username.as_ref().to_owned(),
        restaurant_id: session.restaurant_id.as_ref().to_string(),
        role: session.role,
        exp,
    };

    create_token(&claims, jwt_secret)
}

// Check the token has not been banned at logout, then decode it
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub async fn validate_token(
    token: &Secret<String>,
    banned_token_store: &BannedTokenStoreType,
    jwt_secret: &Secret<String>,
) -> Result<Claims> {
    banned_token_store
        .read()
        .await
        .check_token(token)
        .await
        .map_err(|e| match e {
            BannedTokenStoreError::BannedToken => eyre!("token is banned"),
            e => eyre!(e).wrap_err("failed to check banned tokens"),
        })?;

    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .wrap_err("failed to decode token")
}

#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(
    claims: &Claims,
    jwt_secret: &Secret<String>,
) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn session(&self) -> Result<Session, ValidationError> {
        Ok(Session::new(
            RestaurantId::parse(&self.restaurant_id)?,
            self.role,
            Username::parse(&self.sub)?,
        ))
    }
}

/// The session token held in `jar`, if any.
pub fn session_token(jar: &CookieJar) -> Result<Secret<String>, AuthAPIError> {
    jar.get(JWT_COOKIE_NAME)
        .map(|cookie| Secret::new(cookie.value().to_owned()))
        .ok_or(AuthAPIError::MissingToken)
}

/// Resolves the caller's session from the cookie jar.
#[tracing::instrument(name = "Getting session", skip_all)]
pub async fn get_session(
    jar: &CookieJar,
    state: &AppState,
) -> Result<(Session, Claims), AuthAPIError> {
    let token = session_token(jar)?;
    let claims =
        validate_token(&token, &state.banned_token_store, &state.jwt_secret)
            .await
            .map_err(|_| AuthAPIError::InvalidToken)?;
    let session = claims.session().map_err(|_| AuthAPIError::InvalidToken)?;
    Ok((session, claims))
}

/// Like [`get_session`], but the caller must also hold `role`.
pub async fn require_role(
    jar: &CookieJar,
    state: &AppState,
    role: Role,
) -> Result<Session, AuthAPIError> {
    let (session, _) = get_session(jar, state).await?;
    if !session.is(role) {
        return Err(AuthAPIError::Forbidden(format!("{role:?}")));
    }
    Ok(session)
}
