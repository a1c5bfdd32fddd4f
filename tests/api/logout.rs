use reqwest::Url;
use secrecy::Secret;
use shift_requests::{
    domain::BannedTokenStoreError, utils::constants::JWT_COOKIE_NAME,
};
use test_context::test_context;

use crate::helpers::{
    register_restaurant, TestApp, MANAGER_PASSWORD, MANAGER_USERNAME,
    RESTAURANT_CODE,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_ban_token(app: &mut TestApp) {
    register_restaurant(app).await;

    let login_response = app
        .post_login(&serde_json::json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "manager",
            "username": MANAGER_USERNAME,
            "password": MANAGER_PASSWORD
        }))
        .await;
    assert_eq!(login_response.status().as_u16(), 200);

    let auth_cookie = login_response
        .cookies()
        .find(|cookie| cookie.name() == JWT_COOKIE_NAME)
        .expect("No auth cookie in jar");
    let raw_token = auth_cookie.value().to_owned();
    let token = Secret::new(raw_token.clone());

    assert_eq!(
        app.banned_token_store
            .read()
            .await
            .check_token(&token)
            .await,
        Ok(())
    );

    let response = app.post_logout().await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Unexpected error logging out"
    );

    assert_eq!(
        app.banned_token_store
            .read()
            .await
            .check_token(&token)
            .await,
        Err(BannedTokenStoreError::BannedToken)
    );

    // replaying the old token is refused
    app.cookie_jar.add_cookie_str(
        &format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/",
            JWT_COOKIE_NAME, raw_token
        ),
        &Url::parse(&app.address).expect("Failed to parse URL"),
    );
    assert_eq!(app.get_session().await.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_jwt_cookie_missing(app: &mut TestApp) {
    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_invalid_token(app: &mut TestApp) {
    app.cookie_jar.add_cookie_str(
        &format!(
            "{}=invalid; HttpOnly; SameSite=Lax; Path=/",
            JWT_COOKIE_NAME
        ),
        &Url::parse(&app.address).expect("Failed to parse URL"),
    );

    let response = app.post_logout().await;

    assert_eq!(response.status().as_u16(), 401);
}
