use crate::helpers::{
    add_employee, get_json_response_body, manager_session,
    register_restaurant, TestApp, EMPLOYEE_PASSWORD, MANAGER_PASSWORD,
    MANAGER_USERNAME, RESTAURANT_CODE,
};
use serde_json::json;
use shift_requests::{utils::constants::JWT_COOKIE_NAME, ErrorResponse};
use test_context::test_context;

async fn error_message(response: reqwest::Response) -> String {
    response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body to ErrorResponse")
        .error
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_set_cookie_for_manager(app: &mut TestApp) {
    register_restaurant(app).await;

    let response = app
        .post_login(&json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "manager",
            "username": MANAGER_USERNAME,
            "password": MANAGER_PASSWORD
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let auth_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == JWT_COOKIE_NAME)
        .expect("No auth cookie found");
    assert!(!auth_cookie.value().is_empty());

    let body = get_json_response_body(response).await;
    assert_eq!(body["role"], "manager");
    assert_eq!(body["username"], MANAGER_USERNAME);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_for_employee(app: &mut TestApp) {
    manager_session(app).await;
    add_employee(app, "Dougal", "McGuire").await;

    let response = app
        .post_login(&json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "employee",
            "username": "dougal",
            "password": EMPLOYEE_PASSWORD
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["role"], "employee");
    assert_eq!(body["username"], "dougal");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_unknown_restaurant_code(app: &mut TestApp) {
    register_restaurant(app).await;

    for code in ["RUGGED", ""] {
        let response = app
            .post_login(&json!({
                "restaurantCode": code,
                "role": "manager",
                "username": MANAGER_USERNAME,
                "password": MANAGER_PASSWORD
            }))
            .await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(error_message(response).await, "Invalid restaurant code.");
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_bad_manager_credentials(app: &mut TestApp) {
    register_restaurant(app).await;

    let test_cases = [
        (MANAGER_USERNAME, "wrong-password"),
        ("father.ted", MANAGER_PASSWORD),
        (MANAGER_USERNAME, "short"),
    ];

    for (username, password) in test_cases {
        let response = app
            .post_login(&json!({
                "restaurantCode": RESTAURANT_CODE,
                "role": "manager",
                "username": username,
                "password": password
            }))
            .await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(
            error_message(response).await,
            "Invalid manager credentials."
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_bad_employee_credentials(app: &mut TestApp) {
    manager_session(app).await;
    add_employee(app, "Dougal", "McGuire").await;

    let test_cases = [
        ("dougal", "wrong-password"),
        ("jack", EMPLOYEE_PASSWORD),
        // the manager is not an employee
        (MANAGER_USERNAME, MANAGER_PASSWORD),
    ];

    for (username, password) in test_cases {
        let response = app
            .post_login(&json!({
                "restaurantCode": RESTAURANT_CODE,
                "role": "employee",
                "username": username,
                "password": password
            }))
            .await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(
            error_message(response).await,
            "Invalid employee credentials."
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_credentials(app: &mut TestApp) {
    register_restaurant(app).await;

    let test_cases = [
        json!({ "restaurantCode": RESTAURANT_CODE }),
        json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "owner",
            "username": MANAGER_USERNAME,
            "password": MANAGER_PASSWORD
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_login(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
