use crate::helpers::{
    add_employee, get_json_response_body, login_employee, manager_session,
    TestApp,
};
use serde_json::json;
use shift_requests::ErrorResponse;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_and_list_new_employee(app: &mut TestApp) {
    manager_session(app).await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "firstName": { "type": "string" },
        "lastName": { "type": "string" },
        "username": { "type": "string" }
      },
      "required": ["id", "firstName", "lastName", "username"],
      "not": { "required": ["passwordHash"] }
    });

    let response = app
        .post_employee(&json!({
            "firstName": "Ted",
            "lastName": "Crilly",
            "username": "ted",
            "password": "employee-password"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let created = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&schema, &created),
        "response does not match schema"
    );

    let response = app.get_employees().await;
    assert_eq!(response.status().as_u16(), 200);
    let listed = get_json_response_body(response).await;
    assert_eq!(listed, json!([created]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_duplicate_username(app: &mut TestApp) {
    manager_session(app).await;
    add_employee(app, "Ted", "Crilly").await;

    let response = app
        .post_employee(&json!({
            "firstName": "Ted",
            "lastName": "Other",
            "username": "ted",
            "password": "employee-password"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    let error = response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body to ErrorResponse")
        .error;
    assert!(error.contains("ted"), "unexpected error: {error}");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_empty_fields(app: &mut TestApp) {
    manager_session(app).await;

    let test_cases = [
        json!({
            "firstName": "",
            "lastName": "Crilly",
            "username": "ted",
            "password": "employee-password"
        }),
        json!({
            "firstName": "Ted",
            "lastName": "   ",
            "username": "ted",
            "password": "employee-password"
        }),
        json!({
            "firstName": "Ted",
            "lastName": "Crilly",
            "username": "",
            "password": "employee-password"
        }),
        json!({
            "firstName": "Ted",
            "lastName": "Crilly",
            "username": "ted",
            "password": ""
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_employee(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_employee_session(app: &mut TestApp) {
    manager_session(app).await;
    add_employee(app, "Dougal", "McGuire").await;
    login_employee(app, "dougal").await;

    assert_eq!(app.get_employees().await.status().as_u16(), 403);
    let response = app
        .post_employee(&json!({
            "firstName": "Jack",
            "lastName": "Hackett",
            "username": "jack",
            "password": "employee-password"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_without_session(app: &mut TestApp) {
    assert_eq!(app.get_employees().await.status().as_u16(), 400);
}
