use crate::helpers::{get_json_response_body, manager_session, TestApp};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_with_empty_lists(app: &mut TestApp) {
    manager_session(app).await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "date": { "type": "string" },
        "shiftType": { "type": "string", "enum": ["morning", "noon", "evening"] },
        "neededEmployees": { "type": "integer", "minimum": 0 },
        "assignedEmployees": { "type": "array", "maxItems": 0 },
        "requests": { "type": "array", "maxItems": 0 }
      },
      "required": [
        "id", "date", "shiftType", "neededEmployees",
        "assignedEmployees", "requests"
      ]
    });

    let requests = [
        (
            json!({ "date": "1/1/2025", "shiftType": "morning", "neededEmployees": 2 }),
            "1/1/2025",
        ),
        (
            json!({ "date": "2025-01-02", "shiftType": "evening", "neededEmployees": 0 }),
            "1/2/2025",
        ),
    ];

    for (request, stored_date) in requests.iter() {
        let response = app.post_shift(request).await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed to create shift: {}",
            request
        );

        let response_body = get_json_response_body(response).await;
        assert!(
            jsonschema::is_valid(&schema, &response_body),
            "response does not match schema"
        );
        assert_eq!(response_body["date"], *stored_date);
        assert_eq!(response_body["shiftType"], request["shiftType"]);
        assert_eq!(
            response_body["neededEmployees"],
            request["neededEmployees"]
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_values(app: &mut TestApp) {
    manager_session(app).await;

    let test_cases = [
        json!({ "date": "31/31/2025", "shiftType": "morning", "neededEmployees": 1 }),
        json!({ "date": "tomorrow", "shiftType": "morning", "neededEmployees": 1 }),
        json!({ "date": "1/1/2025", "shiftType": "midnight", "neededEmployees": 1 }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_shift(test_case).await;
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
async fn should_return_422_if_malformed_request(app: &mut TestApp) {
    manager_session(app).await;

    let test_cases = [
        json!({ "date": "1/1/2025", "shiftType": "morning" }),
        json!({ "date": "1/1/2025", "neededEmployees": 1 }),
        json!({ "date": "1/1/2025", "shiftType": "noon", "neededEmployees": -1 }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_shift(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
