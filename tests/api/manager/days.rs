use crate::helpers::{
    add_shift, get_json_response_body, manager_session, TestApp,
};
use serde_json::{json, Value};
use test_context::test_context;

fn slot<'a>(body: &'a Value, shift_type: &str) -> &'a Value {
    body["slots"]
        .as_array()
        .expect("slots is not an array")
        .iter()
        .find(|slot| slot["shiftType"] == shift_type)
        .expect("missing slot")
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_three_empty_slots_for_empty_day(app: &mut TestApp) {
    manager_session(app).await;

    let response = app.get_manager_day("3/17/2025").await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body["date"], "3/17/2025");
    assert_eq!(body["shifts"], json!([]));
    assert_eq!(
        body["slots"],
        json!([
            { "shiftType": "morning", "shiftId": null, "neededEmployees": 0 },
            { "shiftType": "noon", "shiftId": null, "neededEmployees": 0 },
            { "shiftType": "evening", "shiftId": null, "neededEmployees": 0 }
        ])
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_bind_slots_to_existing_shifts(app: &mut TestApp) {
    manager_session(app).await;
    let evening = add_shift(app, "3/17/2025", "evening", 2).await;
    add_shift(app, "3/18/2025", "morning", 1).await;

    let body = get_json_response_body(app.get_manager_day("3/17/2025").await)
        .await;
    assert_eq!(body["shifts"].as_array().map(Vec::len), Some(1));
    assert_eq!(slot(&body, "evening")["shiftId"], evening.as_str());
    assert_eq!(slot(&body, "evening")["neededEmployees"], 2);
    assert_eq!(slot(&body, "morning")["shiftId"], Value::Null);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_update_and_delete_on_save(app: &mut TestApp) {
    manager_session(app).await;
    let noon = add_shift(app, "3/17/2025", "noon", 1).await;
    let evening = add_shift(app, "3/17/2025", "evening", 2).await;

    let response = app
        .put_manager_day(&json!({
            "date": "3/17/2025",
            "slots": [
                { "shiftType": "morning", "neededEmployees": 2 },
                { "shiftType": "noon", "neededEmployees": 3 },
                { "shiftType": "evening", "neededEmployees": 0 }
            ]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;

    let morning = slot(&body, "morning");
    assert!(morning["shiftId"].is_string(), "morning shift not created");
    assert_eq!(morning["neededEmployees"], 2);

    assert_eq!(slot(&body, "noon")["shiftId"], noon.as_str());
    assert_eq!(slot(&body, "noon")["neededEmployees"], 3);

    assert_eq!(slot(&body, "evening")["shiftId"], Value::Null);
    let ids: Vec<&str> = body["shifts"]
        .as_array()
        .expect("shifts is not an array")
        .iter()
        .filter_map(|shift| shift["id"].as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&evening.as_str()));

    let calendar =
        get_json_response_body(app.get_manager_calendar().await).await;
    assert_eq!(calendar["scheduledDates"], json!(["3/17/2025"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_keep_slots_left_out_of_save(app: &mut TestApp) {
    manager_session(app).await;
    let morning = add_shift(app, "3/17/2025", "morning", 4).await;

    let body = get_json_response_body(
        app.put_manager_day(&json!({
            "date": "3/17/2025",
            "slots": [{ "shiftType": "evening", "neededEmployees": 1 }]
        }))
        .await,
    )
    .await;

    assert_eq!(slot(&body, "morning")["shiftId"], morning.as_str());
    assert_eq!(slot(&body, "morning")["neededEmployees"], 4);
    assert_eq!(slot(&body, "noon")["shiftId"], Value::Null);
    assert!(slot(&body, "evening")["shiftId"].is_string());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_treat_other_date_spellings_as_same_day(app: &mut TestApp) {
    manager_session(app).await;
    let morning = add_shift(app, "1/1/2025", "morning", 1).await;

    let body = get_json_response_body(
        app.put_manager_day(&json!({
            "date": "2025-01-01",
            "slots": [{ "shiftType": "morning", "neededEmployees": 3 }]
        }))
        .await,
    )
    .await;
    assert_eq!(body["date"], "1/1/2025");
    assert_eq!(body["shifts"].as_array().map(Vec::len), Some(1));
    assert_eq!(slot(&body, "morning")["shiftId"], morning.as_str());
    assert_eq!(slot(&body, "morning")["neededEmployees"], 3);

    let body = get_json_response_body(app.get_manager_day("01/01/2025").await)
        .await;
    assert_eq!(slot(&body, "morning")["shiftId"], morning.as_str());

    let calendar =
        get_json_response_body(app.get_manager_calendar().await).await;
    assert_eq!(calendar["scheduledDates"], json!(["1/1/2025"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_date(app: &mut TestApp) {
    manager_session(app).await;

    assert_eq!(app.get_manager_day("someday").await.status().as_u16(), 400);
    let response = app
        .put_manager_day(&json!({ "date": "13/40/2025", "slots": [] }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
