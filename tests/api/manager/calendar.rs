use crate::helpers::{add_shift, get_json_response_body, manager_session, TestApp};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_each_scheduled_date_once_in_order(app: &mut TestApp) {
    manager_session(app).await;

    let response = app.get_manager_calendar().await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(response).await,
        json!({ "scheduledDates": [] })
    );

    add_shift(app, "1/10/2025", "evening", 1).await;
    add_shift(app, "1/2/2025", "morning", 0).await;
    add_shift(app, "1/10/2025", "morning", 2).await;

    let body = get_json_response_body(app.get_manager_calendar().await).await;
    assert_eq!(body, json!({ "scheduledDates": ["1/2/2025", "1/10/2025"] }));
}
