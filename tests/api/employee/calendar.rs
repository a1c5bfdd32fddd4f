use crate::helpers::{
    add_employee, add_shift, get_json_response_body, login_employee,
    manager_session, request_shift, TestApp,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_mark_open_and_registered_dates(app: &mut TestApp) {
    manager_session(app).await;
    add_employee(app, "Dougal", "McGuire").await;
    add_shift(app, "6/3/2025", "morning", 1).await;
    let wanted = add_shift(app, "6/1/2025", "evening", 2).await;
    add_shift(app, "6/2/2025", "noon", 0).await;

    login_employee(app, "dougal").await;

    let response = app.get_employee_calendar().await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(response).await,
        json!({
            "openDates": ["6/1/2025", "6/3/2025"],
            "registeredDates": []
        })
    );

    request_shift(app, &wanted).await;

    let body =
        get_json_response_body(app.get_employee_calendar().await).await;
    assert_eq!(body["registeredDates"], json!(["6/1/2025"]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_without_session(app: &mut TestApp) {
    assert_eq!(app.get_employee_calendar().await.status().as_u16(), 400);
}
