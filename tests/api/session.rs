use crate::helpers::{
    add_employee, get_json_response_body, login_employee, manager_session,
    TestApp, MANAGER_USERNAME,
};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_session_for_current_token(app: &mut TestApp) {
    manager_session(app).await;

    let response = app.get_session().await;
    assert_eq!(response.status().as_u16(), 200);
    let manager = get_json_response_body(response).await;
    assert_eq!(manager["role"], "manager");
    assert_eq!(manager["username"], MANAGER_USERNAME);

    add_employee(app, "Dougal", "McGuire").await;
    login_employee(app, "dougal").await;

    let employee = get_json_response_body(app.get_session().await).await;
    assert_eq!(employee["role"], "employee");
    assert_eq!(employee["username"], "dougal");
    assert_eq!(employee["restaurantId"], manager["restaurantId"]);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_without_session(app: &mut TestApp) {
    assert_eq!(app.get_session().await.status().as_u16(), 400);
}
