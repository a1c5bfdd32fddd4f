use reqwest::{cookie::Jar, Response, StatusCode};
use serde_json::Value;
use shift_requests::{
    app_state::{
        AppState, BannedTokenStoreType, EmployeeStoreType, ShiftStoreType,
    },
    domain::{RestaurantId, Shift, ShiftId, ShiftStore, SubmitStatusBoard},
    services::data_stores::{
        HashmapBannedTokenStore, HashmapEmployeeStore, HashmapRestaurantStore,
        HashmapShiftStore,
    },
    utils::constants::{test, SUBMIT_STATUS_TTL},
    Application,
};
use secrecy::Secret;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const RESTAURANT_CODE: &str = "CRAGGY";
pub const MANAGER_USERNAME: &str = "bishop.brennan";
pub const MANAGER_PASSWORD: &str = "manager-password";
pub const EMPLOYEE_PASSWORD: &str = "employee-password";

pub struct TestApp {
    pub address: String,
    pub banned_token_store: BannedTokenStoreType,
    pub cookie_jar: Arc<Jar>,
    pub employee_store: EmployeeStoreType,
    pub http_client: reqwest::Client,
    pub shift_store: ShiftStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        let restaurant_store =
            Arc::new(RwLock::new(HashmapRestaurantStore::default()));
        let employee_store: EmployeeStoreType =
            Arc::new(RwLock::new(HashmapEmployeeStore::default()));
        let shift_store: ShiftStoreType =
            Arc::new(RwLock::new(HashmapShiftStore::default()));
        let banned_token_store: BannedTokenStoreType =
            Arc::new(RwLock::new(HashmapBannedTokenStore::default()));

        let app_state = AppState::new(
            restaurant_store,
            employee_store.clone(),
            shift_store.clone(),
            banned_token_store.clone(),
            Arc::new(RwLock::new(SubmitStatusBoard::new(SUBMIT_STATUS_TTL))),
            Secret::new(Uuid::new_v4().to_string()),
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            banned_token_store,
            cookie_jar,
            employee_store,
            http_client,
            shift_store,
        }
    }

    pub async fn post_restaurant<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/restaurants", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/auth/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_logout(&self) -> Response {
        self.http_client
            .post(format!("{}/auth/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_session(&self) -> Response {
        self.http_client
            .get(format!("{}/auth/session", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_employees(&self) -> Response {
        self.http_client
            .get(format!("{}/manager/employees", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_employee<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/manager/employees", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_shift<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/manager/shifts", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_manager_day(&self, date: &str) -> Response {
        self.http_client
            .get(format!("{}/manager/days", &self.address))
            .query(&[("date", date)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_manager_day<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/manager/days", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_manager_calendar(&self) -> Response {
        self.http_client
            .get(format!("{}/manager/calendar", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_requests(&self) -> Response {
        self.http_client
            .get(format!("{}/manager/requests", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_accept<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/manager/requests/accept", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_reject<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/manager/requests/reject", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_employee_day(&self, date: &str) -> Response {
        self.http_client
            .get(format!("{}/employee/days", &self.address))
            .query(&[("date", date)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_shift_request<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/employee/requests", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_employee_calendar(&self) -> Response {
        self.http_client
            .get(format!("{}/employee/calendar", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }
}

pub async fn get_json_response_body(response: Response) -> Value {
    let body: Value = response
        .json()
        .await
        .expect("failed to parse response body JSON");
    body
}

/// Registers the test restaurant with its manager.
pub async fn register_restaurant(app: &TestApp) {
    let response = app
        .post_restaurant(&serde_json::json!({
            "restaurantCode": RESTAURANT_CODE,
            "managerUsername": MANAGER_USERNAME,
            "managerPassword": MANAGER_PASSWORD
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

pub async fn login_manager(app: &TestApp) {
    let response = app
        .post_login(&serde_json::json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "manager",
            "username": MANAGER_USERNAME,
            "password": MANAGER_PASSWORD
        }))
        .await;
    assert_eq!(response.status(), StatusCode::OK, "manager login failed");
}

pub async fn login_employee(app: &TestApp, username: &str) {
    let response = app
        .post_login(&serde_json::json!({
            "restaurantCode": RESTAURANT_CODE,
            "role": "employee",
            "username": username,
            "password": EMPLOYEE_PASSWORD
        }))
        .await;
    assert_eq!(response.status(), StatusCode::OK, "employee login failed");
}

/// A registered restaurant with the manager logged in.
pub async fn manager_session(app: &TestApp) {
    register_restaurant(app).await;
    login_manager(app).await;
}

/// Adds an employee whose username is the lowercased first name. Returns
/// the new employee's id.
pub async fn add_employee(app: &TestApp, first: &str, last: &str) -> String {
    let response = app
        .post_employee(&serde_json::json!({
            "firstName": first,
            "lastName": last,
            "username": first.to_lowercase(),
            "password": EMPLOYEE_PASSWORD
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    id_of(get_json_response_body(response).await)
}

/// Adds a shift and returns its id.
pub async fn add_shift(
    app: &TestApp,
    date: &str,
    shift_type: &str,
    needed: u32,
) -> String {
    let response = app
        .post_shift(&serde_json::json!({
            "date": date,
            "shiftType": shift_type,
            "neededEmployees": needed
        }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    id_of(get_json_response_body(response).await)
}

pub async fn request_shift(app: &TestApp, shift_id: &str) -> Value {
    let response = app
        .post_shift_request(&serde_json::json!({ "shiftId": shift_id }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    get_json_response_body(response).await
}

/// The shift as the store holds it, bypassing the server's local view.
pub async fn stored_shift(app: &TestApp, shift_id: &str) -> Shift {
    let session = get_json_response_body(app.get_session().await).await;
    let restaurant_id = session["restaurantId"]
        .as_str()
        .and_then(|id| RestaurantId::parse(id).ok())
        .expect("No restaurantId in session");
    let shift_id = ShiftId::parse(shift_id).expect("Invalid shift id");

    app.shift_store
        .read()
        .await
        .get_shift(&restaurant_id, &shift_id)
        .await
        .expect("Shift not in store")
}

fn id_of(body: Value) -> String {
    body.get("id")
        .expect("No id in response")
        .as_str()
        .expect("id is not a string")
        .to_owned()
}
