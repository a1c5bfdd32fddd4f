use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    serve::Serve,
    Json, Router,
};

use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{AuthAPIError, ShiftAPIError};
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    auth::{login, logout, session},
    employee::{get_employee_calendar, get_employee_day, request_shift},
    manager::{
        accept_request, add_employee, add_shift, get_manager_calendar,
        get_manager_day, get_request_queue, list_employees, reject_request,
        save_manager_day,
    },
    register_restaurant,
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AuthAPIError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AuthAPIError::InvalidRestaurantCode => {
                log_error_chain(self, Level::DEBUG);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid restaurant code.".to_string(),
                )
            }
            AuthAPIError::InvalidManagerCredentials => {
                log_error_chain(self, Level::DEBUG);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid manager credentials.".to_string(),
                )
            }
            AuthAPIError::InvalidEmployeeCredentials => {
                log_error_chain(self, Level::DEBUG);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid employee credentials.".to_string(),
                )
            }
            AuthAPIError::RestaurantCodeExists => {
                log_error_chain(self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    "Restaurant code already exists".to_string(),
                )
            }
            AuthAPIError::ValidationError(message) => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            AuthAPIError::Forbidden(_) => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }
            AuthAPIError::UnexpectedError(_) => {
                log_error_chain(self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
            AuthAPIError::MissingToken => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, "Missing token".to_string())
            }
            AuthAPIError::InvalidToken => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
        }
    }
}

impl IntoResponse for AuthAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

impl IntoResponse for ShiftAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ShiftAPIError::AuthenticationError(auth_error) => {
                auth_error.status_and_message()
            }
            ShiftAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{id}"))
            }
            ShiftAPIError::RequestNotFound { .. } => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{self}"))
            }
            ShiftAPIError::UsernameExists(_) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, format!("{self}"))
            }
            ShiftAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
            ShiftAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/restaurants", post(register_restaurant))
            .route("/auth/login", post(login))
            .route("/auth/logout", post(logout))
            .route("/auth/session", get(session))
            .route(
                "/manager/employees",
                get(list_employees).post(add_employee),
            )
            .route("/manager/shifts", post(add_shift))
            .route(
                "/manager/days",
                get(get_manager_day).put(save_manager_day),
            )
            .route("/manager/calendar", get(get_manager_calendar))
            .route("/manager/requests", get(get_request_queue))
            .route("/manager/requests/accept", post(accept_request))
            .route("/manager/requests/reject", post(reject_request))
            .route("/employee/days", get(get_employee_day))
            .route("/employee/requests", post(request_shift))
            .route("/employee/calendar", get(get_employee_calendar))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

pub fn get_redis_client(redis_hostname: String) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
