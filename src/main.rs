use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use shift_requests::{
    app_state::AppState,
    domain::SubmitStatusBoard,
    get_postgres_pool, get_redis_client,
    services::data_stores::{
        PostgresEmployeeStore, PostgresRestaurantStore, PostgresShiftStore,
        RedisBannedTokenStore,
    },
    utils::{
        constants::{
            prod, DATABASE_URL, JWT_SECRET, REDIS_HOST_NAME, SUBMIT_STATUS_TTL,
        },
        tracing::init_tracing,
    },
    Application,
};
use sqlx::PgPool;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await?;
    let redis_connection = Arc::new(RwLock::new(configure_redis()?));

    let app_state = AppState::new(
        Arc::new(RwLock::new(PostgresRestaurantStore::new(pg_pool.clone()))),
        Arc::new(RwLock::new(PostgresEmployeeStore::new(pg_pool.clone()))),
        Arc::new(RwLock::new(PostgresShiftStore::new(pg_pool))),
        Arc::new(RwLock::new(RedisBannedTokenStore::new(redis_connection))),
        Arc::new(RwLock::new(SubmitStatusBoard::new(SUBMIT_STATUS_TTL))),
        JWT_SECRET.clone(),
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{e}"))
        .wrap_err("Failed to build app")?;

    app.run().await.wrap_err("Failed to run app")?;
    Ok(())
}

async fn configure_postgresql() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

fn configure_redis() -> Result<redis::Connection> {
    get_redis_client(REDIS_HOST_NAME.to_owned())
        .wrap_err("Failed to get Redis client")?
        .get_connection()
        .wrap_err("Failed to get Redis connection")
}
