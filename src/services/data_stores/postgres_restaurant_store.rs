use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    CredentialHash, ManagerCredentials, Restaurant, RestaurantCode,
    RestaurantId, RestaurantStore, RestaurantStoreError, Username,
};

pub struct PostgresRestaurantStore {
    pool: PgPool,
}

impl PostgresRestaurantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_RESTAURANT: &str = r#"
    SELECT id, code, manager_username, manager_password_hash
    FROM restaurants
"#;

fn restaurant_from_row(row: &PgRow) -> Result<Restaurant> {
    let id: Uuid = row.try_get("id")?;
    let code: String = row.try_get("code")?;
    let username: String = row.try_get("manager_username")?;
    let password_hash: String = row.try_get("manager_password_hash")?;

    Ok(Restaurant {
        id: RestaurantId::new(id),
        code: RestaurantCode::parse(&code).map_err(|e| eyre!(e))?,
        manager: ManagerCredentials {
            username: Username::parse(&username).map_err(|e| eyre!(e))?,
            password_hash: CredentialHash::parse(Secret::new(password_hash))?,
        },
    })
}

#[async_trait::async_trait]
impl RestaurantStore for PostgresRestaurantStore {
    #[tracing::instrument(name = "Adding restaurant to PostgreSQL", skip_all)]
    async fn add_restaurant(
        &mut self,
        restaurant: Restaurant,
    ) -> Result<(), RestaurantStoreError> {
        sqlx::query(
            r#"
            INSERT INTO restaurants
                (id, code, manager_username, manager_password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(restaurant.id.as_ref())
        .bind(restaurant.code.as_ref())
        .bind(restaurant.manager.username.as_ref())
        .bind(restaurant.manager.password_hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RestaurantStoreError::RestaurantCodeExists
            }
            err => RestaurantStoreError::UnexpectedError(err.into()),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Getting restaurant from PostgreSQL", skip_all)]
    async fn get_restaurant(
        &self,
        id: &RestaurantId,
    ) -> Result<Restaurant, RestaurantStoreError> {
        let row = sqlx::query(&format!("{SELECT_RESTAURANT} WHERE id = $1"))
            .bind(id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RestaurantStoreError::UnexpectedError(e.into()))?
            .ok_or(RestaurantStoreError::RestaurantNotFound)?;

        restaurant_from_row(&row).map_err(RestaurantStoreError::UnexpectedError)
    }

    #[tracing::instrument(
        name = "Getting restaurant by code from PostgreSQL",
        skip_all
    )]
    async fn get_restaurant_by_code(
        &self,
        code: &RestaurantCode,
    ) -> Result<Restaurant, RestaurantStoreError> {
        let row =
            sqlx::query(&format!("{SELECT_RESTAURANT} WHERE code = $1"))
                .bind(code.as_ref())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RestaurantStoreError::UnexpectedError(e.into()))?
                .ok_or(RestaurantStoreError::RestaurantNotFound)?;

        restaurant_from_row(&row).map_err(RestaurantStoreError::UnexpectedError)
    }
}
