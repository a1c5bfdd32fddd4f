use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    ChangeFeed, CredentialHash, Employee, EmployeeId, EmployeeStore,
    EmployeeStoreError, PersonName, RestaurantId, Subscription, Username,
};

/// Employees table, with a change feed fed by this process's own writes.
pub struct PostgresEmployeeStore {
    pool: PgPool,
    feed: ChangeFeed<Employee>,
}

impl PostgresEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::default(),
        }
    }

    async fn publish(&mut self, restaurant_id: &RestaurantId) {
        let reread = self.get_employees(restaurant_id).await;
        self.feed.publish_reread(restaurant_id, reread);
    }
}

fn employee_from_row(row: &PgRow) -> Result<Employee> {
    let id: Uuid = row.try_get("id")?;
    let first_name: String = row.try_get("first_name")?;
    let last_name: String = row.try_get("last_name")?;
    let username: String = row.try_get("username")?;
    let password_hash: String = row.try_get("password_hash")?;

    Ok(Employee {
        id: EmployeeId::new(id),
        first_name: PersonName::parse(first_name).map_err(|e| eyre!(e))?,
        last_name: PersonName::parse(last_name).map_err(|e| eyre!(e))?,
        username: Username::parse(&username).map_err(|e| eyre!(e))?,
        password_hash: CredentialHash::parse(Secret::new(password_hash))?,
    })
}

#[async_trait::async_trait]
impl EmployeeStore for PostgresEmployeeStore {
    #[tracing::instrument(name = "Adding employee to PostgreSQL", skip_all)]
    async fn add_employee(
        &mut self,
        restaurant_id: &RestaurantId,
        employee: Employee,
    ) -> Result<(), EmployeeStoreError> {
        sqlx::query(
            r#"
            INSERT INTO employees
                (id, restaurant_id, first_name, last_name, username,
                 password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employee.id.as_ref())
        .bind(restaurant_id.as_ref())
        .bind(employee.first_name.as_ref())
        .bind(employee.last_name.as_ref())
        .bind(employee.username.as_ref())
        .bind(employee.password_hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                EmployeeStoreError::UsernameExists
            }
            err => EmployeeStoreError::UnexpectedError(err.into()),
        })?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(name = "Getting employees from PostgreSQL", skip_all)]
    async fn get_employees(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, username, password_hash
            FROM employees
            WHERE restaurant_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(restaurant_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EmployeeStoreError::UnexpectedError(e.into()))?;

        rows.iter()
            .map(|row| {
                employee_from_row(row)
                    .map_err(EmployeeStoreError::UnexpectedError)
            })
            .collect()
    }

    #[tracing::instrument(
        name = "Getting employee by username from PostgreSQL",
        skip_all
    )]
    async fn get_employee_by_username(
        &self,
        restaurant_id: &RestaurantId,
        username: &Username,
    ) -> Result<Employee, EmployeeStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, username, password_hash
            FROM employees
            WHERE restaurant_id = $1 AND username = $2
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(username.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| EmployeeStoreError::UnexpectedError(e.into()))?
        .ok_or(EmployeeStoreError::EmployeeNotFound)?;

        employee_from_row(&row).map_err(EmployeeStoreError::UnexpectedError)
    }

    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Employee>, EmployeeStoreError> {
        let current = self.get_employees(restaurant_id).await?;
        Ok(self.feed.subscribe(restaurant_id, || current))
    }
}
