use std::str::FromStr;

use color_eyre::eyre::{eyre, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{
    ChangeFeed, EmployeeId, RestaurantId, Shift, ShiftDate, ShiftId,
    ShiftStore, ShiftStoreError, ShiftType, Subscription,
};

/// Shifts table. `requests` and `assigned_employees` are `uuid[]` columns
/// so each request operation is a single-row update.
pub struct PostgresShiftStore {
    pool: PgPool,
    feed: ChangeFeed<Shift>,
}

impl PostgresShiftStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: ChangeFeed::default(),
        }
    }

    async fn publish(&mut self, restaurant_id: &RestaurantId) {
        let reread = self.get_shifts(restaurant_id).await;
        self.feed.publish_reread(restaurant_id, reread);
    }
}

fn ids(ids: &[EmployeeId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_ref()).collect()
}

fn shift_from_row(row: &PgRow) -> Result<Shift> {
    let id: Uuid = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let shift_type: String = row.try_get("shift_type")?;
    let needed: i32 = row.try_get("needed_employees")?;
    let assigned: Vec<Uuid> = row.try_get("assigned_employees")?;
    let requests: Vec<Uuid> = row.try_get("requests")?;

    Ok(Shift {
        id: ShiftId::new(id),
        date: ShiftDate::from_stored(date),
        shift_type: ShiftType::from_str(&shift_type).map_err(|e| eyre!(e))?,
        needed_employees: u32::try_from(needed)?,
        assigned_employees: assigned.into_iter().map(EmployeeId::new).collect(),
        requests: requests.into_iter().map(EmployeeId::new).collect(),
    })
}

/// Maps a write's outcome, treating zero affected rows as a missing shift.
fn expect_one_row(
    result: Result<sqlx::postgres::PgQueryResult, sqlx::Error>,
) -> Result<(), ShiftStoreError> {
    let result =
        result.map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;
    if result.rows_affected() == 0 {
        return Err(ShiftStoreError::ShiftNotFound);
    }
    Ok(())
}

#[async_trait::async_trait]
impl ShiftStore for PostgresShiftStore {
    #[tracing::instrument(name = "Adding shift to PostgreSQL", skip_all)]
    async fn add_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError> {
        let needed = i32::try_from(shift.needed_employees)
            .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;
        sqlx::query(
            r#"
            INSERT INTO shifts
                (id, restaurant_id, date, shift_type, needed_employees,
                 assigned_employees, requests)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(shift.id.as_ref())
        .bind(restaurant_id.as_ref())
        .bind(shift.date.as_ref())
        .bind(shift.shift_type.as_str())
        .bind(needed)
        .bind(ids(&shift.assigned_employees))
        .bind(ids(&shift.requests))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ShiftStoreError::ShiftIdExists
            }
            err => ShiftStoreError::UnexpectedError(err.into()),
        })?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(name = "Getting shift from PostgreSQL", skip_all)]
    async fn get_shift(
        &self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<Shift, ShiftStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, date, shift_type, needed_employees,
                   assigned_employees, requests
            FROM shifts
            WHERE restaurant_id = $1 AND id = $2
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(shift_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?
        .ok_or(ShiftStoreError::ShiftNotFound)?;

        shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Getting shifts from PostgreSQL", skip_all)]
    async fn get_shifts(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Shift>, ShiftStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, shift_type, needed_employees,
                   assigned_employees, requests
            FROM shifts
            WHERE restaurant_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(restaurant_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;

        rows.iter()
            .map(|row| {
                shift_from_row(row).map_err(ShiftStoreError::UnexpectedError)
            })
            .collect()
    }

    #[tracing::instrument(name = "Overwriting shift in PostgreSQL", skip_all)]
    async fn overwrite_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError> {
        let needed = i32::try_from(shift.needed_employees)
            .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;
        let result = sqlx::query(
            r#"
            UPDATE shifts
            SET date = $3, shift_type = $4, needed_employees = $5,
                assigned_employees = $6, requests = $7
            WHERE restaurant_id = $1 AND id = $2
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(shift.id.as_ref())
        .bind(shift.date.as_ref())
        .bind(shift.shift_type.as_str())
        .bind(needed)
        .bind(ids(&shift.assigned_employees))
        .bind(ids(&shift.requests))
        .execute(&self.pool)
        .await;
        expect_one_row(result)?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting shift from PostgreSQL", skip_all)]
    async fn delete_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<(), ShiftStoreError> {
        let result = sqlx::query(
            "DELETE FROM shifts WHERE restaurant_id = $1 AND id = $2",
        )
        .bind(restaurant_id.as_ref())
        .bind(shift_id.as_ref())
        .execute(&self.pool)
        .await;
        expect_one_row(result)?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(name = "Adding shift request in PostgreSQL", skip_all)]
    async fn add_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE shifts
            SET requests = CASE
                WHEN $3 = ANY(requests) THEN requests
                ELSE array_append(requests, $3)
            END
            WHERE restaurant_id = $1 AND id = $2
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(shift_id.as_ref())
        .bind(employee_id.as_ref())
        .execute(&self.pool)
        .await;
        expect_one_row(result)?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(
        name = "Removing shift request in PostgreSQL",
        skip_all
    )]
    async fn remove_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE shifts
            SET requests = array_remove(requests, $3)
            WHERE restaurant_id = $1 AND id = $2
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(shift_id.as_ref())
        .bind(employee_id.as_ref())
        .execute(&self.pool)
        .await;
        expect_one_row(result)?;

        self.publish(restaurant_id).await;
        Ok(())
    }

    #[tracing::instrument(name = "Accepting shift request in PostgreSQL", skip_all)]
    async fn accept_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<Shift, ShiftStoreError> {
        let row = sqlx::query(
            r#"
            UPDATE shifts
            SET requests = array_remove(requests, $3),
                assigned_employees = array_append(assigned_employees, $3)
            WHERE restaurant_id = $1 AND id = $2 AND $3 = ANY(requests)
            RETURNING id, date, shift_type, needed_employees,
                      assigned_employees, requests
            "#,
        )
        .bind(restaurant_id.as_ref())
        .bind(shift_id.as_ref())
        .bind(employee_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ShiftStoreError::UnexpectedError(e.into()))?;

        let Some(row) = row else {
            // Tell a missing shift apart from a missing request.
            self.get_shift(restaurant_id, shift_id).await?;
            return Err(ShiftStoreError::RequestNotFound);
        };
        let accepted =
            shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)?;

        self.publish(restaurant_id).await;
        Ok(accepted)
    }

    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Shift>, ShiftStoreError> {
        let current = self.get_shifts(restaurant_id).await?;
        Ok(self.feed.subscribe(restaurant_id, || current))
    }
}
