//! SQLite CustomerRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use crate::db::{Customer, CustomerRepository, DbError, DbResult};

const SELECT_COLUMNS: &str =
    "SELECT id, name, email, balance, rating, birth_date, married, created_at FROM customer";

/// SQLx-backed customer repository.
pub struct SqliteCustomerRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> CustomerRepository for SqliteCustomerRepository<'a> {
    #[instrument(skip_all, fields(id = %customer.id))]
    async fn create(&self, customer: &Customer) -> DbResult<()> {
        if customer.id.trim().is_empty() {
            return Err(DbError::Validation {
                message: "customer id cannot be empty".to_string(),
            });
        }

        sqlx::query(
            "INSERT INTO customer (id, name, email, balance, rating, birth_date, married, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP))",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.balance)
        .bind(customer.rating)
        .bind(customer.birth_date)
        .bind(customer.married)
        .bind(customer.created_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &str) -> DbResult<Customer> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))?;

        customer_from_row(&row)
    }

    async fn list(&self) -> DbResult<Vec<Customer>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at, id", SELECT_COLUMNS))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(customer_from_row).collect()
    }
}

/// Decode one customer row; NULL columns become `None`.
fn customer_from_row(row: &SqliteRow) -> DbResult<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        balance: row.try_get("balance")?,
        rating: row.try_get("rating")?,
        birth_date: row.try_get("birth_date")?,
        married: row.try_get("married")?,
        created_at: Some(row.try_get("created_at")?),
    })
}
