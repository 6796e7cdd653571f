use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::admin::AdminCredential;
use crate::models::employee::{Employee, NewEmployee};

#[cfg(test)]
pub mod memory;

/// Persistence boundary for employee records and admin credentials.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All employees, newest first.
    async fn list_employees(&self) -> Result<Vec<Employee>, AppError>;

    /// Insert one employee and return the id the database assigned.
    async fn create_employee(&self, employee: &NewEmployee) -> Result<i64, AppError>;

    /// Delete by id. Deleting an id that does not exist is not an error.
    async fn delete_employee(&self, id: i64) -> Result<(), AppError>;

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminCredential>, AppError>;
}

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .max_lifetime(config.db_max_lifetime)
        .test_before_acquire(true)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, name, age, department, city, works_url, contact FROM employee ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO employee (name, age, department, city, works_url, contact) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.department)
        .bind(&employee.city)
        .bind(&employee.works_url)
        .bind(&employee.contact)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn delete_employee(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminCredential>, AppError> {
        let admin = sqlx::query_as::<_, AdminCredential>(
            "SELECT username, password_hash FROM admin WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }
}
