// store/postgres.rs - sqlx/Postgres store backend

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;

use super::{
    ClassRecord, InstructorRecord, NewClass, NewInstructor, NewUser, Role, Store, StoreError,
    UpdateReport, UserRecord,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        role TEXT,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS classes (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        instructor_email TEXT NOT NULL,
        available_seats INT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instructors (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
];

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and make sure the three tables exist.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Connected to Postgres store");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> UserRecord {
    let role: Option<String> = row.get("role");
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: role.as_deref().map(Role::parse).unwrap_or(Role::None),
        created_at: row.get("created_at"),
    }
}

fn class_from_row(row: &PgRow) -> ClassRecord {
    ClassRecord {
        id: row.get("id"),
        name: row.get("name"),
        instructor_email: row.get("instructor_email"),
        available_seats: row.get("available_seats"),
        price: row.get("price"),
        created_at: row.get("created_at"),
    }
}

fn instructor_from_row(row: &PgRow) -> InstructorRecord {
    InstructorRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        created_at: row.get("created_at"),
    }
}

fn map_unique_violation(err: sqlx::Error, what: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(what),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query("SELECT id, name, email, role, created_at FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows =
            sqlx::query("SELECT id, name, email, role, created_at FROM users ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: Role::None,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO users (id, name, email, role, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(record.role.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "user email"))?;
        Ok(record)
    }

    async fn assign_role(&self, id: Uuid, role: Role) -> Result<UpdateReport, StoreError> {
        // matched counts the row even when the role already holds the value
        let matched = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        let result =
            sqlx::query("UPDATE users SET role = $1 WHERE id = $2 AND role IS DISTINCT FROM $1")
                .bind(role.as_str())
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(UpdateReport {
            matched_count: u64::from(matched),
            modified_count: result.rows_affected(),
        })
    }

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, instructor_email, available_seats, price, created_at \
             FROM classes ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(class_from_row).collect())
    }

    async fn insert_class(&self, class: NewClass) -> Result<ClassRecord, StoreError> {
        let record = ClassRecord {
            id: Uuid::new_v4(),
            name: class.name,
            instructor_email: class.instructor_email,
            available_seats: class.available_seats,
            price: class.price,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO classes (id, name, instructor_email, available_seats, price, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.instructor_email)
        .bind(record.available_seats)
        .bind(record.price)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_instructors(&self) -> Result<Vec<InstructorRecord>, StoreError> {
        let rows = sqlx::query("SELECT id, name, email, created_at FROM instructors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(instructor_from_row).collect())
    }

    async fn insert_instructor(
        &self,
        instructor: NewInstructor,
    ) -> Result<InstructorRecord, StoreError> {
        let record = InstructorRecord {
            id: Uuid::new_v4(),
            name: instructor.name,
            email: instructor.email,
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO instructors (id, name, email, created_at) VALUES ($1, $2, $3, $4)")
            .bind(record.id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "instructor email"))?;
        Ok(record)
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed Postgres store");
    }
}
