// store/mod.rs - Record store contract shared by the Postgres and in-memory backends

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Errors from store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Recognized user roles. Anything else stored in the role field reads back
/// as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    #[default]
    None,
}

impl Role {
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "instructor" => Role::Instructor,
            _ => Role::None,
        }
    }

    /// Stored representation; `None` is kept as an absent column value.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Role::Admin => Some("admin"),
            Role::Instructor => Some("instructor"),
            Role::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Role::None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Role::is_none")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: Uuid,
    pub name: String,
    pub instructor_email: String,
    pub available_seats: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub instructor_email: String,
    pub available_seats: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInstructor {
    pub name: String,
    pub email: String,
}

/// Outcome of a single-field update, mirroring what the update operation
/// reports to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Store operations the API is a pass-through for: find, insert, and
/// single-field update. The authorization gate only ever calls `find_user`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn assign_role(&self, id: Uuid, role: Role) -> Result<UpdateReport, StoreError>;

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, StoreError>;

    async fn insert_class(&self, class: NewClass) -> Result<ClassRecord, StoreError>;

    async fn list_instructors(&self) -> Result<Vec<InstructorRecord>, StoreError>;

    async fn insert_instructor(&self, instructor: NewInstructor)
        -> Result<InstructorRecord, StoreError>;

    /// Pings the backend to ensure connectivity
    async fn health(&self) -> Result<(), StoreError>;

    /// Release held connections (e.g., on shutdown)
    async fn close(&self);
}
