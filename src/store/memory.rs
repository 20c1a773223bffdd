// store/memory.rs - In-memory store backend
//
// Backs the router tests and the dev fallback used when DATABASE_URL is
// unset. Same contract as the Postgres backend, no I/O.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ClassRecord, InstructorRecord, NewClass, NewInstructor, NewUser, Role, Store, StoreError,
    UpdateReport, UserRecord,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    classes: Vec<ClassRecord>,
    instructors: Vec<InstructorRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.clone())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("user email"));
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: Role::None,
            created_at: Utc::now(),
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn assign_role(&self, id: Uuid, role: Role) -> Result<UpdateReport, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                let modified = u64::from(user.role != role);
                user.role = role;
                Ok(UpdateReport { matched_count: 1, modified_count: modified })
            }
            None => Ok(UpdateReport { matched_count: 0, modified_count: 0 }),
        }
    }

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.classes.clone())
    }

    async fn insert_class(&self, class: NewClass) -> Result<ClassRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let record = ClassRecord {
            id: Uuid::new_v4(),
            name: class.name,
            instructor_email: class.instructor_email,
            available_seats: class.available_seats,
            price: class.price,
            created_at: Utc::now(),
        };
        inner.classes.push(record.clone());
        Ok(record)
    }

    async fn list_instructors(&self) -> Result<Vec<InstructorRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.instructors.clone())
    }

    async fn insert_instructor(
        &self,
        instructor: NewInstructor,
    ) -> Result<InstructorRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.instructors.iter().any(|i| i.email == instructor.email) {
            return Err(StoreError::Duplicate("instructor email"));
        }
        let record = InstructorRecord {
            id: Uuid::new_v4(),
            name: instructor.name,
            email: instructor.email,
            created_at: Utc::now(),
        };
        inner.instructors.push(record.clone());
        Ok(record)
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
