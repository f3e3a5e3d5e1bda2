use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::student::Model as Student;
use crate::db::student_store;
use crate::errors::ServiceError;
use super::domain::{SearchFilter, StudentInput};

/// Record Store seam for student rows.
///
/// Fetch-then-mutate operations (`update`, `delete`, `delete_all`) are one
/// logical unit; implementations run them atomically where the store allows.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError>;
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Student>, ServiceError>;
    async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, input: &StudentInput) -> Result<Student, ServiceError>;
    async fn insert_many(&self, inputs: &[StudentInput]) -> Result<Vec<Student>, ServiceError>;
    async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<Option<Student>, ServiceError>;
    async fn delete_all(&self) -> Result<Vec<Student>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        student_store::list_students(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError> {
        student_store::get_student(&self.db, id).await
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Student>, ServiceError> {
        student_store::search_students(&self.db, filter).await
    }

    async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, ServiceError> {
        student_store::exists_by_full_name(&self.db, first_name, last_name).await
    }

    async fn insert(&self, input: &StudentInput) -> Result<Student, ServiceError> {
        student_store::insert_student(&self.db, input).await
    }

    async fn insert_many(&self, inputs: &[StudentInput]) -> Result<Vec<Student>, ServiceError> {
        student_store::insert_students(&self.db, inputs).await
    }

    async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, ServiceError> {
        student_store::update_student(&self.db, id, input).await
    }

    async fn delete(&self, id: i32) -> Result<Option<Student>, ServiceError> {
        student_store::delete_student(&self.db, id).await
    }

    async fn delete_all(&self) -> Result<Vec<Student>, ServiceError> {
        student_store::delete_all_students(&self.db).await
    }
}

/// Simple in-memory repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i32, Student>,
        last_id: i32,
    }

    /// Ids increase monotonically and are never reused, like a serial column.
    #[derive(Default)]
    pub struct InMemoryStudentRepository {
        inner: Mutex<Inner>,
    }

    impl InMemoryStudentRepository {
        pub fn len(&self) -> usize {
            self.inner.lock().unwrap().rows.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    fn name_eq(stored: &Option<String>, wanted: &str) -> bool {
        // stored NULL never matches, as in SQL
        stored.as_deref().is_some_and(|s| s.to_lowercase() == wanted.to_lowercase())
    }

    fn build(id: i32, input: &StudentInput) -> Student {
        Student {
            id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            date_of_birth: input.date_of_birth,
            major: input.major.clone(),
        }
    }

    #[async_trait]
    impl StudentRepository for InMemoryStudentRepository {
        async fn list(&self) -> Result<Vec<Student>, ServiceError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Student>, ServiceError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.get(&id).cloned())
        }

        async fn search(&self, filter: &SearchFilter) -> Result<Vec<Student>, ServiceError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.values().filter(|s| filter.matches(s)).cloned().collect())
        }

        async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, ServiceError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.rows.values().any(|s| name_eq(&s.first_name, first_name) && name_eq(&s.last_name, last_name)))
        }

        async fn insert(&self, input: &StudentInput) -> Result<Student, ServiceError> {
            input.validate()?;
            let mut inner = self.inner.lock().unwrap();
            inner.last_id += 1;
            let s = build(inner.last_id, input);
            inner.rows.insert(s.id, s.clone());
            Ok(s)
        }

        async fn insert_many(&self, inputs: &[StudentInput]) -> Result<Vec<Student>, ServiceError> {
            for input in inputs {
                input.validate()?;
            }
            let mut inner = self.inner.lock().unwrap();
            let mut created = Vec::with_capacity(inputs.len());
            for input in inputs {
                inner.last_id += 1;
                let s = build(inner.last_id, input);
                inner.rows.insert(s.id, s.clone());
                created.push(s);
            }
            Ok(created)
        }

        async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, ServiceError> {
            input.validate()?;
            let mut inner = self.inner.lock().unwrap();
            let Some(existing) = inner.rows.get_mut(&id) else { return Ok(None); };
            *existing = build(id, input);
            Ok(Some(existing.clone()))
        }

        async fn delete(&self, id: i32) -> Result<Option<Student>, ServiceError> {
            let mut inner = self.inner.lock().unwrap();
            Ok(inner.rows.remove(&id))
        }

        async fn delete_all(&self) -> Result<Vec<Student>, ServiceError> {
            let mut inner = self.inner.lock().unwrap();
            let rows = std::mem::take(&mut inner.rows);
            Ok(rows.into_values().collect())
        }
    }
}
