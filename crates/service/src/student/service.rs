use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::student::Model as Student;
use crate::errors::ServiceError;
use super::domain::{FullName, SearchFilter, StudentInput};
use super::repository::StudentRepository;

/// Student business service, independent of the web framework.
///
/// Owns the duplicate-name pre-check and the all-or-nothing policy of bulk
/// creation. Uniqueness is not re-checked on update, and the exists-then-insert
/// sequence is not locked: concurrent creates with the same name can both pass.
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self { Self { repo } }

    /// Every stored student; empty when the store is empty.
    pub async fn get_all(&self) -> Result<Vec<Student>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Student, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::student_not_found(id))
    }

    /// Exact, case-sensitive filtering; absent filters are wildcards.
    #[instrument(skip(self))]
    pub async fn search(&self, filter: SearchFilter) -> Result<Vec<Student>, ServiceError> {
        let filter = filter.normalized();
        if filter.is_empty() {
            return self.repo.list().await;
        }
        let found = self.repo.search(&filter).await?;
        debug!(count = found.len(), "student_search");
        Ok(found)
    }

    /// Case-insensitive match on both names.
    pub async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, ServiceError> {
        self.repo.exists_by_full_name(first_name, last_name).await
    }

    async fn is_duplicate(&self, name: &FullName) -> Result<bool, ServiceError> {
        let (first, last) = name.parts();
        self.exists_by_full_name(first, last).await
    }

    /// Create a student unless the name pair is already stored.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, domain::StudentInput, repository::mock::InMemoryStudentRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(InMemoryStudentRepository::default()));
    /// let dob = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    /// let ann = tokio_test::block_on(svc.create(StudentInput::new("Ann", "Lee", dob, Some("CS")))).unwrap();
    /// assert_eq!(ann.id, 1);
    /// let again = tokio_test::block_on(svc.create(StudentInput::new("ANN", "lee", dob, None)));
    /// assert!(matches!(again, Err(ServiceError::Duplicate(_))));
    /// ```
    #[instrument(skip(self, input), fields(first_name = ?input.first_name, last_name = ?input.last_name))]
    pub async fn create(&self, input: StudentInput) -> Result<Student, ServiceError> {
        input.validate()?;
        let name = input.full_name();
        if self.is_duplicate(&name).await? {
            warn!(name = %name, "student_duplicate_rejected");
            return Err(ServiceError::Duplicate(vec![name]));
        }
        let created = self.repo.insert(&input).await?;
        info!(id = created.id, "student_created");
        Ok(created)
    }

    /// Create a batch. Each record is checked against stored rows only (not
    /// against the rest of the batch); one duplicate rejects the whole batch.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_many(&self, inputs: Vec<StudentInput>) -> Result<Vec<Student>, ServiceError> {
        if inputs.is_empty() {
            return Err(ServiceError::Validation("student list must not be empty".into()));
        }
        for input in &inputs {
            input.validate()?;
        }

        let mut duplicates = Vec::new();
        for input in &inputs {
            let name = input.full_name();
            if self.is_duplicate(&name).await? {
                duplicates.push(name);
            }
        }
        if !duplicates.is_empty() {
            warn!(duplicates = duplicates.len(), "student_batch_rejected");
            return Err(ServiceError::Duplicate(duplicates));
        }

        let created = self.repo.insert_many(&inputs).await?;
        info!(count = created.len(), first_id = created.first().map(|s| s.id), "students_created");
        Ok(created)
    }

    /// Overwrite every field except the id. No duplicate-name check.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: StudentInput) -> Result<Student, ServiceError> {
        input.validate()?;
        let updated = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::student_not_found(id))?;
        info!(id, "student_updated");
        Ok(updated)
    }

    /// Remove a student and return its last state.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Student, ServiceError> {
        let deleted = self.repo.delete(id).await?.ok_or_else(|| ServiceError::student_not_found(id))?;
        info!(id, "student_deleted");
        Ok(deleted)
    }

    /// Remove every student and return what was removed.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<Vec<Student>, ServiceError> {
        let removed = self.repo.delete_all().await?;
        info!(count = removed.len(), "students_deleted_all");
        Ok(removed)
    }
}
