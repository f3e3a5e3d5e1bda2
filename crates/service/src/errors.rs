use thiserror::Error;

use crate::student::domain::FullName;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate record: {}", join_names(.0))]
    Duplicate(Vec<FullName>),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn student_not_found(id: i32) -> Self { Self::NotFound(format!("student with id {id} not found")) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Duplicate(_) => 1002,
            ServiceError::Db(_) | ServiceError::Model(_) => 1200,
        }
    }
}

fn join_names(names: &[FullName]) -> String {
    names.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
