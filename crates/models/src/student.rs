//! `student` table: the only persisted entity.
//!
//! Column names follow the table schema (`student_id`, `first_name`, ...),
//! JSON names are camelCase (`id`, `firstName`, ...).
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const FIRST_NAME_MAX_LEN: usize = 50;
pub const LAST_NAME_MAX_LEN: usize = 50;
pub const MAJOR_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "student_id")]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Date,
    pub major: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn validate_len(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(ModelError::Validation(format!("{field} must be at most {max} characters")))
        }
        _ => Ok(()),
    }
}

pub fn validate_first_name(v: Option<&str>) -> Result<(), ModelError> {
    validate_len("firstName", v, FIRST_NAME_MAX_LEN)
}

pub fn validate_last_name(v: Option<&str>) -> Result<(), ModelError> {
    validate_len("lastName", v, LAST_NAME_MAX_LEN)
}

pub fn validate_major(v: Option<&str>) -> Result<(), ModelError> {
    validate_len("major", v, MAJOR_MAX_LEN)
}

/// Identifiers are server-assigned and start at 1.
pub fn validate_id(id: i32) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation(format!("invalid student id {id}; must be positive")));
    }
    Ok(())
}

pub fn validate_fields(first_name: Option<&str>, last_name: Option<&str>, major: Option<&str>) -> Result<(), ModelError> {
    validate_first_name(first_name)?;
    validate_last_name(last_name)?;
    validate_major(major)
}

/// Insert a new row; `student_id` is assigned by the store.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    first_name: Option<&str>,
    last_name: Option<&str>,
    date_of_birth: Date,
    major: Option<&str>,
) -> Result<Model, ModelError> {
    validate_fields(first_name, last_name, major)?;
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(first_name.map(str::to_owned)),
        last_name: Set(last_name.map(str::to_owned)),
        date_of_birth: Set(date_of_birth),
        major: Set(major.map(str::to_owned)),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite every mutable column of `existing`; the id is kept.
pub async fn overwrite<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    first_name: Option<&str>,
    last_name: Option<&str>,
    date_of_birth: Date,
    major: Option<&str>,
) -> Result<Model, ModelError> {
    validate_fields(first_name, last_name, major)?;
    let mut am: ActiveModel = existing.into();
    am.first_name = Set(first_name.map(str::to_owned));
    am.last_name = Set(last_name.map(str::to_owned));
    am.date_of_birth = Set(date_of_birth);
    am.major = Set(major.map(str::to_owned));
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
