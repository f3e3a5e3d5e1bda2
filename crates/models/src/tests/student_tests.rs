use crate::errors::ModelError;
use crate::student;
use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};

async fn setup_sqlite() -> Result<DatabaseConnection> {
    // one connection: every sqlite::memory: connection is a separate database
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

#[test]
fn validate_id_rejects_non_positive() {
    assert!(student::validate_id(1).is_ok());
    assert!(matches!(student::validate_id(0), Err(ModelError::Validation(_))));
    assert!(matches!(student::validate_id(-7), Err(ModelError::Validation(_))));
}

#[test]
fn name_length_limits_count_characters() {
    let fifty = "a".repeat(50);
    assert!(student::validate_first_name(Some(&fifty)).is_ok());
    assert!(student::validate_first_name(Some(&"a".repeat(51))).is_err());
    // 50 multi-byte characters are still 50 characters
    assert!(student::validate_last_name(Some(&"é".repeat(50))).is_ok());
    assert!(student::validate_major(Some(&"m".repeat(100))).is_ok());
    assert!(student::validate_major(Some(&"m".repeat(101))).is_err());
    assert!(student::validate_fields(None, None, None).is_ok());
}

#[test]
fn model_serializes_camel_case() {
    let m = student::Model {
        id: 1,
        first_name: Some("Ann".into()),
        last_name: Some("Lee".into()),
        date_of_birth: dob(),
        major: None,
    };
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["firstName"], "Ann");
    assert_eq!(json["lastName"], "Lee");
    assert_eq!(json["dateOfBirth"], "2000-01-01");
    assert!(json["major"].is_null());
}

#[tokio::test]
async fn create_assigns_id_and_persists() -> Result<()> {
    let db = setup_sqlite().await?;

    let created = student::create(&db, Some("Ann"), Some("Lee"), dob(), Some("CS")).await?;
    assert!(created.id > 0);
    assert_eq!(created.first_name.as_deref(), Some("Ann"));

    let found = student::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    let second = student::create(&db, None, None, dob(), None).await?;
    assert!(second.id > created.id);
    Ok(())
}

#[tokio::test]
async fn create_rejects_long_names_without_writing() -> Result<()> {
    let db = setup_sqlite().await?;
    let long = "x".repeat(51);
    let res = student::create(&db, Some(&long), Some("Lee"), dob(), None).await;
    assert!(matches!(res, Err(ModelError::Validation(_))));
    assert!(student::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn overwrite_replaces_fields_and_keeps_id() -> Result<()> {
    let db = setup_sqlite().await?;
    let created = student::create(&db, Some("Ann"), Some("Lee"), dob(), Some("CS")).await?;
    let new_dob = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();

    let updated = student::overwrite(&db, created.clone(), Some("Anna"), None, new_dob, Some("Math")).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name.as_deref(), Some("Anna"));
    assert_eq!(updated.last_name, None);
    assert_eq!(updated.date_of_birth, new_dob);
    assert_eq!(updated.major.as_deref(), Some("Math"));

    let found = student::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(updated));
    Ok(())
}
