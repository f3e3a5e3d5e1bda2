use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait};

use models::student::{self, Entity as StudentEntity};
use crate::errors::ServiceError;
use crate::student::domain::{SearchFilter, StudentInput};

/// List every student ordered by id.
pub async fn list_students(db: &DatabaseConnection) -> Result<Vec<student::Model>, ServiceError> {
    let rows = StudentEntity::find()
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Get a student by id.
pub async fn get_student(db: &DatabaseConnection, id: i32) -> Result<Option<student::Model>, ServiceError> {
    let found = StudentEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Exact, case-sensitive match on each supplied filter.
pub async fn search_students(db: &DatabaseConnection, filter: &SearchFilter) -> Result<Vec<student::Model>, ServiceError> {
    let mut finder = StudentEntity::find();
    if let Some(v) = &filter.first_name { finder = finder.filter(student::Column::FirstName.eq(v.as_str())); }
    if let Some(v) = &filter.last_name { finder = finder.filter(student::Column::LastName.eq(v.as_str())); }
    if let Some(v) = &filter.major { finder = finder.filter(student::Column::Major.eq(v.as_str())); }
    let rows = finder
        .order_by_asc(student::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Case-insensitive match on both name columns. The store folds both sides
/// with `lower()`, so the comparison uses one case mapping. NULL columns never match.
pub async fn exists_by_full_name(db: &DatabaseConnection, first_name: &str, last_name: &str) -> Result<bool, ServiceError> {
    let count = StudentEntity::find()
        .filter(Expr::expr(Func::lower(Expr::col(student::Column::FirstName))).eq(Func::lower(Expr::val(first_name))))
        .filter(Expr::expr(Func::lower(Expr::col(student::Column::LastName))).eq(Func::lower(Expr::val(last_name))))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(count > 0)
}

/// Insert one student after field validation.
pub async fn insert_student(db: &DatabaseConnection, input: &StudentInput) -> Result<student::Model, ServiceError> {
    let created = student::create(
        db,
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        input.date_of_birth,
        input.major.as_deref(),
    )
    .await?;
    Ok(created)
}

/// Insert a batch in one transaction; any failure rolls back the whole batch.
pub async fn insert_students(db: &DatabaseConnection, inputs: &[StudentInput]) -> Result<Vec<student::Model>, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        // dropping `txn` on early return rolls it back
        let m = student::create(
            &txn,
            input.first_name.as_deref(),
            input.last_name.as_deref(),
            input.date_of_birth,
            input.major.as_deref(),
        )
        .await?;
        created.push(m);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created)
}

/// Overwrite all mutable fields of an existing student. `None` if the id is unknown.
pub async fn update_student(db: &DatabaseConnection, id: i32, input: &StudentInput) -> Result<Option<student::Model>, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = StudentEntity::find_by_id(id).one(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(None); };
    let updated = student::overwrite(
        &txn,
        existing,
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        input.date_of_birth,
        input.major.as_deref(),
    )
    .await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Delete a student and return the removed row. `None` if the id is unknown.
pub async fn delete_student(db: &DatabaseConnection, id: i32) -> Result<Option<student::Model>, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let current = StudentEntity::find_by_id(id).one(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Ok(None); };
    StudentEntity::delete_by_id(id).exec(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Some(existing))
}

/// Delete every student and return the rows that were removed.
pub async fn delete_all_students(db: &DatabaseConnection) -> Result<Vec<student::Model>, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let rows = StudentEntity::find()
        .order_by_asc(student::Column::Id)
        .all(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if !rows.is_empty() {
        let ids: Vec<i32> = rows.iter().map(|s| s.id).collect();
        StudentEntity::delete_many()
            .filter(student::Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sqlite_db;
    use chrono::NaiveDate;

    fn input(first: &str, last: &str, major: Option<&str>) -> StudentInput {
        StudentInput::new(first, last, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), major)
    }

    #[tokio::test]
    async fn student_crud_store() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;

        let a = insert_student(&db, &input("Ann", "Lee", Some("CS"))).await?;
        let found = get_student(&db, a.id).await?.unwrap();
        assert_eq!(found, a);

        let updated = update_student(&db, a.id, &input("Anna", "Lee", Some("Math"))).await?.unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.first_name.as_deref(), Some("Anna"));
        assert_eq!(updated.major.as_deref(), Some("Math"));

        assert!(update_student(&db, a.id + 100, &input("X", "Y", None)).await?.is_none());

        let deleted = delete_student(&db, a.id).await?.unwrap();
        assert_eq!(deleted, updated);
        assert!(get_student(&db, a.id).await?.is_none());
        assert!(delete_student(&db, a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn full_name_lookup_ignores_case() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        insert_student(&db, &input("Ann", "Lee", None)).await?;

        assert!(exists_by_full_name(&db, "ann", "LEE").await?);
        assert!(exists_by_full_name(&db, "ANN", "lee").await?);
        assert!(!exists_by_full_name(&db, "Ann", "Li").await?);
        assert!(!exists_by_full_name(&db, "", "").await?);
        Ok(())
    }

    #[tokio::test]
    async fn full_name_lookup_finds_exact_non_ascii_repeat() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        insert_student(&db, &input("Émile", "Zola", None)).await?;
        insert_student(&db, &input("Σοφοκλής", "Ἀθηναῖος", None)).await?;

        assert!(exists_by_full_name(&db, "Émile", "Zola").await?);
        assert!(exists_by_full_name(&db, "Σοφοκλής", "Ἀθηναῖος").await?);
        assert!(exists_by_full_name(&db, "Émile", "ZOLA").await?);
        assert!(!exists_by_full_name(&db, "Emile", "Zola").await?);
        Ok(())
    }

    #[tokio::test]
    async fn full_name_index_folds_case() -> Result<(), anyhow::Error> {
        use sea_orm::{ConnectionTrait, DbBackend, Statement};

        let db = sqlite_db().await?;
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT sql FROM sqlite_master WHERE type = 'index' AND name = 'idx_student_full_name'",
            ))
            .await?
            .expect("full name index exists");
        let sql: String = row.try_get("", "sql")?;
        assert!(sql.contains("lower(last_name)"), "{}", sql);
        assert!(sql.contains("lower(first_name)"), "{}", sql);
        Ok(())
    }

    #[tokio::test]
    async fn search_applies_only_supplied_filters() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        let a = insert_student(&db, &input("Ann", "Lee", Some("CS"))).await?;
        let b = insert_student(&db, &input("Bob", "Lee", Some("Math"))).await?;
        let _c = insert_student(&db, &input("ann", "Ray", Some("CS"))).await?;

        let all = search_students(&db, &SearchFilter::default()).await?;
        assert_eq!(all, list_students(&db).await?);
        assert_eq!(all.len(), 3);

        let by_first = search_students(&db, &SearchFilter { first_name: Some("Ann".into()), ..Default::default() }).await?;
        assert_eq!(by_first, vec![a.clone()]);

        let by_last = search_students(&db, &SearchFilter { last_name: Some("Lee".into()), ..Default::default() }).await?;
        assert_eq!(by_last, vec![a.clone(), b.clone()]);

        let combined = search_students(&db, &SearchFilter { last_name: Some("Lee".into()), major: Some("Math".into()), ..Default::default() }).await?;
        assert_eq!(combined, vec![b]);

        let none = search_students(&db, &SearchFilter { major: Some("Art".into()), ..Default::default() }).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn batch_insert_is_all_or_nothing() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        let ok = insert_students(&db, &[input("Ann", "Lee", None), input("Bob", "Ray", None)]).await?;
        assert_eq!(ok.len(), 2);
        assert!(ok[0].id < ok[1].id);

        // second row fails validation inside the transaction
        let mut bad = input("Cat", "Fox", None);
        bad.major = Some("m".repeat(101));
        let res = insert_students(&db, &[input("Dan", "Oak", None), bad]).await;
        assert!(res.is_err());
        assert_eq!(list_students(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_returns_removed_rows() -> Result<(), anyhow::Error> {
        let db = sqlite_db().await?;
        assert!(delete_all_students(&db).await?.is_empty());

        insert_students(&db, &[input("Ann", "Lee", None), input("Bob", "Ray", None), input("Cy", "Oak", None)]).await?;
        let before = list_students(&db).await?;
        let removed = delete_all_students(&db).await?;
        assert_eq!(removed, before);
        assert!(list_students(&db).await?.is_empty());
        Ok(())
    }
}
