use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: case-insensitive full-name lookup (duplicate pre-check).
        // Expression index so `lower(col) = lower(?)` can use it; same SQL on Postgres and SQLite.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_student_full_name ON student (lower(last_name), lower(first_name))",
            )
            .await?;

        // Student: search by major
        manager
            .create_index(
                Index::create()
                    .name("idx_student_major")
                    .table(Student::Table)
                    .col(Student::Major)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_major").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_full_name").table(Student::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Major }
