//! Create `student` table.
//!
//! Name uniqueness is checked by the service layer, not by a constraint here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::StudentId))
                    .col(string_len_null(Student::FirstName, 50))
                    .col(string_len_null(Student::LastName, 50))
                    .col(date(Student::DateOfBirth))
                    .col(string_len_null(Student::Major, 100))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, StudentId, FirstName, LastName, DateOfBirth, Major }
