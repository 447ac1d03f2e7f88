//! Migration: Embed personal details columns in the users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column(ColumnDef::new(Users::FirstName).string().null())
                    .add_column(ColumnDef::new(Users::LastName).string().null())
                    .add_column(ColumnDef::new(Users::MiddleNames).json().null())
                    .add_column(
                        ColumnDef::new(Users::DateOfBirth)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // Offset in seconds east of UTC; timestamptz drops it
                    .add_column(ColumnDef::new(Users::DateOfBirthOffset).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Users::FirstName)
                    .drop_column(Users::LastName)
                    .drop_column(Users::MiddleNames)
                    .drop_column(Users::DateOfBirth)
                    .drop_column(Users::DateOfBirthOffset)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    FirstName,
    LastName,
    MiddleNames,
    DateOfBirth,
    DateOfBirthOffset,
}
