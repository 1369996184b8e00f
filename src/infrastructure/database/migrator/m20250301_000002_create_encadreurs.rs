//! Migration to create encadreurs table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Encadreurs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Encadreurs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Encadreurs::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Encadreurs::Department)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Encadreurs::Specialization)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Encadreurs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Encadreurs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_encadreurs_user")
                            .from(Encadreurs::Table, Encadreurs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Encadreurs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Encadreurs {
    Table,
    Id,
    UserId,
    Department,
    Specialization,
    CreatedAt,
    UpdatedAt,
}
