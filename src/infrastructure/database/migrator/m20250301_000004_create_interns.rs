//! Migration to create interns table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000002_create_encadreurs::Encadreurs;
use super::m20250301_000003_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Interns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Interns::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Interns::EncadreurId).big_integer().null())
                    .col(ColumnDef::new(Interns::ProjectId).big_integer().null())
                    .col(ColumnDef::new(Interns::School).string_len(255).null())
                    .col(ColumnDef::new(Interns::Department).string_len(100).null())
                    .col(ColumnDef::new(Interns::StartDate).date().null())
                    .col(ColumnDef::new(Interns::EndDate).date().null())
                    .col(
                        ColumnDef::new(Interns::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Interns::Cv).string_len(255).null())
                    .col(ColumnDef::new(Interns::Notes).text().null())
                    .col(
                        ColumnDef::new(Interns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Interns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interns_user")
                            .from(Interns::Table, Interns::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interns_encadreur")
                            .from(Interns::Table, Interns::EncadreurId)
                            .to(Encadreurs::Table, Encadreurs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interns_project")
                            .from(Interns::Table, Interns::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_interns_encadreur")
                    .table(Interns::Table)
                    .col(Interns::EncadreurId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_interns_project")
                    .table(Interns::Table)
                    .col(Interns::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Interns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Interns {
    Table,
    Id,
    UserId,
    EncadreurId,
    ProjectId,
    School,
    Department,
    StartDate,
    EndDate,
    Status,
    Cv,
    Notes,
    CreatedAt,
    UpdatedAt,
}
