use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

use crate::domain::{
    AccountStatus, DomainError, DomainResult, Encadreur, Intern, NewEncadreurRecord,
    NewInternRecord, NewUser, Role, User, UserRepository,
};
use crate::infrastructure::database::entities::{encadreur, intern, user};

use super::encadreur_repository::encadreur_model_to_domain;
use super::intern_repository::intern_model_to_domain;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn entity_role_to_domain(role: user::UserRole) -> Role {
    match role {
        user::UserRole::Admin => Role::Admin,
        user::UserRole::Encadreur => Role::Encadreur,
        user::UserRole::Stagiaire => Role::Stagiaire,
    }
}

pub(super) fn domain_role_to_entity(role: Role) -> user::UserRole {
    match role {
        Role::Admin => user::UserRole::Admin,
        Role::Encadreur => user::UserRole::Encadreur,
        Role::Stagiaire => user::UserRole::Stagiaire,
    }
}

fn entity_status_to_domain(status: user::AccountStatus) -> AccountStatus {
    match status {
        user::AccountStatus::Active => AccountStatus::Active,
        user::AccountStatus::Pending => AccountStatus::Pending,
        user::AccountStatus::Suspended => AccountStatus::Suspended,
    }
}

fn domain_status_to_entity(status: AccountStatus) -> user::AccountStatus {
    match status {
        AccountStatus::Active => user::AccountStatus::Active,
        AccountStatus::Pending => user::AccountStatus::Pending,
        AccountStatus::Suspended => user::AccountStatus::Suspended,
    }
}

pub(super) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        nom: model.nom,
        prenom: model.prenom,
        phone: model.phone,
        department: model.department,
        avatar: model.avatar,
        role: entity_role_to_domain(model.role),
        account_status: entity_status_to_domain(model.account_status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn new_user_active_model(dto: NewUser) -> user::ActiveModel {
    let now = Utc::now();
    user::ActiveModel {
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        nom: Set(dto.nom),
        prenom: Set(dto.prenom),
        phone: Set(dto.phone),
        department: Set(dto.department),
        avatar: Set(None),
        role: Set(domain_role_to_entity(dto.role)),
        account_status: Set(domain_status_to_entity(dto.account_status)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn insert_err(email: &str) -> impl FnOnce(sea_orm::DbErr) -> DomainError + '_ {
    move |e| {
        if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
            DomainError::DuplicateEmail(email.to_string())
        } else {
            db_err(e)
        }
    }
}

async fn insert_user_txn(txn: &DatabaseTransaction, dto: NewUser) -> DomainResult<User> {
    let email = dto.email.clone();
    let model = new_user_active_model(dto)
        .insert(txn)
        .await
        .map_err(insert_err(&email))?;
    Ok(user_model_to_domain(model))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn find_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Role.eq(domain_role_to_entity(role)))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find().all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn insert(&self, dto: NewUser) -> DomainResult<User> {
        let email = dto.email.clone();
        let model = new_user_active_model(dto)
            .insert(&self.db)
            .await
            .map_err(insert_err(&email))?;

        Ok(user_model_to_domain(model))
    }

    async fn insert_with_encadreur(
        &self,
        dto: NewUser,
        record: NewEncadreurRecord,
    ) -> DomainResult<(User, Encadreur)> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let user = insert_user_txn(&txn, dto).await?;

        let now = Utc::now();
        let encadreur_model = encadreur::ActiveModel {
            user_id: Set(user.id),
            department: Set(record.department),
            specialization: Set(record.specialization),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok((user, encadreur_model_to_domain(encadreur_model)))
    }

    async fn insert_with_intern(
        &self,
        dto: NewUser,
        record: NewInternRecord,
    ) -> DomainResult<(User, Intern)> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let user = insert_user_txn(&txn, dto).await?;

        // Resolve the encadreur reference inside the transaction so a
        // dangling id rolls the user insert back with it.
        if let Some(encadreur_id) = record.encadreur_id {
            let exists = encadreur::Entity::find_by_id(encadreur_id)
                .one(&txn)
                .await
                .map_err(db_err)?;
            if exists.is_none() {
                return Err(DomainError::not_found("Encadreur", "id", encadreur_id));
            }
        }

        let now = Utc::now();
        let intern_model = intern::ActiveModel {
            user_id: Set(user.id),
            encadreur_id: Set(record.encadreur_id),
            project_id: Set(None),
            school: Set(record.school),
            department: Set(record.department),
            start_date: Set(record.start_date),
            end_date: Set(record.end_date),
            status: Set(super::intern_repository::domain_intern_status_to_entity(
                record.status,
            )),
            cv: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok((user, intern_model_to_domain(intern_model)))
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let active = user::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash),
            nom: Set(user.nom),
            prenom: Set(user.prenom),
            phone: Set(user.phone),
            department: Set(user.department),
            avatar: Set(user.avatar),
            role: Set(domain_role_to_entity(user.role)),
            account_status: Set(domain_status_to_entity(user.account_status)),
            created_at: Set(user.created_at),
            updated_at: Set(Utc::now()),
        };

        let updated = active
            .update(&self.db)
            .await
            .map_err(insert_err(&user.email))?;

        Ok(user_model_to_domain(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }

        Ok(())
    }
}
