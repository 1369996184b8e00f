//! Intern management

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    AccountStatus, DomainError, DomainResult, Intern, InternshipStatus, NewInternRecord, NewUser,
    RepositoryProvider, Role, User,
};

/// An intern together with its backing account
#[derive(Debug, Clone)]
pub struct InternProfile {
    pub user: User,
    pub intern: Intern,
}

#[derive(Debug, Clone)]
pub struct CreateInternRequest {
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateInternRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

pub struct InternService {
    repos: Arc<dyn RepositoryProvider>,
}

impl InternService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create an intern with a pending account. The account has no
    /// password until the intern activates it themselves; user and
    /// intern rows are written atomically.
    pub async fn create(&self, req: CreateInternRequest) -> DomainResult<InternProfile> {
        if self.repos.users().exists_by_email(&req.email).await? {
            return Err(DomainError::DuplicateEmail(req.email));
        }

        let (user, intern) = self
            .repos
            .users()
            .insert_with_intern(
                NewUser {
                    email: req.email,
                    password_hash: None,
                    nom: req.nom,
                    prenom: req.prenom,
                    phone: req.phone,
                    department: req.department.clone(),
                    role: Role::Stagiaire,
                    account_status: AccountStatus::Pending,
                },
                NewInternRecord {
                    encadreur_id: req.encadreur_id,
                    school: req.school,
                    department: req.department,
                    start_date: req.start_date,
                    end_date: req.end_date,
                    status: InternshipStatus::Pending,
                },
            )
            .await?;

        info!(intern_id = intern.id, email = %user.email, "intern created");
        Ok(InternProfile { user, intern })
    }

    pub async fn list(&self) -> DomainResult<Vec<InternProfile>> {
        let interns = self.repos.interns().find_all().await?;
        self.with_users(interns).await
    }

    pub async fn list_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<InternProfile>> {
        let interns = self.repos.interns().find_by_encadreur(encadreur_id).await?;
        self.with_users(interns).await
    }

    pub async fn list_by_department(&self, department: &str) -> DomainResult<Vec<InternProfile>> {
        let interns = self.repos.interns().find_by_department(department).await?;
        self.with_users(interns).await
    }

    pub async fn list_by_status(&self, status: &str) -> DomainResult<Vec<InternProfile>> {
        let status = InternshipStatus::parse(status).ok_or(DomainError::InvalidEnum {
            field: "status",
            value: status.to_string(),
        })?;
        let interns = self.repos.interns().find_by_status(status).await?;
        self.with_users(interns).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<InternProfile> {
        let intern = self
            .repos
            .interns()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Intern", "id", id))?;

        let user = self
            .repos
            .users()
            .find_by_id(intern.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", intern.user_id))?;

        Ok(InternProfile { user, intern })
    }

    /// Update profile fields on both the account and the intern record.
    /// Only the provided fields change; a supervisor link must point at
    /// an existing encadreur.
    pub async fn update(&self, id: i64, req: UpdateInternRequest) -> DomainResult<InternProfile> {
        let mut profile = self.get(id).await?;

        if req.nom.is_some() {
            profile.user.nom = req.nom;
        }
        if req.prenom.is_some() {
            profile.user.prenom = req.prenom;
        }
        if req.phone.is_some() {
            profile.user.phone = req.phone;
        }
        if req.school.is_some() {
            profile.intern.school = req.school;
        }
        if let Some(department) = req.department {
            profile.user.department = Some(department.clone());
            profile.intern.department = Some(department);
        }
        if let Some(encadreur_id) = req.encadreur_id {
            if self
                .repos
                .encadreurs()
                .find_by_id(encadreur_id)
                .await?
                .is_none()
            {
                return Err(DomainError::not_found("Encadreur", "id", encadreur_id));
            }
            profile.intern.encadreur_id = Some(encadreur_id);
        }
        if let Some(raw) = req.start_date.as_deref() {
            profile.intern.start_date = Some(parse_date(raw)?);
        }
        if let Some(raw) = req.end_date.as_deref() {
            profile.intern.end_date = Some(parse_date(raw)?);
        }
        if let Some(raw) = req.status.as_deref() {
            profile.intern.status =
                InternshipStatus::parse(raw).ok_or(DomainError::InvalidEnum {
                    field: "status",
                    value: raw.to_string(),
                })?;
        }
        if req.notes.is_some() {
            profile.intern.notes = req.notes;
        }

        let user = self.repos.users().update(profile.user).await?;
        let intern = self.repos.interns().update(profile.intern).await?;

        Ok(InternProfile { user, intern })
    }

    /// Delete an intern and its backing account.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let profile = self.get(id).await?;
        self.repos.users().delete(profile.user.id).await?;
        info!(intern_id = id, "intern deleted");
        Ok(())
    }

    async fn with_users(&self, interns: Vec<Intern>) -> DomainResult<Vec<InternProfile>> {
        let mut profiles = Vec::with_capacity(interns.len());
        for intern in interns {
            let user = self
                .repos
                .users()
                .find_by_id(intern.user_id)
                .await?
                .ok_or_else(|| DomainError::not_found("User", "id", intern.user_id))?;
            profiles.push(InternProfile { user, intern });
        }
        Ok(profiles)
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountStatus, NewInternRecord, NewUser, Role};
    use crate::infrastructure::storage::InMemoryRepositories;

    async fn seed_intern(repos: &Arc<dyn RepositoryProvider>, email: &str) -> (User, Intern) {
        repos
            .users()
            .insert_with_intern(
                NewUser {
                    email: email.to_string(),
                    password_hash: None,
                    nom: None,
                    prenom: None,
                    phone: None,
                    department: Some("CS".into()),
                    role: Role::Stagiaire,
                    account_status: AccountStatus::Pending,
                },
                NewInternRecord {
                    encadreur_id: None,
                    school: None,
                    department: Some("CS".into()),
                    start_date: None,
                    end_date: None,
                    status: InternshipStatus::Pending,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_inserts_pending_account_and_record() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());

        let profile = svc
            .create(CreateInternRequest {
                email: "sara@acme.org".into(),
                nom: Some("Bennani".into()),
                prenom: None,
                phone: None,
                school: Some("ENSIAS".into()),
                department: Some("CS".into()),
                encadreur_id: None,
                start_date: Some("2026-03-01".parse().unwrap()),
                end_date: None,
            })
            .await
            .unwrap();

        assert_eq!(profile.user.role, Role::Stagiaire);
        assert_eq!(profile.user.account_status, AccountStatus::Pending);
        assert!(profile.user.password_hash.is_none());
        assert_eq!(profile.intern.status, InternshipStatus::Pending);
        assert_eq!(
            profile.intern.start_date,
            Some("2026-03-01".parse().unwrap())
        );

        let duplicate = svc
            .create(CreateInternRequest {
                email: "sara@acme.org".into(),
                nom: None,
                prenom: None,
                phone: None,
                school: None,
                department: None,
                encadreur_id: None,
                start_date: None,
                end_date: None,
            })
            .await;
        assert!(matches!(duplicate, Err(DomainError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn create_with_dangling_encadreur_leaves_no_account_behind() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());

        let attempt = svc
            .create(CreateInternRequest {
                email: "sara@acme.org".into(),
                nom: None,
                prenom: None,
                phone: None,
                school: None,
                department: None,
                encadreur_id: Some(404),
                start_date: None,
                end_date: None,
            })
            .await;
        assert!(matches!(attempt, Err(DomainError::NotFound { .. })));

        assert!(repos
            .users()
            .find_by_email("sara@acme.org")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_by_department_filters_on_the_intern_record() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());
        seed_intern(&repos, "cs@acme.org").await;

        repos
            .users()
            .insert_with_intern(
                NewUser {
                    email: "ee@acme.org".into(),
                    password_hash: None,
                    nom: None,
                    prenom: None,
                    phone: None,
                    department: Some("EE".into()),
                    role: Role::Stagiaire,
                    account_status: AccountStatus::Pending,
                },
                NewInternRecord {
                    encadreur_id: None,
                    school: None,
                    department: Some("EE".into()),
                    start_date: None,
                    end_date: None,
                    status: InternshipStatus::Pending,
                },
            )
            .await
            .unwrap();

        let cs = svc.list_by_department("CS").await.unwrap();
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].user.email, "cs@acme.org");

        assert!(svc.list_by_department("Math").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_update_rejects_unknown_values() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());
        let (_, intern) = seed_intern(&repos, "omar@acme.org").await;

        let attempt = svc
            .update(
                intern.id,
                UpdateInternRequest {
                    status: Some("PAUSED".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(attempt, Err(DomainError::InvalidEnum { .. })));

        let updated = svc
            .update(
                intern.id,
                UpdateInternRequest {
                    status: Some("ACTIVE".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.intern.status, InternshipStatus::Active);
    }

    #[tokio::test]
    async fn update_rejects_dangling_encadreur_link() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());
        let (_, intern) = seed_intern(&repos, "omar@acme.org").await;

        let attempt = svc
            .update(
                intern.id,
                UpdateInternRequest {
                    encadreur_id: Some(404),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(attempt, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_removes_the_backing_account() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = InternService::new(repos.clone());
        let (user, intern) = seed_intern(&repos, "omar@acme.org").await;

        svc.delete(intern.id).await.unwrap();

        assert!(repos.users().find_by_id(user.id).await.unwrap().is_none());
        assert!(repos.interns().find_by_id(intern.id).await.unwrap().is_none());
    }
}
