//! Encadreur management

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Encadreur, RepositoryProvider, User};

/// An encadreur together with its backing account and the number of
/// interns currently assigned to them
#[derive(Debug, Clone)]
pub struct EncadreurProfile {
    pub user: User,
    pub encadreur: Encadreur,
    pub intern_count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEncadreurRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
}

pub struct EncadreurService {
    repos: Arc<dyn RepositoryProvider>,
}

impl EncadreurService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<EncadreurProfile>> {
        let encadreurs = self.repos.encadreurs().find_all().await?;

        let mut profiles = Vec::with_capacity(encadreurs.len());
        for encadreur in encadreurs {
            profiles.push(self.build_profile(encadreur).await?);
        }
        Ok(profiles)
    }

    pub async fn get(&self, id: i64) -> DomainResult<EncadreurProfile> {
        let encadreur = self
            .repos
            .encadreurs()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Encadreur", "id", id))?;

        self.build_profile(encadreur).await
    }

    /// Update profile fields on both the account and the encadreur
    /// record. Only the provided fields change.
    pub async fn update(&self, id: i64, req: UpdateEncadreurRequest) -> DomainResult<EncadreurProfile> {
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
        if let Some(department) = req.department {
            profile.user.department = Some(department.clone());
            profile.encadreur.department = department;
        }
        if req.specialization.is_some() {
            profile.encadreur.specialization = req.specialization;
        }

        let user = self.repos.users().update(profile.user).await?;
        let encadreur = self.repos.encadreurs().update(profile.encadreur).await?;

        Ok(EncadreurProfile {
            user,
            encadreur,
            intern_count: profile.intern_count,
        })
    }

    /// Delete an encadreur and its backing account. Refused while any
    /// intern is still assigned to them.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        let profile = self.get(id).await?;

        if profile.intern_count > 0 {
            return Err(DomainError::Validation(format!(
                "encadreur {} still supervises {} intern(s)",
                id, profile.intern_count
            )));
        }

        self.repos.users().delete(profile.user.id).await?;
        info!(encadreur_id = id, "encadreur deleted");
        Ok(())
    }

    async fn build_profile(&self, encadreur: Encadreur) -> DomainResult<EncadreurProfile> {
        let user = self
            .repos
            .users()
            .find_by_id(encadreur.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", encadreur.user_id))?;

        let intern_count = self
            .repos
            .interns()
            .find_by_encadreur(encadreur.id)
            .await?
            .len() as u64;

        Ok(EncadreurProfile {
            user,
            encadreur,
            intern_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccountStatus, InternshipStatus, NewEncadreurRecord, NewInternRecord, NewUser, Role,
    };
    use crate::infrastructure::storage::InMemoryRepositories;

    async fn seed_encadreur(repos: &Arc<dyn RepositoryProvider>, email: &str) -> (User, Encadreur) {
        repos
            .users()
            .insert_with_encadreur(
                NewUser {
                    email: email.to_string(),
                    password_hash: None,
                    nom: Some("Alami".into()),
                    prenom: None,
                    phone: None,
                    department: Some("IT".into()),
                    role: Role::Encadreur,
                    account_status: AccountStatus::Pending,
                },
                NewEncadreurRecord {
                    department: "IT".into(),
                    specialization: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn update_touches_both_account_and_record() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = EncadreurService::new(repos.clone());
        let (_, encadreur) = seed_encadreur(&repos, "enc@acme.org").await;

        let updated = svc
            .update(
                encadreur.id,
                UpdateEncadreurRequest {
                    department: Some("R&D".into()),
                    specialization: Some("Embedded".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user.department.as_deref(), Some("R&D"));
        assert_eq!(updated.encadreur.department, "R&D");
        assert_eq!(updated.encadreur.specialization.as_deref(), Some("Embedded"));
        assert_eq!(updated.user.nom.as_deref(), Some("Alami"));
    }

    async fn seed_intern_for(
        repos: &Arc<dyn RepositoryProvider>,
        email: &str,
        encadreur_id: i64,
    ) {
        repos
            .users()
            .insert_with_intern(
                NewUser {
                    email: email.to_string(),
                    password_hash: None,
                    nom: None,
                    prenom: None,
                    phone: None,
                    department: None,
                    role: Role::Stagiaire,
                    account_status: AccountStatus::Pending,
                },
                NewInternRecord {
                    encadreur_id: Some(encadreur_id),
                    school: None,
                    department: None,
                    start_date: None,
                    end_date: None,
                    status: InternshipStatus::Pending,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn profiles_carry_the_supervised_intern_count() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = EncadreurService::new(repos.clone());
        let (_, busy) = seed_encadreur(&repos, "busy@acme.org").await;
        let (_, idle) = seed_encadreur(&repos, "idle@acme.org").await;

        seed_intern_for(&repos, "a@acme.org", busy.id).await;
        seed_intern_for(&repos, "b@acme.org", busy.id).await;

        assert_eq!(svc.get(busy.id).await.unwrap().intern_count, 2);
        assert_eq!(svc.get(idle.id).await.unwrap().intern_count, 0);

        let listed = svc.list().await.unwrap();
        let by_id = |id: i64| listed.iter().find(|p| p.encadreur.id == id).unwrap();
        assert_eq!(by_id(busy.id).intern_count, 2);
        assert_eq!(by_id(idle.id).intern_count, 0);
    }

    #[tokio::test]
    async fn delete_is_refused_while_interns_are_assigned() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = EncadreurService::new(repos.clone());
        let (_, encadreur) = seed_encadreur(&repos, "enc@acme.org").await;

        repos
            .users()
            .insert_with_intern(
                NewUser {
                    email: "intern@acme.org".into(),
                    password_hash: None,
                    nom: None,
                    prenom: None,
                    phone: None,
                    department: None,
                    role: Role::Stagiaire,
                    account_status: AccountStatus::Pending,
                },
                NewInternRecord {
                    encadreur_id: Some(encadreur.id),
                    school: None,
                    department: None,
                    start_date: None,
                    end_date: None,
                    status: InternshipStatus::Pending,
                },
            )
            .await
            .unwrap();

        let attempt = svc.delete(encadreur.id).await;
        assert!(matches!(attempt, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_removes_the_backing_account() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = EncadreurService::new(repos.clone());
        let (user, encadreur) = seed_encadreur(&repos, "enc@acme.org").await;

        svc.delete(encadreur.id).await.unwrap();

        assert!(repos.users().find_by_id(user.id).await.unwrap().is_none());
        assert!(repos
            .encadreurs()
            .find_by_id(encadreur.id)
            .await
            .unwrap()
            .is_none());
    }
}
