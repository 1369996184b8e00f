//! Project management

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewProject, Project, ProjectStatus, RepositoryProvider,
};

#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub encadreur_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i32>,
    pub department: Option<String>,
}

pub struct ProjectService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProjectService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Project>> {
        self.repos.projects().find_all().await
    }

    pub async fn list_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Project>> {
        self.repos.projects().find_by_encadreur(encadreur_id).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Project> {
        self.repos
            .projects()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", "id", id))
    }

    pub async fn create(&self, req: CreateProjectRequest) -> DomainResult<Project> {
        if let Some(encadreur_id) = req.encadreur_id {
            self.ensure_encadreur(encadreur_id).await?;
        }

        let status = match req.status.as_deref() {
            None => ProjectStatus::Planning,
            Some(raw) => parse_status(raw)?,
        };
        let progress = validate_progress(req.progress.unwrap_or(0))?;

        let project = self
            .repos
            .projects()
            .insert(NewProject {
                title: req.title,
                description: req.description,
                encadreur_id: req.encadreur_id,
                start_date: parse_date_opt(req.start_date.as_deref())?,
                end_date: parse_date_opt(req.end_date.as_deref())?,
                status,
                progress,
                department: req.department,
            })
            .await?;

        info!(project_id = project.id, "project created");
        Ok(project)
    }

    pub async fn update(&self, id: i64, req: UpdateProjectRequest) -> DomainResult<Project> {
        let mut project = self.get(id).await?;

        if let Some(title) = req.title {
            project.title = title;
        }
        if req.description.is_some() {
            project.description = req.description;
        }
        if let Some(encadreur_id) = req.encadreur_id {
            self.ensure_encadreur(encadreur_id).await?;
            project.encadreur_id = Some(encadreur_id);
        }
        if let Some(raw) = req.start_date.as_deref() {
            project.start_date = Some(parse_date(raw)?);
        }
        if let Some(raw) = req.end_date.as_deref() {
            project.end_date = Some(parse_date(raw)?);
        }
        if let Some(raw) = req.status.as_deref() {
            project.status = parse_status(raw)?;
        }
        if let Some(progress) = req.progress {
            project.progress = Some(validate_progress(progress)?);
        }
        if req.department.is_some() {
            project.department = req.department;
        }

        self.repos.projects().update(project).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repos.projects().delete(id).await?;
        info!(project_id = id, "project deleted");
        Ok(())
    }

    /// Replace the project's intern assignment set. Every referenced
    /// intern must exist; interns no longer in the set are detached.
    pub async fn assign_interns(&self, id: i64, intern_ids: Vec<i64>) -> DomainResult<Project> {
        let project = self.get(id).await?;

        for intern_id in &intern_ids {
            if self.repos.interns().find_by_id(*intern_id).await?.is_none() {
                return Err(DomainError::not_found("Intern", "id", *intern_id));
            }
        }

        let current = self.repos.interns().find_by_project(id).await?;
        for intern in current {
            if !intern_ids.contains(&intern.id) {
                self.repos.interns().set_project(intern.id, None).await?;
            }
        }
        for intern_id in intern_ids {
            self.repos.interns().set_project(intern_id, Some(id)).await?;
        }

        info!(project_id = id, "project assignment set replaced");
        Ok(project)
    }
}

impl ProjectService {
    async fn ensure_encadreur(&self, encadreur_id: i64) -> DomainResult<()> {
        if self
            .repos
            .encadreurs()
            .find_by_id(encadreur_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Encadreur", "id", encadreur_id));
        }
        Ok(())
    }
}

fn parse_status(raw: &str) -> DomainResult<ProjectStatus> {
    ProjectStatus::parse(raw).ok_or(DomainError::InvalidEnum {
        field: "status",
        value: raw.to_string(),
    })
}

fn validate_progress(progress: i32) -> DomainResult<i32> {
    if (0..=100).contains(&progress) {
        Ok(progress)
    } else {
        Err(DomainError::Validation(format!(
            "progress must be between 0 and 100, got {progress}"
        )))
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

fn parse_date_opt(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(s).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountStatus, InternshipStatus, NewInternRecord, NewUser, Role};
    use crate::infrastructure::storage::InMemoryRepositories;

    fn create_request(title: &str) -> CreateProjectRequest {
        CreateProjectRequest {
            title: title.to_string(),
            description: None,
            encadreur_id: None,
            start_date: None,
            end_date: None,
            status: None,
            progress: None,
            department: None,
        }
    }

    async fn seed_intern(repos: &Arc<dyn RepositoryProvider>, email: &str) -> i64 {
        let (_, intern) = repos
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
                    encadreur_id: None,
                    school: None,
                    department: None,
                    start_date: None,
                    end_date: None,
                    status: InternshipStatus::Pending,
                },
            )
            .await
            .unwrap();
        intern.id
    }

    #[tokio::test]
    async fn create_defaults_to_planning_with_zero_progress() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = ProjectService::new(repos);

        let project = svc.create(create_request("Portal")).await.unwrap();
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.progress, Some(0));
    }

    #[tokio::test]
    async fn progress_outside_the_scale_is_rejected() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = ProjectService::new(repos);
        let project = svc.create(create_request("Portal")).await.unwrap();

        let attempt = svc
            .update(
                project.id,
                UpdateProjectRequest {
                    progress: Some(120),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(attempt, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn assign_interns_replaces_the_whole_set() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = ProjectService::new(repos.clone());
        let project = svc.create(create_request("Portal")).await.unwrap();

        let a = seed_intern(&repos, "a@acme.org").await;
        let b = seed_intern(&repos, "b@acme.org").await;

        svc.assign_interns(project.id, vec![a]).await.unwrap();
        svc.assign_interns(project.id, vec![b]).await.unwrap();

        let assigned = repos.interns().find_by_project(project.id).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id, b);

        let detached = repos.interns().find_by_id(a).await.unwrap().unwrap();
        assert_eq!(detached.project_id, None);
    }

    #[tokio::test]
    async fn assign_interns_rejects_unknown_ids_without_partial_effect() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let svc = ProjectService::new(repos.clone());
        let project = svc.create(create_request("Portal")).await.unwrap();
        let a = seed_intern(&repos, "a@acme.org").await;

        let attempt = svc.assign_interns(project.id, vec![a, 404]).await;
        assert!(matches!(attempt, Err(DomainError::NotFound { .. })));

        let assigned = repos.interns().find_by_project(project.id).await.unwrap();
        assert!(assigned.is_empty());
    }
}
