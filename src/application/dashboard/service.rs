//! Role-scoped dashboard aggregation
//!
//! Pure read-side computation over the repositories. Every call takes a
//! fresh snapshot; nothing is cached or mutated, and concurrent writes
//! may produce a torn snapshot, which is accepted.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    DomainError, DomainResult, Project, ProjectStatus, RepositoryProvider, Role, TaskStatus,
};

/// Scope a metrics computation runs under, resolved from the caller's
/// role. Closed set so a new role cannot silently fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    Admin,
    /// Supervising encadreur, by encadreur record id
    Encadreur(i64),
    /// Intern, by intern record id
    Stagiaire(i64),
}

/// Headline metrics for the dashboard.
///
/// The fields are reinterpreted per scope: for a stagiaire,
/// `total_interns` holds the number of projects the intern belongs to
/// and `completed_tasks` holds completed projects; for an encadreur,
/// `completed_tasks` holds that encadreur's completed projects.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub total_interns: u64,
    pub active_projects: u64,
    pub completed_tasks: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentStats {
    pub department: String,
    pub intern_count: u64,
    pub project_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectStatusStats {
    pub todo_count: u64,
    pub in_progress_count: u64,
    pub done_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskStats {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub overdue_tasks: u64,
    pub tasks_by_priority: HashMap<String, u64>,
}

pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Resolve the caller's role into a [`DashboardScope`].
    ///
    /// Encadreur and stagiaire callers must have their paired role
    /// record; a missing record is a `NotFound`.
    pub async fn resolve_scope(&self, user_id: i64) -> DomainResult<DashboardScope> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;

        match user.role {
            Role::Admin => Ok(DashboardScope::Admin),
            Role::Encadreur => {
                let encadreur = self
                    .repos
                    .encadreurs()
                    .find_by_user_id(user.id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Encadreur", "user_id", user.id))?;
                Ok(DashboardScope::Encadreur(encadreur.id))
            }
            Role::Stagiaire => {
                let intern = self
                    .repos
                    .interns()
                    .find_by_user_id(user.id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Intern", "user_id", user.id))?;
                Ok(DashboardScope::Stagiaire(intern.id))
            }
        }
    }

    pub async fn get_metrics(&self, user_id: i64) -> DomainResult<DashboardMetrics> {
        match self.resolve_scope(user_id).await? {
            DashboardScope::Admin => self.admin_metrics().await,
            DashboardScope::Encadreur(id) => self.encadreur_metrics(id).await,
            DashboardScope::Stagiaire(id) => self.stagiaire_metrics(id).await,
        }
    }

    async fn admin_metrics(&self) -> DomainResult<DashboardMetrics> {
        let total_interns = self.repos.interns().count().await?;
        let projects = self.repos.projects().find_all().await?;
        let completed_tasks = self.repos.tasks().find_by_status(TaskStatus::Done).await?.len() as u64;

        let active_projects = count_status(&projects, ProjectStatus::InProgress);
        let completed_projects = count_status(&projects, ProjectStatus::Completed);

        Ok(DashboardMetrics {
            total_interns,
            active_projects,
            completed_tasks,
            success_rate: ratio(completed_projects, projects.len() as u64),
        })
    }

    /// Encadreur scope: restricted to this encadreur's interns, and to
    /// projects that have at least one of those interns assigned. The
    /// `completed_tasks` field carries completed projects here.
    async fn encadreur_metrics(&self, encadreur_id: i64) -> DomainResult<DashboardMetrics> {
        let interns = self.repos.interns().find_by_encadreur(encadreur_id).await?;

        let mut project_ids: Vec<i64> = interns.iter().filter_map(|i| i.project_id).collect();
        project_ids.sort_unstable();
        project_ids.dedup();

        let projects = self.repos.projects().find_all().await?;
        let supervised: Vec<&Project> = projects
            .iter()
            .filter(|p| project_ids.binary_search(&p.id).is_ok())
            .collect();

        let active_projects = supervised
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count() as u64;
        let completed_projects = supervised
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count() as u64;

        Ok(DashboardMetrics {
            total_interns: interns.len() as u64,
            active_projects,
            completed_tasks: completed_projects,
            success_rate: ratio(completed_projects, supervised.len() as u64),
        })
    }

    /// Stagiaire scope: the fields are repurposed. `total_interns` is
    /// the number of projects the intern belongs to, `completed_tasks`
    /// the completed ones, and `success_rate` the mean project progress
    /// with missing progress counted as zero.
    async fn stagiaire_metrics(&self, intern_id: i64) -> DomainResult<DashboardMetrics> {
        let projects = self.repos.projects().find_by_intern(intern_id).await?;

        let active = count_status(&projects, ProjectStatus::InProgress);
        let completed = count_status(&projects, ProjectStatus::Completed);

        let success_rate = if projects.is_empty() {
            0.0
        } else {
            let total_progress: i64 = projects
                .iter()
                .map(|p| i64::from(p.progress.unwrap_or(0)))
                .sum();
            total_progress as f64 / projects.len() as f64
        };

        Ok(DashboardMetrics {
            total_interns: projects.len() as u64,
            active_projects: active,
            completed_tasks: completed,
            success_rate,
        })
    }

    /// Per-department intern and project-participation counts.
    ///
    /// `project_count` counts project participation keyed by the
    /// intern's own department, not by the project's department field.
    /// A department present on only one side reports zero on the other.
    pub async fn get_department_stats(&self) -> DomainResult<Vec<DepartmentStats>> {
        let interns = self.repos.interns().find_all().await?;

        let mut intern_counts: BTreeMap<String, u64> = BTreeMap::new();
        for intern in &interns {
            if let Some(dept) = intern.department.as_deref() {
                *intern_counts.entry(dept.to_string()).or_default() += 1;
            }
        }

        let mut project_counts: BTreeMap<String, u64> = BTreeMap::new();
        for intern in &interns {
            if intern.project_id.is_some() {
                if let Some(dept) = intern.department.as_deref() {
                    *project_counts.entry(dept.to_string()).or_default() += 1;
                }
            }
        }

        let mut departments: Vec<String> = intern_counts.keys().cloned().collect();
        for dept in project_counts.keys() {
            if !departments.contains(dept) {
                departments.push(dept.clone());
            }
        }

        Ok(departments
            .into_iter()
            .map(|department| {
                let intern_count = intern_counts.get(&department).copied().unwrap_or(0);
                let project_count = project_counts.get(&department).copied().unwrap_or(0);
                DepartmentStats {
                    department,
                    intern_count,
                    project_count,
                }
            })
            .collect())
    }

    /// Project counts by status. ON_BUG projects fall in no bucket.
    pub async fn get_project_status_stats(&self) -> DomainResult<ProjectStatusStats> {
        let projects = self.repos.projects().find_all().await?;

        Ok(ProjectStatusStats {
            todo_count: count_status(&projects, ProjectStatus::Planning),
            in_progress_count: count_status(&projects, ProjectStatus::InProgress),
            done_count: count_status(&projects, ProjectStatus::Completed),
        })
    }

    pub async fn get_task_stats(&self) -> DomainResult<TaskStats> {
        let tasks = self.repos.tasks().find_all().await?;
        let today = Utc::now().date_naive();

        let total_tasks = tasks.len() as u64;
        let completed_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count() as u64;
        let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(today)).count() as u64;

        let mut tasks_by_priority: HashMap<String, u64> = HashMap::new();
        for task in &tasks {
            *tasks_by_priority
                .entry(task.priority.as_str().to_string())
                .or_default() += 1;
        }

        Ok(TaskStats {
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            overdue_tasks,
            tasks_by_priority,
        })
    }
}

fn count_status(projects: &[Project], status: ProjectStatus) -> u64 {
    projects.iter().filter(|p| p.status == status).count() as u64
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::{
        AccountStatus, InternshipStatus, NewEncadreurRecord, NewInternRecord, NewProject, NewTask,
        NewUser, TaskPriority, UserRepository,
    };
    use crate::infrastructure::storage::InMemoryRepositories;

    fn repos() -> Arc<dyn RepositoryProvider> {
        Arc::new(InMemoryRepositories::new())
    }

    fn pending_user(email: &str, role: Role, department: Option<&str>) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: None,
            nom: None,
            prenom: None,
            phone: None,
            department: department.map(str::to_string),
            role,
            account_status: AccountStatus::Pending,
        }
    }

    fn intern_record(encadreur_id: Option<i64>, department: &str) -> NewInternRecord {
        NewInternRecord {
            encadreur_id,
            school: None,
            department: Some(department.to_string()),
            start_date: None,
            end_date: None,
            status: InternshipStatus::Active,
        }
    }

    fn project(title: &str, status: ProjectStatus, progress: i32) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: None,
            encadreur_id: None,
            start_date: None,
            end_date: None,
            status,
            progress,
            department: None,
        }
    }

    fn task(status: TaskStatus, priority: TaskPriority, due_in_days: Option<i64>) -> NewTask {
        NewTask {
            title: "t".into(),
            description: None,
            project_id: None,
            assigned_to: None,
            status,
            priority,
            due_date: due_in_days.map(|d| (Utc::now() + Duration::days(d)).date_naive()),
        }
    }

    async fn add_stagiaire(
        users: &dyn UserRepository,
        email: &str,
        encadreur_id: Option<i64>,
        department: &str,
    ) -> i64 {
        let (_, intern) = users
            .insert_with_intern(
                pending_user(email, Role::Stagiaire, Some(department)),
                intern_record(encadreur_id, department),
            )
            .await
            .unwrap();
        intern.id
    }

    #[tokio::test]
    async fn admin_metrics_cover_the_whole_store() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        let admin = repos
            .users()
            .insert(NewUser {
                account_status: AccountStatus::Active,
                password_hash: Some("digest".into()),
                ..pending_user("admin@acme.org", Role::Admin, None)
            })
            .await
            .unwrap();

        add_stagiaire(repos.users(), "a@acme.org", None, "CS").await;
        add_stagiaire(repos.users(), "b@acme.org", None, "CS").await;

        repos
            .projects()
            .insert(project("p1", ProjectStatus::InProgress, 40))
            .await
            .unwrap();
        repos
            .projects()
            .insert(project("p2", ProjectStatus::Completed, 100))
            .await
            .unwrap();
        repos
            .tasks()
            .insert(task(TaskStatus::Done, TaskPriority::High, None))
            .await
            .unwrap();

        let metrics = svc.get_metrics(admin.id).await.unwrap();
        assert_eq!(metrics.total_interns, 2);
        assert_eq!(metrics.active_projects, 1);
        assert_eq!(metrics.completed_tasks, 1);
        assert_eq!(metrics.success_rate, 50.0);
    }

    #[tokio::test]
    async fn encadreur_with_no_interns_gets_zeroed_metrics() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        let (user, _) = repos
            .users()
            .insert_with_encadreur(
                pending_user("enc@acme.org", Role::Encadreur, Some("IT")),
                NewEncadreurRecord {
                    department: "IT".into(),
                    specialization: None,
                },
            )
            .await
            .unwrap();

        let metrics = svc.get_metrics(user.id).await.unwrap();
        assert_eq!(metrics.total_interns, 0);
        assert_eq!(metrics.success_rate, 0.0);
    }

    #[tokio::test]
    async fn encadreur_metrics_follow_intern_project_membership() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        let (user, encadreur) = repos
            .users()
            .insert_with_encadreur(
                pending_user("enc@acme.org", Role::Encadreur, Some("IT")),
                NewEncadreurRecord {
                    department: "IT".into(),
                    specialization: None,
                },
            )
            .await
            .unwrap();

        let intern_id =
            add_stagiaire(repos.users(), "a@acme.org", Some(encadreur.id), "CS").await;

        let supervised = repos
            .projects()
            .insert(project("supervised", ProjectStatus::Completed, 100))
            .await
            .unwrap();
        repos
            .projects()
            .insert(project("unrelated", ProjectStatus::InProgress, 10))
            .await
            .unwrap();
        repos
            .interns()
            .set_project(intern_id, Some(supervised.id))
            .await
            .unwrap();

        let metrics = svc.get_metrics(user.id).await.unwrap();
        assert_eq!(metrics.total_interns, 1);
        assert_eq!(metrics.active_projects, 0);
        assert_eq!(metrics.completed_tasks, 1);
        assert_eq!(metrics.success_rate, 100.0);
    }

    #[tokio::test]
    async fn stagiaire_metrics_average_project_progress() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        let (user, intern) = repos
            .users()
            .insert_with_intern(
                pending_user("omar@acme.org", Role::Stagiaire, Some("CS")),
                intern_record(None, "CS"),
            )
            .await
            .unwrap();

        let p = repos
            .projects()
            .insert(project("p", ProjectStatus::InProgress, 60))
            .await
            .unwrap();
        repos
            .interns()
            .set_project(intern.id, Some(p.id))
            .await
            .unwrap();

        let metrics = svc.get_metrics(user.id).await.unwrap();
        assert_eq!(metrics.total_interns, 1);
        assert_eq!(metrics.active_projects, 1);
        assert_eq!(metrics.completed_tasks, 0);
        assert_eq!(metrics.success_rate, 60.0);
    }

    #[tokio::test]
    async fn stagiaire_without_intern_record_is_not_found() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        let orphan = repos
            .users()
            .insert(pending_user("lost@acme.org", Role::Stagiaire, None))
            .await
            .unwrap();

        let result = svc.get_metrics(orphan.id).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn department_stats_count_participation_by_intern_department() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        // CS intern with no project; EE intern assigned to one.
        add_stagiaire(repos.users(), "cs@acme.org", None, "CS").await;
        let ee_intern = add_stagiaire(repos.users(), "ee@acme.org", None, "EE").await;

        let p = repos
            .projects()
            .insert(project("p", ProjectStatus::InProgress, 0))
            .await
            .unwrap();
        repos
            .interns()
            .set_project(ee_intern, Some(p.id))
            .await
            .unwrap();

        let stats = svc.get_department_stats().await.unwrap();

        let cs = stats.iter().find(|s| s.department == "CS").unwrap();
        assert_eq!(cs.intern_count, 1);
        assert_eq!(cs.project_count, 0);

        let ee = stats.iter().find(|s| s.department == "EE").unwrap();
        assert_eq!(ee.intern_count, 1);
        assert_eq!(ee.project_count, 1);
    }

    #[tokio::test]
    async fn project_status_buckets_exclude_on_bug() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        for status in [
            ProjectStatus::Planning,
            ProjectStatus::InProgress,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnBug,
        ] {
            repos.projects().insert(project("p", status, 0)).await.unwrap();
        }

        let stats = svc.get_project_status_stats().await.unwrap();
        assert_eq!(stats.todo_count, 1);
        assert_eq!(stats.in_progress_count, 2);
        assert_eq!(stats.done_count, 1);

        let total = repos.projects().find_all().await.unwrap().len() as u64;
        assert_eq!(stats.todo_count + stats.in_progress_count + stats.done_count, total - 1);
    }

    #[tokio::test]
    async fn task_stats_split_pending_and_overdue() {
        let repos = repos();
        let svc = DashboardService::new(repos.clone());

        repos
            .tasks()
            .insert(task(TaskStatus::Done, TaskPriority::High, None))
            .await
            .unwrap();
        repos
            .tasks()
            .insert(task(TaskStatus::Todo, TaskPriority::Medium, Some(-1)))
            .await
            .unwrap();
        repos
            .tasks()
            .insert(task(TaskStatus::InProgress, TaskPriority::Medium, Some(1)))
            .await
            .unwrap();

        let stats = svc.get_task_stats().await.unwrap();
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.pending_tasks, 2);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.tasks_by_priority.get("HIGH"), Some(&1));
        assert_eq!(stats.tasks_by_priority.get("MEDIUM"), Some(&2));
    }
}
