//! In-memory repositories for development and testing
//!
//! Backs the full `RepositoryProvider` contract with dashmap tables and
//! atomic id counters. Paired (user, role-record) inserts validate all
//! references before touching any table, so a failure leaves no partial
//! rows behind.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Encadreur, EncadreurRepository, Intern, InternRepository,
    InternshipStatus, NewEncadreurRecord, NewInternRecord, NewProject, NewTask, NewUser, Project,
    ProjectRepository, RepositoryProvider, Role, Task, TaskRepository, TaskStatus, User,
    UserRepository,
};

struct Store {
    users: DashMap<i64, User>,
    encadreurs: DashMap<i64, Encadreur>,
    interns: DashMap<i64, Intern>,
    projects: DashMap<i64, Project>,
    tasks: DashMap<i64, Task>,
    user_seq: AtomicI64,
    encadreur_seq: AtomicI64,
    intern_seq: AtomicI64,
    project_seq: AtomicI64,
    task_seq: AtomicI64,
}

impl Store {
    fn new() -> Self {
        Self {
            users: DashMap::new(),
            encadreurs: DashMap::new(),
            interns: DashMap::new(),
            projects: DashMap::new(),
            tasks: DashMap::new(),
            user_seq: AtomicI64::new(1),
            encadreur_seq: AtomicI64::new(1),
            intern_seq: AtomicI64::new(1),
            project_seq: AtomicI64::new(1),
            task_seq: AtomicI64::new(1),
        }
    }

    fn email_taken(&self, email: &str, except_user: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except_user)
    }

    fn insert_user_row(&self, dto: NewUser) -> DomainResult<User> {
        if self.email_taken(&dto.email, None) {
            return Err(DomainError::DuplicateEmail(dto.email));
        }

        let now = Utc::now();
        let user = User {
            id: self.user_seq.fetch_add(1, Ordering::SeqCst),
            email: dto.email,
            password_hash: dto.password_hash,
            nom: dto.nom,
            prenom: dto.prenom,
            phone: dto.phone,
            department: dto.department,
            avatar: None,
            role: dto.role,
            account_status: dto.account_status,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory `RepositoryProvider`
pub struct InMemoryRepositories {
    users: MemUserRepository,
    encadreurs: MemEncadreurRepository,
    interns: MemInternRepository,
    projects: MemProjectRepository,
    tasks: MemTaskRepository,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        let store = Arc::new(Store::new());
        Self {
            users: MemUserRepository(store.clone()),
            encadreurs: MemEncadreurRepository(store.clone()),
            interns: MemInternRepository(store.clone()),
            projects: MemProjectRepository(store.clone()),
            tasks: MemTaskRepository(store),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn encadreurs(&self) -> &dyn EncadreurRepository {
        &self.encadreurs
    }

    fn interns(&self) -> &dyn InternRepository {
        &self.interns
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }
}

fn sorted_by_id<T>(mut rows: Vec<T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    rows.sort_by_key(id);
    rows
}

// ── Users ───────────────────────────────────────────────────────

struct MemUserRepository(Arc<Store>);

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.0.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .0
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn exists_by_email(&self, email: &str) -> DomainResult<bool> {
        Ok(self.0.email_taken(email, None))
    }

    async fn find_by_role(&self, role: Role) -> DomainResult<Vec<User>> {
        let rows = self
            .0
            .users
            .iter()
            .filter(|u| u.role == role)
            .map(|u| u.clone())
            .collect();
        Ok(sorted_by_id(rows, |u| u.id))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let rows = self.0.users.iter().map(|u| u.clone()).collect();
        Ok(sorted_by_id(rows, |u| u.id))
    }

    async fn insert(&self, dto: NewUser) -> DomainResult<User> {
        self.0.insert_user_row(dto)
    }

    async fn insert_with_encadreur(
        &self,
        dto: NewUser,
        record: NewEncadreurRecord,
    ) -> DomainResult<(User, Encadreur)> {
        let user = self.0.insert_user_row(dto)?;

        let now = Utc::now();
        let encadreur = Encadreur {
            id: self.0.encadreur_seq.fetch_add(1, Ordering::SeqCst),
            user_id: user.id,
            department: record.department,
            specialization: record.specialization,
            created_at: now,
            updated_at: now,
        };
        self.0.encadreurs.insert(encadreur.id, encadreur.clone());

        Ok((user, encadreur))
    }

    async fn insert_with_intern(
        &self,
        dto: NewUser,
        record: NewInternRecord,
    ) -> DomainResult<(User, Intern)> {
        // Validate the encadreur link before creating anything.
        if let Some(encadreur_id) = record.encadreur_id {
            if !self.0.encadreurs.contains_key(&encadreur_id) {
                return Err(DomainError::not_found("Encadreur", "id", encadreur_id));
            }
        }

        let user = self.0.insert_user_row(dto)?;

        let now = Utc::now();
        let intern = Intern {
            id: self.0.intern_seq.fetch_add(1, Ordering::SeqCst),
            user_id: user.id,
            encadreur_id: record.encadreur_id,
            project_id: None,
            school: record.school,
            department: record.department,
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status,
            cv: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.0.interns.insert(intern.id, intern.clone());

        Ok((user, intern))
    }

    async fn update(&self, mut user: User) -> DomainResult<User> {
        if !self.0.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User", "id", user.id));
        }
        if self.0.email_taken(&user.email, Some(user.id)) {
            return Err(DomainError::DuplicateEmail(user.email));
        }

        user.updated_at = Utc::now();
        self.0.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        if self.0.users.remove(&id).is_none() {
            return Err(DomainError::not_found("User", "id", id));
        }

        // Cascade to role records, mirroring the FK behavior.
        self.0.encadreurs.retain(|_, e| e.user_id != id);
        self.0.interns.retain(|_, i| i.user_id != id);
        Ok(())
    }
}

// ── Encadreurs ──────────────────────────────────────────────────

struct MemEncadreurRepository(Arc<Store>);

#[async_trait]
impl EncadreurRepository for MemEncadreurRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Encadreur>> {
        Ok(self.0.encadreurs.get(&id).map(|e| e.clone()))
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Encadreur>> {
        Ok(self
            .0
            .encadreurs
            .iter()
            .find(|e| e.user_id == user_id)
            .map(|e| e.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Encadreur>> {
        let rows = self.0.encadreurs.iter().map(|e| e.clone()).collect();
        Ok(sorted_by_id(rows, |e| e.id))
    }

    async fn update(&self, mut encadreur: Encadreur) -> DomainResult<Encadreur> {
        if !self.0.encadreurs.contains_key(&encadreur.id) {
            return Err(DomainError::not_found("Encadreur", "id", encadreur.id));
        }
        encadreur.updated_at = Utc::now();
        self.0.encadreurs.insert(encadreur.id, encadreur.clone());
        Ok(encadreur)
    }
}

// ── Interns ─────────────────────────────────────────────────────

struct MemInternRepository(Arc<Store>);

#[async_trait]
impl InternRepository for MemInternRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Intern>> {
        Ok(self.0.interns.get(&id).map(|i| i.clone()))
    }

    async fn find_by_user_id(&self, user_id: i64) -> DomainResult<Option<Intern>> {
        Ok(self
            .0
            .interns
            .iter()
            .find(|i| i.user_id == user_id)
            .map(|i| i.clone()))
    }

    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Intern>> {
        let rows = self
            .0
            .interns
            .iter()
            .filter(|i| i.encadreur_id == Some(encadreur_id))
            .map(|i| i.clone())
            .collect();
        Ok(sorted_by_id(rows, |i| i.id))
    }

    async fn find_by_department(&self, department: &str) -> DomainResult<Vec<Intern>> {
        let rows = self
            .0
            .interns
            .iter()
            .filter(|i| i.department.as_deref() == Some(department))
            .map(|i| i.clone())
            .collect();
        Ok(sorted_by_id(rows, |i| i.id))
    }

    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Intern>> {
        let rows = self
            .0
            .interns
            .iter()
            .filter(|i| i.project_id == Some(project_id))
            .map(|i| i.clone())
            .collect();
        Ok(sorted_by_id(rows, |i| i.id))
    }

    async fn find_by_status(&self, status: InternshipStatus) -> DomainResult<Vec<Intern>> {
        let rows = self
            .0
            .interns
            .iter()
            .filter(|i| i.status == status)
            .map(|i| i.clone())
            .collect();
        Ok(sorted_by_id(rows, |i| i.id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Intern>> {
        let rows = self.0.interns.iter().map(|i| i.clone()).collect();
        Ok(sorted_by_id(rows, |i| i.id))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.0.interns.len() as u64)
    }

    async fn update(&self, mut intern: Intern) -> DomainResult<Intern> {
        if !self.0.interns.contains_key(&intern.id) {
            return Err(DomainError::not_found("Intern", "id", intern.id));
        }
        intern.updated_at = Utc::now();
        self.0.interns.insert(intern.id, intern.clone());
        Ok(intern)
    }

    async fn set_project(&self, intern_id: i64, project_id: Option<i64>) -> DomainResult<()> {
        let Some(mut intern) = self.0.interns.get_mut(&intern_id) else {
            return Err(DomainError::not_found("Intern", "id", intern_id));
        };
        intern.project_id = project_id;
        intern.updated_at = Utc::now();
        Ok(())
    }
}

// ── Projects ────────────────────────────────────────────────────

struct MemProjectRepository(Arc<Store>);

#[async_trait]
impl ProjectRepository for MemProjectRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Project>> {
        Ok(self.0.projects.get(&id).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Project>> {
        let rows = self.0.projects.iter().map(|p| p.clone()).collect();
        Ok(sorted_by_id(rows, |p| p.id))
    }

    async fn find_by_encadreur(&self, encadreur_id: i64) -> DomainResult<Vec<Project>> {
        let rows = self
            .0
            .projects
            .iter()
            .filter(|p| p.encadreur_id == Some(encadreur_id))
            .map(|p| p.clone())
            .collect();
        Ok(sorted_by_id(rows, |p| p.id))
    }

    async fn find_by_intern(&self, intern_id: i64) -> DomainResult<Vec<Project>> {
        let Some(project_id) = self.0.interns.get(&intern_id).and_then(|i| i.project_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .0
            .projects
            .get(&project_id)
            .map(|p| p.clone())
            .into_iter()
            .collect())
    }

    async fn insert(&self, dto: NewProject) -> DomainResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: self.0.project_seq.fetch_add(1, Ordering::SeqCst),
            title: dto.title,
            description: dto.description,
            encadreur_id: dto.encadreur_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            status: dto.status,
            progress: Some(dto.progress),
            department: dto.department,
            created_at: now,
            updated_at: now,
        };
        self.0.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(&self, mut project: Project) -> DomainResult<Project> {
        if !self.0.projects.contains_key(&project.id) {
            return Err(DomainError::not_found("Project", "id", project.id));
        }
        project.updated_at = Utc::now();
        self.0.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        if self.0.projects.remove(&id).is_none() {
            return Err(DomainError::not_found("Project", "id", id));
        }

        // FK SET NULL behavior.
        for mut intern in self.0.interns.iter_mut() {
            if intern.project_id == Some(id) {
                intern.project_id = None;
            }
        }
        for mut task in self.0.tasks.iter_mut() {
            if task.project_id == Some(id) {
                task.project_id = None;
            }
        }
        Ok(())
    }
}

// ── Tasks ───────────────────────────────────────────────────────

struct MemTaskRepository(Arc<Store>);

#[async_trait]
impl TaskRepository for MemTaskRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Task>> {
        Ok(self.0.tasks.get(&id).map(|t| t.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Task>> {
        let rows = self.0.tasks.iter().map(|t| t.clone()).collect();
        Ok(sorted_by_id(rows, |t| t.id))
    }

    async fn find_by_project(&self, project_id: i64) -> DomainResult<Vec<Task>> {
        let rows = self
            .0
            .tasks
            .iter()
            .filter(|t| t.project_id == Some(project_id))
            .map(|t| t.clone())
            .collect();
        Ok(sorted_by_id(rows, |t| t.id))
    }

    async fn find_by_assignee(&self, user_id: i64) -> DomainResult<Vec<Task>> {
        let rows = self
            .0
            .tasks
            .iter()
            .filter(|t| t.assigned_to == Some(user_id))
            .map(|t| t.clone())
            .collect();
        Ok(sorted_by_id(rows, |t| t.id))
    }

    async fn find_by_status(&self, status: TaskStatus) -> DomainResult<Vec<Task>> {
        let rows = self
            .0
            .tasks
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.clone())
            .collect();
        Ok(sorted_by_id(rows, |t| t.id))
    }

    async fn insert(&self, dto: NewTask) -> DomainResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: self.0.task_seq.fetch_add(1, Ordering::SeqCst),
            title: dto.title,
            description: dto.description,
            project_id: dto.project_id,
            assigned_to: dto.assigned_to,
            status: dto.status,
            priority: dto.priority,
            due_date: dto.due_date,
            created_at: now,
            updated_at: now,
        };
        self.0.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, mut task: Task) -> DomainResult<Task> {
        if !self.0.tasks.contains_key(&task.id) {
            return Err(DomainError::not_found("Task", "id", task.id));
        }
        task.updated_at = Utc::now();
        self.0.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        if self.0.tasks.remove(&id).is_none() {
            return Err(DomainError::not_found("Task", "id", id));
        }
        Ok(())
    }
}
