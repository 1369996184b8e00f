//! Account lifecycle and authentication
//!
//! Accounts move through a small state machine keyed by email:
//! admins pre-register encadreurs and stagiaires without a password
//! (PENDING), the owner later activates the account by choosing one
//! (ACTIVE), and only activated accounts can log in. `check_email` is
//! the discovery step a client uses to pick between the login form and
//! the password-creation form.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    AccountStatus, DomainError, DomainResult, Encadreur, Intern, InternshipStatus,
    NewEncadreurRecord, NewInternRecord, NewUser, RepositoryProvider, Role, User,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Result of an email lookup during sign-in discovery
#[derive(Debug, Clone)]
pub struct EmailCheck {
    pub exists: bool,
    pub has_password: bool,
    pub message: String,
}

/// Successful authentication: a fresh session token plus the account
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateEncadreurRequest {
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub department: String,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateStagiaireRequest {
    pub email: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub phone: Option<String>,
    pub school: Option<String>,
    pub department: Option<String>,
    pub encadreur_id: Option<i64>,
    /// ISO dates as supplied by the caller, e.g. "2025-03-01"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Credentials for the well-known bootstrap administrator, injected at
/// startup rather than hardcoded.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
    pub phone: String,
    pub department: String,
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        Self {
            email: "admin@internship.com".to_string(),
            password: "Admin@2024".to_string(),
            nom: "Admin".to_string(),
            prenom: "System".to_string(),
            phone: "+212600000000".to_string(),
            department: "IT".to_string(),
        }
    }
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt: JwtConfig) -> Self {
        Self { repos, jwt }
    }

    /// Pure lookup, no mutation. Always returns a result object.
    pub async fn check_email(&self, email: &str) -> DomainResult<EmailCheck> {
        let check = match self.repos.users().find_by_email(email).await? {
            None => EmailCheck {
                exists: false,
                has_password: false,
                message: "Email non trouvé".to_string(),
            },
            Some(user) if !user.has_password() => EmailCheck {
                exists: true,
                has_password: false,
                message: "Compte en attente d'activation".to_string(),
            },
            Some(_) => EmailCheck {
                exists: true,
                has_password: true,
                message: "Compte actif".to_string(),
            },
        };

        Ok(check)
    }

    /// PENDING → ACTIVE transition. The only way to set the initial
    /// password; a second attempt is rejected.
    pub async fn create_password(&self, email: &str, raw_password: &str) -> DomainResult<AuthResult> {
        let mut user = self
            .repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", email))?;

        if user.has_password() {
            return Err(DomainError::AlreadyActivated);
        }

        user.password_hash =
            Some(hash_password(raw_password).map_err(|e| DomainError::Storage(e.to_string()))?);
        user.account_status = AccountStatus::Active;

        let user = self.repos.users().update(user).await?;
        info!(email = %user.email, "account activated");

        self.issue_token(user)
    }

    /// Verify credentials and issue a fresh session token.
    ///
    /// Missing account and not-yet-activated account both surface as
    /// `InvalidCredentials` so the caller cannot tell them apart. A
    /// suspended account is only reported after the password checks out.
    pub async fn login(&self, email: &str, raw_password: &str) -> DomainResult<AuthResult> {
        let user = self
            .repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let digest = user
            .password_hash
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(DomainError::InvalidCredentials)?;

        let matches =
            verify_password(raw_password, digest).map_err(|e| DomainError::Storage(e.to_string()))?;
        if !matches {
            return Err(DomainError::InvalidCredentials);
        }

        if user.account_status != AccountStatus::Active {
            return Err(DomainError::AccountDisabled);
        }

        info!(email = %user.email, role = %user.role, "login");
        self.issue_token(user)
    }

    /// Create an administrator account, activated immediately.
    pub async fn create_admin(&self, req: CreateAdminRequest) -> DomainResult<User> {
        self.ensure_email_free(&req.email).await?;

        let hash = hash_password(&req.password).map_err(|e| DomainError::Storage(e.to_string()))?;
        let user = self
            .repos
            .users()
            .insert(NewUser {
                email: req.email,
                password_hash: Some(hash),
                nom: req.nom,
                prenom: req.prenom,
                phone: req.phone,
                department: req.department,
                role: Role::Admin,
                account_status: AccountStatus::Active,
            })
            .await?;

        info!(email = %user.email, "admin account created");
        Ok(user)
    }

    /// Pre-register a supervisor. The account starts without a password
    /// and its encadreur record is created in the same transaction.
    pub async fn create_encadreur(
        &self,
        req: CreateEncadreurRequest,
    ) -> DomainResult<(User, Encadreur)> {
        self.ensure_email_free(&req.email).await?;

        let specialization = req
            .specialization
            .or_else(|| Some(req.department.clone()));

        let (user, encadreur) = self
            .repos
            .users()
            .insert_with_encadreur(
                NewUser {
                    email: req.email,
                    password_hash: None,
                    nom: req.nom,
                    prenom: req.prenom,
                    phone: req.phone,
                    department: Some(req.department.clone()),
                    role: Role::Encadreur,
                    account_status: AccountStatus::Pending,
                },
                NewEncadreurRecord {
                    department: req.department,
                    specialization,
                },
            )
            .await?;

        info!(email = %user.email, "encadreur account created (pending activation)");
        Ok((user, encadreur))
    }

    /// Pre-register an intern. The account starts without a password
    /// and its intern record is created in the same transaction; an
    /// optional supervisor link is validated inside that transaction.
    pub async fn create_stagiaire(&self, req: CreateStagiaireRequest) -> DomainResult<(User, Intern)> {
        self.ensure_email_free(&req.email).await?;

        let start_date = parse_date(req.start_date.as_deref())?;
        let end_date = parse_date(req.end_date.as_deref())?;

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
                    start_date,
                    end_date,
                    status: InternshipStatus::Pending,
                },
            )
            .await?;

        info!(email = %user.email, "stagiaire account created (pending activation)");
        Ok((user, intern))
    }

    /// Create the bootstrap administrator once. A second call fails
    /// with `AlreadyExists`.
    pub async fn initialize_default_admin(&self, admin: &BootstrapAdmin) -> DomainResult<User> {
        if self.repos.users().exists_by_email(&admin.email).await? {
            return Err(DomainError::AlreadyExists(admin.email.clone()));
        }

        self.create_admin(CreateAdminRequest {
            email: admin.email.clone(),
            password: admin.password.clone(),
            nom: Some(admin.nom.clone()),
            prenom: Some(admin.prenom.clone()),
            phone: Some(admin.phone.clone()),
            department: Some(admin.department.clone()),
        })
        .await
    }

    async fn ensure_email_free(&self, email: &str) -> DomainResult<()> {
        if self.repos.users().exists_by_email(email).await? {
            return Err(DomainError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }

    fn issue_token(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_token(&user.email, user.id, user.role.as_str(), &self.jwt)
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(AuthResult { token, user })
    }
}

fn parse_date(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| DomainError::InvalidDate(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositories;

    fn service() -> AuthService {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositories::new());
        let jwt = JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "internship-service".into(),
        };
        AuthService::new(repos, jwt)
    }

    fn encadreur_request(email: &str) -> CreateEncadreurRequest {
        CreateEncadreurRequest {
            email: email.to_string(),
            nom: Some("Alami".into()),
            prenom: Some("Sara".into()),
            phone: None,
            department: "IT".into(),
            specialization: None,
        }
    }

    fn stagiaire_request(email: &str) -> CreateStagiaireRequest {
        CreateStagiaireRequest {
            email: email.to_string(),
            nom: Some("Benani".into()),
            prenom: Some("Omar".into()),
            phone: None,
            school: Some("ENSIAS".into()),
            department: Some("CS".into()),
            encadreur_id: None,
            start_date: Some("2025-03-01".into()),
            end_date: Some("2025-08-31".into()),
        }
    }

    #[tokio::test]
    async fn check_email_reports_unknown_accounts() {
        let svc = service();
        let check = svc.check_email("nobody@acme.org").await.unwrap();
        assert!(!check.exists);
        assert!(!check.has_password);
    }

    #[tokio::test]
    async fn activation_then_login_succeeds_once() {
        let svc = service();
        svc.create_encadreur(encadreur_request("sara@acme.org"))
            .await
            .unwrap();

        let check = svc.check_email("sara@acme.org").await.unwrap();
        assert!(check.exists);
        assert!(!check.has_password);

        let activated = svc.create_password("sara@acme.org", "S3cret!").await.unwrap();
        assert!(!activated.token.is_empty());
        assert_eq!(activated.user.account_status, AccountStatus::Active);

        let session = svc.login("sara@acme.org", "S3cret!").await.unwrap();
        assert!(!session.token.is_empty());

        let second = svc.create_password("sara@acme.org", "Other!").await;
        assert!(matches!(second, Err(DomainError::AlreadyActivated)));
    }

    #[tokio::test]
    async fn login_hides_missing_and_unactivated_accounts() {
        let svc = service();
        svc.create_stagiaire(stagiaire_request("omar@acme.org"))
            .await
            .unwrap();

        let missing = svc.login("ghost@acme.org", "pw").await;
        assert!(matches!(missing, Err(DomainError::InvalidCredentials)));

        let unactivated = svc.login("omar@acme.org", "pw").await;
        assert!(matches!(unactivated, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn suspended_account_is_reported_as_disabled() {
        let svc = service();
        svc.create_encadreur(encadreur_request("sara@acme.org"))
            .await
            .unwrap();
        svc.create_password("sara@acme.org", "S3cret!").await.unwrap();

        let mut user = svc
            .repos
            .users()
            .find_by_email("sara@acme.org")
            .await
            .unwrap()
            .unwrap();
        user.account_status = AccountStatus::Suspended;
        svc.repos.users().update(user).await.unwrap();

        let attempt = svc.login("sara@acme.org", "S3cret!").await;
        assert!(matches!(attempt, Err(DomainError::AccountDisabled)));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_for_every_role() {
        let svc = service();
        svc.create_stagiaire(stagiaire_request("taken@acme.org"))
            .await
            .unwrap();

        let dup = svc.create_encadreur(encadreur_request("taken@acme.org")).await;
        assert!(matches!(dup, Err(DomainError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn stagiaire_with_dangling_encadreur_leaves_no_user_behind() {
        let svc = service();
        let mut req = stagiaire_request("omar@acme.org");
        req.encadreur_id = Some(999);

        let attempt = svc.create_stagiaire(req).await;
        assert!(matches!(attempt, Err(DomainError::NotFound { .. })));

        let check = svc.check_email("omar@acme.org").await.unwrap();
        assert!(!check.exists);
    }

    #[tokio::test]
    async fn stagiaire_dates_are_validated() {
        let svc = service();
        let mut req = stagiaire_request("omar@acme.org");
        req.start_date = Some("01/03/2025".into());

        let attempt = svc.create_stagiaire(req).await;
        assert!(matches!(attempt, Err(DomainError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn encadreur_specialization_defaults_to_department() {
        let svc = service();
        let (_, encadreur) = svc
            .create_encadreur(encadreur_request("sara@acme.org"))
            .await
            .unwrap();
        assert_eq!(encadreur.specialization.as_deref(), Some("IT"));
    }

    #[tokio::test]
    async fn bootstrap_admin_is_created_once() {
        let svc = service();
        let admin = BootstrapAdmin::default();

        let created = svc.initialize_default_admin(&admin).await.unwrap();
        assert_eq!(created.role, Role::Admin);
        assert_eq!(created.account_status, AccountStatus::Active);

        let second = svc.initialize_default_admin(&admin).await;
        assert!(matches!(second, Err(DomainError::AlreadyExists(_))));

        let admins = svc.repos.users().find_by_role(Role::Admin).await.unwrap();
        assert_eq!(admins.len(), 1);
    }

    #[tokio::test]
    async fn bootstrap_admin_can_log_in() {
        let svc = service();
        let admin = BootstrapAdmin::default();
        svc.initialize_default_admin(&admin).await.unwrap();

        let session = svc.login(&admin.email, &admin.password).await.unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }
}
