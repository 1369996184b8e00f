//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    AuthService, DashboardService, EncadreurService, InternService, ProjectService, TaskService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::{
    auth, dashboard, encadreurs, health, interns, projects, tasks,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::check_email,
        auth::create_password,
        auth::login,
        auth::register_admin,
        auth::register_encadreur,
        auth::register_stagiaire,
        auth::get_current_user,
        // Dashboard
        dashboard::get_metrics,
        dashboard::get_department_stats,
        dashboard::get_project_status_stats,
        dashboard::get_task_stats,
        // Encadreurs
        encadreurs::list_encadreurs,
        encadreurs::get_encadreur,
        encadreurs::update_encadreur,
        encadreurs::delete_encadreur,
        // Stagiaires
        interns::list_interns,
        interns::create_intern,
        interns::get_intern,
        interns::update_intern,
        interns::delete_intern,
        // Projets
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        projects::assign_interns,
        // Tasks
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::update_task,
        tasks::update_task_status,
        tasks::delete_task,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            // Auth
            auth::CheckEmailRequest,
            auth::CheckEmailResponse,
            auth::CreatePasswordRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::RegisterAdminRequest,
            auth::RegisterEncadreurRequest,
            auth::RegisterStagiaireRequest,
            auth::UserDto,
            // Dashboard
            dashboard::DashboardMetricsDto,
            dashboard::DepartmentStatsDto,
            dashboard::ProjectStatusStatsDto,
            dashboard::TaskStatsDto,
            // Encadreurs
            encadreurs::EncadreurDto,
            encadreurs::UpdateEncadreurBody,
            // Stagiaires
            interns::InternDto,
            interns::CreateInternBody,
            interns::UpdateInternBody,
            // Projets
            projects::ProjectDto,
            projects::CreateProjectBody,
            projects::UpdateProjectBody,
            projects::AssignInternsBody,
            // Tasks
            tasks::TaskDto,
            tasks::CreateTaskBody,
            tasks::UpdateTaskBody,
            tasks::UpdateTaskStatusBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Email discovery, account activation, login, registration"),
        (name = "Dashboard", description = "Role-scoped metrics and statistics"),
        (name = "Encadreurs", description = "Supervisor management"),
        (name = "Stagiaires", description = "Intern management"),
        (name = "Projets", description = "Project management and intern assignment"),
        (name = "Tasks", description = "Task management"),
    ),
    info(
        title = "Internship Management API",
        version = "1.0.0",
        description = "REST API for managing an internship program: identities, projects, tasks, and dashboards",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    auth_service: Arc<AuthService>,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        auth: auth_service,
        repos: repos.clone(),
        jwt_config,
    };

    // Public auth routes: discovery, activation, login.
    let auth_public_routes = Router::new()
        .route("/check-email", post(auth::check_email))
        .route("/create-password", post(auth::create_password))
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Registration is admin-only; profile lookup needs any valid token.
    let auth_me_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state.clone());

    let auth_register_routes = Router::new()
        .route("/register/admin", post(auth::register_admin))
        .route("/register/encadreur", post(auth::register_encadreur))
        .route("/register/stagiaire", post(auth::register_stagiaire))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    let dashboard_state = dashboard::DashboardHandlerState {
        dashboard: Arc::new(DashboardService::new(repos.clone())),
    };
    let dashboard_routes = Router::new()
        .route("/metrics", get(dashboard::get_metrics))
        .route("/departments", get(dashboard::get_department_stats))
        .route("/projects/status", get(dashboard::get_project_status_stats))
        .route("/tasks", get(dashboard::get_task_stats))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(dashboard_state);

    let encadreur_state = encadreurs::EncadreurHandlerState {
        encadreurs: Arc::new(EncadreurService::new(repos.clone())),
    };
    let encadreur_routes = Router::new()
        .route("/", get(encadreurs::list_encadreurs))
        .route(
            "/{id}",
            get(encadreurs::get_encadreur)
                .put(encadreurs::update_encadreur)
                .delete(encadreurs::delete_encadreur),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(encadreur_state);

    let intern_state = interns::InternHandlerState {
        interns: Arc::new(InternService::new(repos.clone())),
    };
    let intern_routes = Router::new()
        .route("/", get(interns::list_interns).post(interns::create_intern))
        .route(
            "/{id}",
            get(interns::get_intern)
                .put(interns::update_intern)
                .delete(interns::delete_intern),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(intern_state);

    let project_state = projects::ProjectHandlerState {
        projects: Arc::new(ProjectService::new(repos.clone())),
    };
    let project_routes = Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/{id}/stagiaires", put(projects::assign_interns))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(project_state);

    let task_state = tasks::TaskHandlerState {
        tasks: Arc::new(TaskService::new(repos)),
    };
    let task_routes = Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/{id}/status", axum::routing::patch(tasks::update_task_status))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(task_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest(
            "/api/auth",
            auth_public_routes
                .merge(auth_me_routes)
                .merge(auth_register_routes),
        )
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/encadreurs", encadreur_routes)
        .nest("/api/stagiaires", intern_routes)
        .nest("/api/projets", project_routes)
        .nest("/api/tasks", task_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
