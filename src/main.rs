//!
//! Internship management backend.
//! Reads configuration from TOML file (~/.config/internship-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use internship_management::application::identity::{AuthService, BootstrapAdmin};
use internship_management::config::AppConfig;
use internship_management::domain::{DomainError, RepositoryProvider};
use internship_management::infrastructure::crypto::jwt::JwtConfig;
use internship_management::infrastructure::database::migrator::Migrator;
use internship_management::{
    create_api_router, default_config_path, init_database, DatabaseConfig, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("INTERNSHIP_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting internship management service...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "internship-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let auth_service = Arc::new(AuthService::new(repos.clone(), jwt_config.clone()));

    // Bootstrap administrator, created once per database.
    let bootstrap = BootstrapAdmin {
        email: app_cfg.admin.email.clone(),
        password: app_cfg.admin.password.clone(),
        nom: app_cfg.admin.nom.clone(),
        prenom: app_cfg.admin.prenom.clone(),
        phone: app_cfg.admin.phone.clone(),
        department: app_cfg.admin.department.clone(),
    };
    match auth_service.initialize_default_admin(&bootstrap).await {
        Ok(admin) => {
            info!("Default admin created: {}", admin.email);
            info!("Please change the admin password immediately!");
        }
        Err(DomainError::AlreadyExists(email)) => {
            info!("Default admin already present: {}", email);
        }
        Err(e) => {
            error!("Failed to create default admin: {}", e);
        }
    }

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(repos, auth_service, jwt_config);

    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Internship management service shutdown complete");
    Ok(())
}
