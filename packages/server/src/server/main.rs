// Main entry point for the auth service

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use auth_core::domains::auth::store::PgCredentialStore;
use auth_core::domains::auth::TokenService;
use auth_core::kernel::{ProfileAdapter, ProfileNotifier};
use auth_core::server::{build_app, AppState};
use auth_core::Config;
use profiles::{ProfileOptions, ProfileService};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,auth_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Auth Service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations (additive; never drops existing data)
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Profile collaborator is optional: configured by USER_SERVICE_URL
    let profiles: Option<Arc<dyn ProfileNotifier>> = match &config.user_service_url {
        Some(base_url) => {
            tracing::info!("Profile service configured at {}", base_url);
            let service = ProfileService::new(ProfileOptions {
                base_url: base_url.clone(),
                timeout: Duration::from_secs(config.user_service_timeout_seconds),
            })
            .context("Failed to build profile service client")?;
            Some(Arc::new(ProfileAdapter::new(service)))
        }
        None => {
            tracing::info!("No profile service configured, registrations stay local");
            None
        }
    };

    let state = AppState {
        store: Arc::new(PgCredentialStore::new(pool)),
        profiles,
        tokens: Arc::new(TokenService::new(
            &config.jwt_secret_key,
            config.jwt_algorithm,
            config.access_token_expire_minutes,
        )),
    };

    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
