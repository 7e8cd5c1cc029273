use std::process::ExitCode;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use member_search_api::api::router::build_router;
use member_search_api::api::state::AppState;
use member_search_api::config::AppConfig;
use member_search_api::domain::errors::RepositoryError;
use member_search_api::infrastructure::repositories::PostgresMemberRepository;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected successfully");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(RepositoryError::from)?;
        tracing::info!("Migrations applied");
    }

    let state = AppState::new(Arc::new(PostgresMemberRepository::new(pool)));
    let app = build_router(state);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
