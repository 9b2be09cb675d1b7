use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use thirteen::{
    config::Config,
    game::start_cleanup_task,
    history::{GameRepository, InMemoryGameRepository, PostgresGameRepository},
    routes,
    stats::{InMemoryPlayerStatsRepository, PlayerStatsRepository, PostgresPlayerStatsRepository},
    AppState, GameService, StatsService,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thirteen=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(bind_addr = %config.bind_addr, "Starting Thirteen score tracker");

    let (game_repository, player_repository): (
        Arc<dyn GameRepository>,
        Arc<dyn PlayerStatsRepository>,
    ) = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let games = PostgresGameRepository::new(pool.clone());
            games.ensure_schema().await?;
            let players = PostgresPlayerStatsRepository::new(pool);
            players.ensure_schema().await?;
            info!("Using PostgreSQL storage");
            (Arc::new(games), Arc::new(players))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory storage");
            (
                Arc::new(InMemoryGameRepository::new()),
                Arc::new(InMemoryPlayerStatsRepository::new()),
            )
        }
    };

    // Services are built once and injected through the shared state
    let stats_service = Arc::new(StatsService::new(game_repository, player_repository));
    let game_service = Arc::new(GameService::new(Arc::clone(&stats_service)));
    tokio::spawn(start_cleanup_task(
        Arc::clone(&game_service),
        config.cleanup.clone(),
    ));
    let app_state = AppState::new(game_service, stats_service);

    let app = routes::router(app_state, config.cors_allow_any);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
