use std::sync::Arc;

use thirteen::{
    history::InMemoryGameRepository, stats::InMemoryPlayerStatsRepository, AppState,
    GameService, StatsService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub game_service: Arc<GameService>,
    pub stats_service: Arc<StatsService>,
    pub game_repository: Arc<InMemoryGameRepository>,
    pub player_repository: Arc<InMemoryPlayerStatsRepository>,
    pub players: Vec<String>,
}

impl TestSetup {
    #[allow(dead_code)]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.game_service.clone(), self.stats_service.clone())
    }
}

pub struct TestSetupBuilder {
    players: Vec<String>,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["Alice", "Bob"])
    }

    pub fn with_four_players(self) -> Self {
        self.with_players(vec!["Alice", "Bob", "Charlie", "David"])
    }

    pub fn build(self) -> TestSetup {
        let game_repository = Arc::new(InMemoryGameRepository::new());
        let player_repository = Arc::new(InMemoryPlayerStatsRepository::new());
        let stats_service = Arc::new(StatsService::new(
            game_repository.clone(),
            player_repository.clone(),
        ));
        let game_service = Arc::new(GameService::new(stats_service.clone()));

        TestSetup {
            game_service,
            stats_service,
            game_repository,
            player_repository,
            players: self.players,
        }
    }
}
