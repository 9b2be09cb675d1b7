use thirteen::{Hand, StoredGame};

use super::setup::TestSetup;

// ============================================================================
// Game Setup Utilities
// ============================================================================

/// Scripts a full game through the session API: roster, score entries, submit
pub struct GameBuilder {
    entries: Vec<(u8, usize, String)>,
}

#[allow(dead_code)]
impl GameBuilder {
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Raw score entry for one player on one hand
    pub fn score(mut self, hand: u8, player_index: usize, raw: &str) -> Self {
        self.entries.push((hand, player_index, raw.to_string()));
        self
    }

    /// One entry per player, all on the same hand
    pub fn hand_scores(mut self, hand: u8, values: &[u32]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.entries.push((hand, index, value.to_string()));
        }
        self
    }

    /// Creates a session sized and named after the setup's players,
    /// enters every score and returns the session id without submitting
    pub async fn build_with_setup(&self, setup: &TestSetup) -> String {
        let service = &setup.game_service;
        let session_id = service.create_session().await.id;

        for _ in 2..setup.players.len() {
            service.add_player(&session_id).await.unwrap();
        }
        for (index, name) in setup.players.iter().enumerate() {
            service
                .rename_player(&session_id, index, name.clone())
                .await
                .unwrap();
        }
        for (hand, index, raw) in &self.entries {
            service
                .set_score(&session_id, Hand::new(*hand).unwrap(), *index, raw)
                .await
                .unwrap();
        }

        session_id
    }

    pub async fn submit_with_setup(&self, setup: &TestSetup) -> StoredGame {
        let session_id = self.build_with_setup(setup).await;
        setup
            .game_service
            .submit(&session_id)
            .await
            .expect("submitting game should succeed")
    }
}
