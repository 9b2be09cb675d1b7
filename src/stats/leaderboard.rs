use serde::{Deserialize, Serialize};

use super::{aggregator, models::PlayerStats};
use crate::history::GameRecord;

/// Number of players shown on the leaderboard
pub const LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHolder {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistentPlayer {
    pub name: String,
    pub score_range: u32,
}

/// Everything the home page shows about past games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub top_players: Vec<PlayerStats>,
    pub total_games: usize,
    pub average_score: f64,
    pub highest_score: Option<ScoreHolder>,
    pub lowest_score: Option<ScoreHolder>,
    pub most_consistent: Option<ConsistentPlayer>,
    pub lucky_score: Option<u32>,
    pub unlucky_score: Option<u32>,
}

impl Leaderboard {
    /// Builds the leaderboard from the stored player table and the full game history.
    ///
    /// Rankings come from `players`, ordered by wins (stable, so equal-win
    /// players keep the order they were given in). Score extremes and
    /// consistency are recomputed from `games`, in the order given.
    pub fn build(players: &[PlayerStats], games: &[GameRecord]) -> Self {
        let mut ranked = players.to_vec();
        ranked.sort_by(|a, b| b.wins.cmp(&a.wins));
        ranked.truncate(LEADERBOARD_SIZE);

        let history = aggregator::rebuild_player_stats(games);
        let frequencies = aggregator::score_frequencies(games);
        let lucky_score = aggregator::lucky_score(&frequencies);

        Self {
            top_players: ranked,
            total_games: games.len(),
            average_score: aggregator::average_score(games),
            highest_score: highest_holder(&history),
            lowest_score: lowest_holder(&history),
            most_consistent: aggregator::most_consistent(&history).and_then(|player| {
                player.score_range().map(|score_range| ConsistentPlayer {
                    name: player.name.clone(),
                    score_range,
                })
            }),
            lucky_score,
            unlucky_score: aggregator::unlucky_score(&frequencies, lucky_score),
        }
    }
}

/// First player holding the highest single-game score. A history of
/// nothing but zero scores has no holder.
fn highest_holder(players: &[PlayerStats]) -> Option<ScoreHolder> {
    players
        .iter()
        .filter(|p| p.games_played > 0 && p.highest_score > 0)
        .fold(None::<&PlayerStats>, |best, player| match best {
            Some(current) if current.highest_score >= player.highest_score => best,
            _ => Some(player),
        })
        .map(|player| ScoreHolder {
            name: player.name.clone(),
            score: player.highest_score,
        })
}

/// First player holding the lowest single-game score
fn lowest_holder(players: &[PlayerStats]) -> Option<ScoreHolder> {
    players
        .iter()
        .filter(|p| p.games_played > 0)
        .filter_map(|p| p.lowest_score.map(|lowest| (p, lowest)))
        .fold(None::<(&PlayerStats, u32)>, |best, (player, lowest)| match best {
            Some((_, current)) if current <= lowest => best,
            _ => Some((player, lowest)),
        })
        .map(|(player, score)| ScoreHolder {
            name: player.name.clone(),
            score,
        })
}
