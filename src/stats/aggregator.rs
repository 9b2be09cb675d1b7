//! Full-history aggregation over recorded games.
//!
//! Every tie in here is broken by scan order: players in order of first
//! appearance, scores in the order games are given and, within a game, in
//! player index order.

use std::collections::HashMap;

use super::models::PlayerStats;
use crate::history::GameRecord;

/// Rebuilds per-player stats from scratch by folding every game in order.
/// Players come back in order of first appearance.
pub fn rebuild_player_stats<'a, I>(games: I) -> Vec<PlayerStats>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut players: Vec<PlayerStats> = Vec::new();

    for game in games {
        for entry in &game.players {
            match positions.get(&entry.name) {
                Some(&position) => players[position].apply(entry),
                None => {
                    positions.insert(entry.name.clone(), players.len());
                    players.push(PlayerStats::from_result(entry));
                }
            }
        }
    }

    players
}

/// Player with the smallest spread between highest and lowest score.
/// Players without any games are skipped.
pub fn most_consistent(players: &[PlayerStats]) -> Option<&PlayerStats> {
    players
        .iter()
        .filter_map(|player| player.score_range().map(|range| (player, range)))
        .fold(None::<(&PlayerStats, u32)>, |best, (player, range)| match best {
            Some((_, best_range)) if best_range <= range => best,
            _ => Some((player, range)),
        })
        .map(|(player, _)| player)
}

/// Each distinct score with its number of occurrences, in order of first appearance
pub fn score_frequencies<'a, I>(games: I) -> Vec<(u32, usize)>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut positions: HashMap<u32, usize> = HashMap::new();
    let mut frequencies: Vec<(u32, usize)> = Vec::new();

    for score in games
        .into_iter()
        .flat_map(|game| game.players.iter().map(|p| p.score))
    {
        match positions.get(&score) {
            Some(&position) => frequencies[position].1 += 1,
            None => {
                positions.insert(score, frequencies.len());
                frequencies.push((score, 1));
            }
        }
    }

    frequencies
}

/// The most frequent score; the first one met wins a tie
pub fn lucky_score(frequencies: &[(u32, usize)]) -> Option<u32> {
    frequencies
        .iter()
        .fold(None, |best: Option<(u32, usize)>, &(score, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((score, count)),
        })
        .map(|(score, _)| score)
}

/// The most frequent score strictly above the lucky score.
///
/// A candidate only replaces the current pick when its count beats it, so
/// the first one met wins a tie. `None` when nothing scores above `lucky`.
pub fn unlucky_score(frequencies: &[(u32, usize)], lucky: Option<u32>) -> Option<u32> {
    let lucky = lucky?;
    let mut best: Option<(u32, usize)> = None;

    for &(score, count) in frequencies {
        let best_count = best.map(|(_, c)| c).unwrap_or(0);
        if score > lucky && count > best_count {
            best = Some((score, count));
        }
    }

    best.map(|(score, _)| score)
}

/// Mean of every player's score across all games, 0 when there are none
pub fn average_score<'a, I>(games: I) -> f64
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let (sum, count) = games
        .into_iter()
        .flat_map(|game| game.players.iter())
        .fold((0u64, 0u64), |(sum, count), entry| {
            (sum + u64::from(entry.score), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
