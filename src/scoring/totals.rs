use super::ScoreMatrix;

impl ScoreMatrix {
    /// Sum of a player's scores over all eleven hands. Lower is better.
    pub fn total(&self, player_index: usize) -> u32 {
        self.rows()
            .filter_map(|(_, row)| row.get(player_index).copied())
            .fold(0u32, u32::saturating_add)
    }

    pub fn totals(&self) -> Vec<u32> {
        (0..self.player_count()).map(|i| self.total(i)).collect()
    }

    /// Index of the player with the lowest total.
    ///
    /// Ties go to the lowest player index: the scan keeps the first
    /// minimum it meets. Returns `None` only when there are no players.
    pub fn winner(&self) -> Option<usize> {
        self.totals()
            .into_iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u32)>, (index, total)| match best {
                Some((_, best_total)) if best_total <= total => best,
                _ => Some((index, total)),
            })
            .map(|(index, _)| index)
    }
}
