use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use super::{Hand, ScoringError, HAND_COUNT};

/// Parses a raw score entry the way a numeric form field is read:
/// leading whitespace is skipped, then an optional sign and the leading
/// run of digits are taken. Anything non-numeric or negative becomes 0,
/// and values past `u32::MAX` saturate.
pub fn parse_score(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() || negative {
        return 0;
    }

    // Only overflow can fail here, every character is a digit
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Per-hand, per-player scores for one game.
///
/// Every hand from 3 to 13 always has a row, and every row holds exactly
/// one score per player, aligned by player index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, Vec<u32>>")]
pub struct ScoreMatrix {
    rows: Vec<Vec<u32>>,
}

impl ScoreMatrix {
    /// Creates a zero-filled matrix for `player_count` players
    pub fn new(player_count: usize) -> Self {
        Self {
            rows: vec![vec![0; player_count]; HAND_COUNT],
        }
    }

    pub fn player_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or_default()
    }

    /// Parses `raw` and stores the result at (hand, player_index).
    /// Returns the value actually stored.
    pub fn set_score(
        &mut self,
        hand: Hand,
        player_index: usize,
        raw: &str,
    ) -> Result<u32, ScoringError> {
        let value = parse_score(raw);
        self.set_value(hand, player_index, value)?;
        Ok(value)
    }

    pub fn set_value(
        &mut self,
        hand: Hand,
        player_index: usize,
        value: u32,
    ) -> Result<(), ScoringError> {
        let player_count = self.player_count();
        let cell = self.rows[hand.offset()]
            .get_mut(player_index)
            .ok_or(ScoringError::InvalidPlayer {
                index: player_index,
                player_count,
            })?;
        *cell = value;
        Ok(())
    }

    pub fn get(&self, hand: Hand, player_index: usize) -> Option<u32> {
        self.rows[hand.offset()].get(player_index).copied()
    }

    pub fn row(&self, hand: Hand) -> &[u32] {
        &self.rows[hand.offset()]
    }

    /// Iterates rows in hand order
    pub fn rows(&self) -> impl Iterator<Item = (Hand, &[u32])> {
        Hand::all().map(move |hand| (hand, self.row(hand)))
    }
}

impl Serialize for ScoreMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HAND_COUNT))?;
        for (hand, row) in self.rows() {
            map.serialize_entry(&hand.to_string(), row)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<String, Vec<u32>>> for ScoreMatrix {
    type Error = ScoringError;

    fn try_from(mut raw: HashMap<String, Vec<u32>>) -> Result<Self, Self::Error> {
        let mut rows = Vec::with_capacity(HAND_COUNT);
        for hand in Hand::all() {
            let row = raw
                .remove(&hand.to_string())
                .ok_or(ScoringError::MissingHand(hand.cards()))?;
            rows.push(row);
        }

        if let Some(unknown) = raw.into_keys().next() {
            return Err(ScoringError::UnknownHandKey(unknown));
        }

        let expected = rows[0].len();
        for (hand, row) in Hand::all().zip(&rows) {
            if row.len() != expected {
                return Err(ScoringError::RaggedRow {
                    hand: hand.cards(),
                    expected,
                    found: row.len(),
                });
            }
        }

        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hand(cards: u8) -> Hand {
        Hand::new(cards).unwrap()
    }

    #[rstest]
    #[case("7", 7)]
    #[case("  42", 42)]
    #[case("+5", 5)]
    #[case("12abc", 12)]
    #[case("3.9", 3)]
    #[case("", 0)]
    #[case("abc", 0)]
    #[case("-4", 0)]
    #[case("-0", 0)]
    #[case("99999999999", u32::MAX)]
    fn parses_raw_scores(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_score(raw), expected);
    }

    #[test]
    fn new_matrix_has_every_hand_zero_filled() {
        let matrix = ScoreMatrix::new(3);

        assert_eq!(matrix.player_count(), 3);
        assert_eq!(matrix.rows().count(), HAND_COUNT);
        for (_, row) in matrix.rows() {
            assert_eq!(row, &[0, 0, 0]);
        }
    }

    #[test]
    fn set_score_touches_only_the_target_cell() {
        let mut matrix = ScoreMatrix::new(2);

        let stored = matrix.set_score(hand(5), 1, "8").unwrap();

        assert_eq!(stored, 8);
        assert_eq!(matrix.row(hand(5)), &[0, 8]);
        for (h, row) in matrix.rows() {
            if h != hand(5) {
                assert_eq!(row, &[0, 0]);
            }
        }
    }

    #[test]
    fn set_score_clamps_invalid_input_to_zero() {
        let mut matrix = ScoreMatrix::new(2);
        matrix.set_value(hand(3), 0, 9).unwrap();

        assert_eq!(matrix.set_score(hand(3), 0, "-3").unwrap(), 0);
        assert_eq!(matrix.get(hand(3), 0), Some(0));

        matrix.set_value(hand(3), 0, 9).unwrap();
        assert_eq!(matrix.set_score(hand(3), 0, "nope").unwrap(), 0);
        assert_eq!(matrix.get(hand(3), 0), Some(0));
    }

    #[test]
    fn set_score_rejects_unknown_player() {
        let mut matrix = ScoreMatrix::new(2);

        let result = matrix.set_score(hand(4), 2, "1");

        assert_eq!(
            result,
            Err(ScoringError::InvalidPlayer {
                index: 2,
                player_count: 2
            })
        );
        assert_eq!(matrix, ScoreMatrix::new(2));
    }

    #[test]
    fn serializes_as_hand_keyed_object() {
        let mut matrix = ScoreMatrix::new(2);
        matrix.set_value(hand(13), 0, 4).unwrap();

        let json = serde_json::to_value(&matrix).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 11);
        assert_eq!(json["3"], serde_json::json!([0, 0]));
        assert_eq!(json["13"], serde_json::json!([4, 0]));
    }

    #[test]
    fn deserialization_requires_every_hand() {
        let mut value = serde_json::to_value(ScoreMatrix::new(2)).unwrap();
        value.as_object_mut().unwrap().remove("9");

        let err = serde_json::from_value::<ScoreMatrix>(value).unwrap_err();
        assert!(err.to_string().contains("missing hand 9"));
    }

    #[test]
    fn deserialization_rejects_ragged_rows() {
        let mut value = serde_json::to_value(ScoreMatrix::new(2)).unwrap();
        value["6"] = serde_json::json!([1, 2, 3]);

        assert!(serde_json::from_value::<ScoreMatrix>(value).is_err());
    }

    #[test]
    fn deserialization_rejects_foreign_keys() {
        let mut value = serde_json::to_value(ScoreMatrix::new(2)).unwrap();
        value["14"] = serde_json::json!([0, 0]);

        assert!(serde_json::from_value::<ScoreMatrix>(value).is_err());
    }
}
