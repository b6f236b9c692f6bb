//! Leaderboard standings: score-sorted entries with dense ranks.

use serde::{Deserialize, Serialize};

/// Display name used for the local player's leaderboard entry.
pub const PLAYER_ENTRY_NAME: &str = "You";

/// An unranked leaderboard participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub score: u32,
}

/// A ranked row ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: u32,
    pub name: String,
    pub score: u32,
    pub is_player: bool,
}

/// The communal leaderboard the player competes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The stock roster new players compete against.
    #[must_use]
    pub fn seeded() -> Self {
        let roster = [
            ("Dr. Anya Sharma", 1250),
            ("Alex \"Suture\" Chen", 1180),
            ("Nurse Ben Carter", 990),
            ("Chloe \"Stat\" Rodriguez", 950),
        ];
        Self::new(
            roster
                .into_iter()
                .map(|(name, score)| Entry {
                    name: name.to_string(),
                    score,
                })
                .collect(),
        )
    }

    /// Insert or refresh the player's entry with their current score.
    pub fn upsert_player(&mut self, score: u32) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == PLAYER_ENTRY_NAME)
        {
            entry.score = score;
        } else {
            self.entries.push(Entry {
                name: PLAYER_ENTRY_NAME.to_string(),
                score,
            });
        }
    }

    /// Rows sorted descending by score with ranks assigned 1..n.
    ///
    /// Ties keep roster order (stable sort), so an overtaking player must
    /// strictly exceed a rival's score.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut sorted: Vec<&Entry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| Standing {
                rank: idx as u32 + 1,
                name: entry.name.clone(),
                score: entry.score,
                is_player: entry.name == PLAYER_ENTRY_NAME,
            })
            .collect()
    }

    /// The player's current rank, if they have an entry.
    #[must_use]
    pub fn player_rank(&self) -> Option<u32> {
        self.standings()
            .into_iter()
            .find(|standing| standing.is_player)
            .map(|standing| standing.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_roster_ranks_descending() {
        let board = Leaderboard::seeded();
        let standings = board.standings();
        assert_eq!(standings.len(), 4);
        assert_eq!(standings[0].name, "Dr. Anya Sharma");
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[3].rank, 4);
        for pair in standings.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn upsert_adds_player_once_then_updates() {
        let mut board = Leaderboard::seeded();
        board.upsert_player(10);
        board.upsert_player(1000);
        let standings = board.standings();
        let players: Vec<_> = standings.iter().filter(|s| s.is_player).collect();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].score, 1000);
    }

    #[test]
    fn player_climbs_past_rivals() {
        let mut board = Leaderboard::seeded();
        board.upsert_player(0);
        assert_eq!(board.player_rank(), Some(5));
        board.upsert_player(995);
        assert_eq!(board.player_rank(), Some(3));
        board.upsert_player(2000);
        assert_eq!(board.player_rank(), Some(1));
    }

    #[test]
    fn tie_keeps_roster_order() {
        let mut board = Leaderboard::seeded();
        board.upsert_player(990);
        let standings = board.standings();
        let ben = standings.iter().find(|s| s.name == "Nurse Ben Carter").unwrap();
        let player = standings.iter().find(|s| s.is_player).unwrap();
        assert!(ben.rank < player.rank);
    }
}
