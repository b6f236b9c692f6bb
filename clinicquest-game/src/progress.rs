//! The persisted player snapshot.
//!
//! Loaded once at startup through the storage seam, mutated only when a
//! mission's final question completes, and handed back for a full
//! overwrite. Every field defaults individually so partially corrupt
//! snapshots degrade instead of failing the parse outright.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::avatar::PREDEFINED_AVATARS;
use crate::streak::StreakUpdate;

fn default_avatar() -> String {
    PREDEFINED_AVATARS[0].to_string()
}

fn default_track() -> String {
    "clinical_staff".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_completion_date: Option<NaiveDate>,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default = "default_track")]
    pub track_id: String,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            last_completion_date: None,
            avatar: default_avatar(),
            track_id: default_track(),
        }
    }
}

impl PlayerProgress {
    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fold a mission completion into the snapshot.
    pub fn apply_completion(&mut self, points_earned: u32, update: StreakUpdate, today: NaiveDate) {
        self.score = self.score.saturating_add(points_earned);
        self.streak = update.streak;
        self.last_completion_date = Some(today);
    }
}
