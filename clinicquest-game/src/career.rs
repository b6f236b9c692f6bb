//! Career tracks, score-gated levels, and rank derivation.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_CAREER_DATA: &str = include_str!("../assets/career_tracks.json");

/// One rung on a career ladder, unlocked once the player's cumulative score
/// reaches `min_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub min_score: u32,
    pub avatar: String,
}

/// A named progression ladder of levels sorted ascending by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerTrack {
    pub id: String,
    pub name: String,
    pub levels: Vec<Level>,
}

impl CareerTrack {
    /// Check the ladder invariants: at least one level, the first gated at
    /// score 0, thresholds strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CareerConfigError> {
        let Some(first) = self.levels.first() else {
            return Err(CareerConfigError::EmptyTrack {
                track: self.id.clone(),
            });
        };
        if first.min_score != 0 {
            return Err(CareerConfigError::MissingBaseLevel {
                track: self.id.clone(),
            });
        }
        for pair in self.levels.windows(2) {
            if pair[1].min_score <= pair[0].min_score {
                return Err(CareerConfigError::NonIncreasingThreshold {
                    track: self.id.clone(),
                    level: pair[1].name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Current rank: the level with the greatest threshold not exceeding
    /// `score`. `None` only for an (invalid) empty ladder; a misconfigured
    /// ladder with duplicate thresholds deterministically resolves to the
    /// last one in ascending order.
    #[must_use]
    pub fn rank_for(&self, score: u32) -> Option<&Level> {
        self.levels
            .iter()
            .rfind(|level| level.min_score <= score)
            .or_else(|| self.levels.first())
    }

    /// The next locked level, if any.
    #[must_use]
    pub fn next_level(&self, score: u32) -> Option<&Level> {
        self.levels.iter().find(|level| level.min_score > score)
    }

    /// Fraction of the way from the current rank's threshold to the next
    /// level's, in `0.0..=1.0`; `1.0` once the ladder is topped out.
    #[must_use]
    pub fn progress_toward_next(&self, score: u32) -> f32 {
        let Some(current) = self.rank_for(score) else {
            return 0.0;
        };
        let Some(next) = self.next_level(score) else {
            return 1.0;
        };
        let span = next.min_score.saturating_sub(current.min_score);
        if span == 0 {
            return 1.0;
        }
        let gained = score.saturating_sub(current.min_score);
        (gained as f32 / span as f32).clamp(0.0, 1.0)
    }
}

/// Ordered collection of every career track in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CareerCatalog(pub Vec<CareerTrack>);

impl CareerCatalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(vec![])
    }

    /// Load a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid track data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The catalog embedded in the crate (the five hospital tracks).
    #[must_use]
    pub fn builtin() -> &'static Self {
        static CATALOG: OnceLock<CareerCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| Self::from_json(DEFAULT_CAREER_DATA).unwrap_or_default())
    }

    /// Validate every track plus track-id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CareerConfigError> {
        if self.0.is_empty() {
            return Err(CareerConfigError::EmptyCatalog);
        }
        for (idx, track) in self.0.iter().enumerate() {
            if self.0[..idx].iter().any(|other| other.id == track.id) {
                return Err(CareerConfigError::DuplicateTrackId {
                    id: track.id.clone(),
                });
            }
            track.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&CareerTrack> {
        self.0.iter().find(|track| track.id == id)
    }

    /// Lookup with the catalog's first track as fallback for unknown ids,
    /// mirroring how unknown persisted track names degrade to the default.
    #[must_use]
    pub fn get_or_first(&self, id: &str) -> Option<&CareerTrack> {
        self.get_by_id(id).or_else(|| self.0.first())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CareerTrack> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CareerCatalog {
    type Item = &'a CareerTrack;
    type IntoIter = std::slice::Iter<'a, CareerTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Errors raised when career catalog invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CareerConfigError {
    #[error("career catalog carries no tracks")]
    EmptyCatalog,
    #[error("track {track} carries no levels")]
    EmptyTrack { track: String },
    #[error("track {track} must open with a level gated at score 0")]
    MissingBaseLevel { track: String },
    #[error("track {track} thresholds must be strictly increasing (at {level})")]
    NonIncreasingThreshold { track: String, level: String },
    #[error("duplicate track id {id}")]
    DuplicateTrackId { id: String },
}
