//! ClinicQuest Game Engine
//!
//! Platform-agnostic core logic for the ClinicQuest hospital quest game.
//! This crate provides progression, streak, and daily mission mechanics
//! without UI or platform-specific dependencies.

pub mod avatar;
pub mod bank;
pub mod career;
pub mod constants;
#[cfg(feature = "genai-http")]
pub mod genai;
pub mod generator;
pub mod leaderboard;
pub mod mission;
pub mod progress;
pub mod seed;
pub mod session;
pub mod streak;

// Re-export commonly used types
pub use avatar::{
    AvatarImage, AvatarRequest, AvatarSource, ImageService, PLACEHOLDER_AVATAR_SVG,
    PREDEFINED_AVATARS, avatar_prompt, generate_avatar,
};
pub use bank::{BankConfigError, QuestionBank};
pub use career::{CareerCatalog, CareerConfigError, CareerTrack, Level};
#[cfg(feature = "genai-http")]
pub use genai::GenAiClient;
pub use generator::{MissionGenerator, MissionOutcome, MissionSource, QuizRequest, QuizService};
pub use leaderboard::{Entry, Leaderboard, PLAYER_ENTRY_NAME, Standing};
pub use mission::{Mission, MissionDataError, MissionType, Question, select_mission_type};
pub use progress::PlayerProgress;
pub use session::{
    Advance, AnswerOutcome, MissionSession, MissionSummary, SessionError, SessionPhase, Submission,
};
pub use streak::{StreakUpdate, award_points, completed_today, update_streak};

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

/// Trait for abstracting progress persistence.
/// Platform-specific implementations should provide this.
pub trait ProgressStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted player snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or parsed.
    fn load_progress(&self) -> Result<Option<PlayerProgress>, Self::Error>;

    /// Overwrite the persisted player snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_progress(&self, progress: &PlayerProgress) -> Result<(), Self::Error>;

    /// Delete the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Configuration errors surfaced when the engine is constructed.
///
/// These violate invariants the rest of the crate relies on, so they fail
/// loudly at startup instead of degrading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineConfigError {
    #[error(transparent)]
    Career(#[from] CareerConfigError),
    #[error(transparent)]
    Bank(#[from] BankConfigError),
}

/// Accounting handed back after a mission completion is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Total points banked: correct base values plus any streak bonus.
    pub points_earned: u32,
    /// Streak after this completion.
    pub streak: u32,
    /// Bonus actually banked (zero when the final answer was wrong).
    pub streak_bonus: u32,
    pub previous_rank: Option<String>,
    pub new_rank: Option<String>,
}

impl CompletionResult {
    /// Whether this completion unlocked a new rank on the primary track.
    #[must_use]
    pub fn rank_advanced(&self) -> bool {
        self.new_rank != self.previous_rank
    }
}

/// Main engine binding persistence to the career catalog and mission
/// generator.
#[derive(Debug)]
pub struct QuestEngine<S>
where
    S: ProgressStorage,
{
    storage: S,
    catalog: CareerCatalog,
    generator: MissionGenerator,
}

impl<S> QuestEngine<S>
where
    S: ProgressStorage,
{
    /// Create an engine over the built-in career catalog and question bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data fails validation.
    pub fn new(storage: S) -> Result<Self, EngineConfigError> {
        Self::with_data(
            storage,
            CareerCatalog::builtin().clone(),
            QuestionBank::builtin().clone(),
        )
    }

    /// Create an engine over caller-supplied data, validating it up front.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or bank violates its invariants.
    pub fn with_data(
        storage: S,
        catalog: CareerCatalog,
        bank: QuestionBank,
    ) -> Result<Self, EngineConfigError> {
        catalog.validate()?;
        let generator = MissionGenerator::new(bank)?;
        Ok(Self {
            storage,
            catalog,
            generator,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn generator(&self) -> &MissionGenerator {
        &self.generator
    }

    /// Load the persisted snapshot, treating missing or corrupt data as a
    /// fresh start.
    #[must_use]
    pub fn load_or_default(&self) -> PlayerProgress {
        match self.storage.load_progress() {
            Ok(Some(progress)) => progress,
            Ok(None) => PlayerProgress::default(),
            Err(err) => {
                warn!("persisted progress unreadable ({err}); starting fresh");
                PlayerProgress::default()
            }
        }
    }

    /// Persist the snapshot (full overwrite).
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub fn save(&self, progress: &PlayerProgress) -> Result<(), S::Error> {
        self.storage.save_progress(progress)
    }

    /// Current rank on the player's primary track.
    #[must_use]
    pub fn rank_for(&self, progress: &PlayerProgress) -> Option<&Level> {
        self.catalog
            .get_or_first(&progress.track_id)
            .and_then(|track| track.rank_for(progress.score))
    }

    /// Generate today's mission through the remote-then-fallback pipeline.
    ///
    /// # Errors
    ///
    /// Fails only on a misconfigured fallback bank, which construction
    /// already guards against.
    pub async fn daily_mission(
        &self,
        today: NaiveDate,
        service: &dyn QuizService,
    ) -> Result<MissionOutcome, BankConfigError> {
        self.generator.generate_daily_mission(today, service).await
    }

    /// Fold a finished session into the snapshot and persist it.
    ///
    /// Runs the one-per-completion streak update, banks the summary's base
    /// points plus any earned bonus, stamps the completion date, and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated snapshot cannot be saved; the
    /// in-memory snapshot is updated regardless.
    pub fn complete_mission(
        &self,
        progress: &mut PlayerProgress,
        summary: &MissionSummary,
        today: NaiveDate,
    ) -> Result<CompletionResult, S::Error> {
        let update = update_streak(progress.streak, progress.last_completion_date, today);
        let streak_bonus = if summary.final_correct {
            update.bonus_points
        } else {
            0
        };
        let points_earned = summary.base_points.saturating_add(streak_bonus);

        let previous_rank = self.rank_for(progress).map(|level| level.name.clone());
        progress.apply_completion(points_earned, update, today);
        let new_rank = self.rank_for(progress).map(|level| level.name.clone());

        self.storage.save_progress(progress)?;
        Ok(CompletionResult {
            points_earned,
            streak: update.streak,
            streak_bonus,
            previous_rank,
            new_rank,
        })
    }
}
