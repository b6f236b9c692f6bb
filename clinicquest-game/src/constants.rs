//! Centralized balance and tuning constants for ClinicQuest game logic.
//!
//! These values define the deterministic math for progression and daily
//! mission generation. Keeping them together ensures that gameplay can only
//! be adjusted via code changes reviewed in version control, rather than
//! through external JSON assets.

// Streak tuning ------------------------------------------------------------
pub(crate) const STREAK_BONUS_STEP: u32 = 5;

// Mission shape ------------------------------------------------------------
pub(crate) const QUESTION_OPTION_COUNT: usize = 4;
pub(crate) const TRIVIA_QUESTION_COUNT: usize = 3;
pub(crate) const TRIVIA_POINTS_EASY: u32 = 10;
pub(crate) const TRIVIA_POINTS_MEDIUM: u32 = 20;

// Generative service models ------------------------------------------------
pub(crate) const TEXT_MODEL: &str = "gemini-2.5-flash";
pub(crate) const IMAGE_MODEL: &str = "imagen-4.0-generate-001";

// Daily seed domain tag ----------------------------------------------------
pub(crate) const DAILY_SEED_DOMAIN: &[u8] = b"CLINIQ-";
