//! Daily streak arithmetic and point awards.
//!
//! Pure calendar-day math; "today" is always injected so tests never mock a
//! clock. Dates compare at day granularity in whatever fixed zone the
//! persisted completion date was written in.

use chrono::NaiveDate;

use crate::constants::STREAK_BONUS_STEP;

/// Result of folding one mission completion into the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    /// Consecutive-day count after this completion.
    pub streak: u32,
    /// Bonus points earned on top of the final question's base value.
    pub bonus_points: u32,
}

/// Fold a completion on `today` into the streak.
///
/// The streak continues only when the previous completion was exactly
/// yesterday; any other history (first-ever completion, a gap of two or more
/// days) resets it to 1. Day 1 grants no bonus; day N grants
/// `(N - 1) * 5` points.
///
/// Call this exactly once per mission completion, on finishing the last
/// question, never per-question.
#[must_use]
pub fn update_streak(
    previous_streak: u32,
    last_completion: Option<NaiveDate>,
    today: NaiveDate,
) -> StreakUpdate {
    let continued = last_completion
        .and_then(|last| last.succ_opt())
        .is_some_and(|next| next == today);
    let streak = if continued {
        previous_streak.saturating_add(1)
    } else {
        1
    };
    StreakUpdate {
        streak,
        bonus_points: streak.saturating_sub(1).saturating_mul(STREAK_BONUS_STEP),
    }
}

/// Points earned for answering a question correctly.
///
/// The streak bonus rides on the final question of a mission only; base
/// values are fixed by whatever produced the mission and never recomputed
/// here.
#[must_use]
pub const fn award_points(base_points: u32, is_final_question: bool, streak_bonus: u32) -> u32 {
    if is_final_question {
        base_points.saturating_add(streak_bonus)
    } else {
        base_points
    }
}

/// Whether the daily mission has already been completed today.
#[must_use]
pub fn completed_today(last_completion: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_completion == Some(today)
}
