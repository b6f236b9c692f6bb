//! The offline question bank backing the deterministic fallback generator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::mission::{Mission, MissionDataError, MissionType, Question};

const DEFAULT_BANK_DATA: &str = include_str!("../assets/question_bank.json");

/// Per-type pools of pre-written questions, keyed by the wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestionBank(pub HashMap<MissionType, Vec<Question>>);

impl QuestionBank {
    #[must_use]
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Load a bank from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid bank data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The bank embedded in the crate.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| Self::from_json(DEFAULT_BANK_DATA).unwrap_or_default())
    }

    /// Check that every mission type has a non-empty pool of well-formed
    /// questions whose point values match the type's plan.
    ///
    /// An empty pool would let the generator return a question-less mission
    /// after a service outage, so this is a fatal configuration error.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), BankConfigError> {
        for mission_type in MissionType::ALL {
            let pool = self
                .0
                .get(&mission_type)
                .filter(|pool| !pool.is_empty())
                .ok_or(BankConfigError::MissingPool { mission_type })?;
            for question in pool {
                question
                    .validate()
                    .map_err(|source| BankConfigError::Question {
                        mission_type,
                        source,
                    })?;
                if !mission_type.allows_points(question.points) {
                    return Err(BankConfigError::PointMismatch {
                        mission_type,
                        got: question.points,
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn pool(&self, mission_type: MissionType) -> Option<&[Question]> {
        self.0.get(&mission_type).map(Vec::as_slice)
    }

    /// Draw a full mission from the pool using the supplied RNG.
    ///
    /// Draws are with repetition, so the pool may be smaller than the
    /// mission's question count. A fixed RNG stream yields an identical
    /// mission every time.
    ///
    /// # Errors
    ///
    /// Fails only when the pool for `mission_type` is missing or empty.
    pub fn draw<R: Rng>(
        &self,
        mission_type: MissionType,
        rng: &mut R,
    ) -> Result<Mission, BankConfigError> {
        let pool = self
            .pool(mission_type)
            .filter(|pool| !pool.is_empty())
            .ok_or(BankConfigError::MissingPool { mission_type })?;
        let questions = (0..mission_type.question_count())
            .map(|_| pool[rng.gen_range(0..pool.len())].clone())
            .collect();
        Ok(Mission::assemble(mission_type, questions))
    }
}

/// Errors raised when the fallback bank violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankConfigError {
    #[error("fallback bank has no questions for {mission_type}")]
    MissingPool { mission_type: MissionType },
    #[error("fallback bank question for {mission_type} is malformed: {source}")]
    Question {
        mission_type: MissionType,
        #[source]
        source: MissionDataError,
    },
    #[error("fallback bank question for {mission_type} carries {got} points")]
    PointMismatch { mission_type: MissionType, got: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::daily_rng;
    use chrono::NaiveDate;

    #[test]
    fn builtin_bank_is_valid() {
        assert_eq!(QuestionBank::builtin().validate(), Ok(()));
    }

    #[test]
    fn empty_bank_fails_validation() {
        assert!(matches!(
            QuestionBank::empty().validate(),
            Err(BankConfigError::MissingPool { .. })
        ));
    }

    #[test]
    fn validation_catches_point_mismatch() {
        let mut bank = QuestionBank::builtin().clone();
        bank.0.get_mut(&MissionType::Riddle).unwrap()[0].points = 10;
        assert!(matches!(
            bank.validate(),
            Err(BankConfigError::PointMismatch {
                mission_type: MissionType::Riddle,
                got: 10,
            })
        ));
    }

    #[test]
    fn draw_respects_type_question_count() {
        let bank = QuestionBank::builtin();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let trivia = bank.draw(MissionType::Trivia, &mut daily_rng(date)).unwrap();
        assert_eq!(trivia.question_count(), 3);

        let riddle = bank.draw(MissionType::Riddle, &mut daily_rng(date)).unwrap();
        assert_eq!(riddle.question_count(), 1);
        assert_eq!(riddle.validate(), Ok(()));
    }

    #[test]
    fn identical_seeds_draw_identical_missions() {
        let bank = QuestionBank::builtin();
        let date = NaiveDate::from_ymd_opt(2024, 8, 21).unwrap();
        let first = bank
            .draw(crate::mission::select_mission_type(date), &mut daily_rng(date))
            .unwrap();
        let second = bank
            .draw(crate::mission::select_mission_type(date), &mut daily_rng(date))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn draw_from_missing_pool_is_a_config_error() {
        let bank = QuestionBank::empty();
        let date = NaiveDate::from_ymd_opt(2024, 8, 21).unwrap();
        assert!(matches!(
            bank.draw(MissionType::Trivia, &mut daily_rng(date)),
            Err(BankConfigError::MissingPool {
                mission_type: MissionType::Trivia
            })
        ));
    }
}
