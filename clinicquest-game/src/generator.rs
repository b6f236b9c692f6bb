//! Daily mission orchestration: one remote attempt, then the deterministic
//! offline fallback.
//!
//! The caller-visible contract is that generation does not fail under a
//! network partition; the only error path is a misconfigured fallback bank,
//! which is caught when the generator is constructed.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::bank::{BankConfigError, QuestionBank};
use crate::constants::TEXT_MODEL;
use crate::mission::{Mission, MissionType, Question, select_mission_type};
use crate::seed::daily_rng;

/// Request handed to the external generative text service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub model: String,
    pub mission_type: MissionType,
    pub question_count: usize,
    pub prompt: String,
}

impl QuizRequest {
    /// Build the fixed request plan for a mission type.
    #[must_use]
    pub fn for_type(mission_type: MissionType) -> Self {
        Self {
            model: TEXT_MODEL.to_string(),
            mission_type,
            question_count: mission_type.question_count(),
            prompt: mission_type.prompt(),
        }
    }
}

/// External generative text service seam. Implementations make exactly one
/// attempt; retry policy belongs to the transport layer.
#[async_trait]
pub trait QuizService {
    /// Fetch schema-conforming questions for the request.
    ///
    /// # Errors
    ///
    /// Returns an error when the service is unreachable or the payload
    /// cannot be parsed.
    async fn fetch_questions(&self, request: &QuizRequest) -> anyhow::Result<Vec<Question>>;
}

/// Which path produced the daily mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionSource {
    /// The external generative service answered with a usable mission.
    Remote,
    /// The deterministic offline bank was substituted.
    Fallback,
}

/// A generated mission plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionOutcome {
    pub mission: Mission,
    pub source: MissionSource,
}

/// Produces the communal daily mission.
#[derive(Debug, Clone)]
pub struct MissionGenerator {
    bank: QuestionBank,
}

impl MissionGenerator {
    /// Build a generator over a validated fallback bank.
    ///
    /// # Errors
    ///
    /// Returns the bank's configuration error, since a bad bank would break
    /// the no-fail generation contract later.
    pub fn new(bank: QuestionBank) -> Result<Self, BankConfigError> {
        bank.validate()?;
        Ok(Self { bank })
    }

    /// Generator over the bank embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded bank fails validation.
    pub fn builtin() -> Result<Self, BankConfigError> {
        Self::new(QuestionBank::builtin().clone())
    }

    /// Generate today's mission, preferring the remote service.
    ///
    /// Any service failure -- transport error, wrong question count, schema
    /// violation -- is converted into a deterministic draw from the offline
    /// bank seeded by `today`, so every player sees the same substitute.
    ///
    /// # Errors
    ///
    /// Fails only when the fallback bank itself is missing the pool for
    /// today's type, which `new` already guards against.
    pub async fn generate_daily_mission(
        &self,
        today: NaiveDate,
        service: &dyn QuizService,
    ) -> Result<MissionOutcome, BankConfigError> {
        let mission_type = select_mission_type(today);
        let request = QuizRequest::for_type(mission_type);

        match service.fetch_questions(&request).await {
            Ok(questions) => match vet_remote(mission_type, questions) {
                Ok(mission) => {
                    debug!("quiz service produced {mission_type} mission");
                    return Ok(MissionOutcome {
                        mission,
                        source: MissionSource::Remote,
                    });
                }
                Err(reason) => {
                    warn!("quiz service returned unusable {mission_type} mission ({reason})");
                }
            },
            Err(err) => {
                warn!("quiz service unavailable for {mission_type} mission ({err:#})");
            }
        }

        let mission = self.bank.draw(mission_type, &mut daily_rng(today))?;
        Ok(MissionOutcome {
            mission,
            source: MissionSource::Fallback,
        })
    }

    #[must_use]
    pub const fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

/// Accept a remote question set only when it matches the type's plan.
fn vet_remote(mission_type: MissionType, questions: Vec<Question>) -> Result<Mission, String> {
    if questions.len() != mission_type.question_count() {
        return Err(format!(
            "expected {} questions, got {}",
            mission_type.question_count(),
            questions.len()
        ));
    }
    let mission = Mission::assemble(mission_type, questions);
    mission.validate().map_err(|err| err.to_string())?;
    for question in &mission.questions {
        if !mission_type.allows_points(question.points) {
            return Err(format!(
                "question carries {} points, outside the {mission_type} plan",
                question.points
            ));
        }
    }
    Ok(mission)
}
