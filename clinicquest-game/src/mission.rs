//! Mission and question model, plus the communal daily type rotation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    QUESTION_OPTION_COUNT, TRIVIA_POINTS_EASY, TRIVIA_POINTS_MEDIUM, TRIVIA_QUESTION_COUNT,
};

/// The closed set of daily mission themes.
///
/// Declaration order is load-bearing: [`select_mission_type`] indexes into
/// [`MissionType::ALL`] by day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionType {
    Trivia,
    Riddle,
    DiagnosisChallenge,
    MedicalHistory,
    LabSafetyScenario,
    LogisticsPuzzle,
    TechTroubleshooting,
    FacilitiesChallenge,
}

impl MissionType {
    pub const ALL: [Self; 8] = [
        Self::Trivia,
        Self::Riddle,
        Self::DiagnosisChallenge,
        Self::MedicalHistory,
        Self::LabSafetyScenario,
        Self::LogisticsPuzzle,
        Self::TechTroubleshooting,
        Self::FacilitiesChallenge,
    ];

    /// Display title shown above the mission card.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Trivia => "Medical Trivia",
            Self::Riddle => "Today's Riddle",
            Self::DiagnosisChallenge => "Diagnosis Challenge",
            Self::MedicalHistory => "A Trip Through Time",
            Self::LabSafetyScenario => "Lab Safety Scenario",
            Self::LogisticsPuzzle => "Hospital Logistics Puzzle",
            Self::TechTroubleshooting => "Tech Troubleshooting",
            Self::FacilitiesChallenge => "Facilities Challenge",
        }
    }

    /// One-line flavor text for the mission card.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Trivia => {
                "Test your knowledge with these quick-fire questions from across the medical field."
            }
            Self::Riddle => {
                "Solve this tricky medical riddle. Choose the best answer from the options below."
            }
            Self::DiagnosisChallenge => {
                "A patient needs your help. Analyze the case and make the call."
            }
            Self::MedicalHistory => {
                "Explore a fascinating case from medical history. What's the story?"
            }
            Self::LabSafetyScenario => {
                "An incident has occurred in the research lab! What's the right protocol?"
            }
            Self::LogisticsPuzzle => "Optimize hospital operations in this tricky scenario.",
            Self::TechTroubleshooting => {
                "A critical system is down. As an IT specialist, what's your first move?"
            }
            Self::FacilitiesChallenge => {
                "An urgent maintenance issue has come up. How do you resolve it?"
            }
        }
    }

    /// How many questions a mission of this type carries.
    #[must_use]
    pub const fn question_count(self) -> usize {
        match self {
            Self::Trivia => TRIVIA_QUESTION_COUNT,
            _ => 1,
        }
    }

    /// Fixed point value per question, or `None` when the type mixes
    /// difficulty tiers (trivia awards 10 or 20 per question).
    #[must_use]
    pub const fn point_value(self) -> Option<u32> {
        match self {
            Self::Trivia => None,
            Self::Riddle => Some(40),
            Self::DiagnosisChallenge => Some(50),
            Self::MedicalHistory => Some(30),
            Self::LabSafetyScenario => Some(35),
            Self::LogisticsPuzzle => Some(30),
            Self::TechTroubleshooting => Some(25),
            Self::FacilitiesChallenge => Some(30),
        }
    }

    /// Whether a question point value fits this type's plan: trivia mixes
    /// the easy/medium tiers, every other type is fixed.
    #[must_use]
    pub fn allows_points(self, points: u32) -> bool {
        match self.point_value() {
            Some(expected) => points == expected,
            None => points == TRIVIA_POINTS_EASY || points == TRIVIA_POINTS_MEDIUM,
        }
    }

    /// Natural-language generation prompt sent to the quiz service.
    #[must_use]
    pub fn prompt(self) -> String {
        let body = match self {
            Self::Trivia => {
                return format!(
                    "Generate {TRIVIA_QUESTION_COUNT} unique multiple-choice medical trivia \
                     questions of varying difficulty covering diverse topics such as anatomy, \
                     pharmacology, or medical history. Each question must have exactly \
                     {QUESTION_OPTION_COUNT} options and one single correct answer. Assign \
                     {TRIVIA_POINTS_EASY} points to easy questions and {TRIVIA_POINTS_MEDIUM} \
                     to medium ones."
                );
            }
            Self::Riddle => {
                "a challenging medical riddle requiring lateral thinking or deep medical \
                 knowledge; the riddle text is the question"
            }
            Self::DiagnosisChallenge => {
                "a patient diagnosis challenge: a short case study (2-3 sentences) with \
                 symptoms, brief history, and initial findings, asking for the most likely \
                 diagnosis among four plausible ones"
            }
            Self::MedicalHistory => {
                "an intriguing, educational question about a specific event, discovery, or \
                 figure in medical history"
            }
            Self::LabSafetyScenario => {
                "a common lab safety scenario (chemical spill, equipment malfunction, \
                 contamination) asking for the correct immediate action"
            }
            Self::LogisticsPuzzle => {
                "a hospital logistics or operational puzzle (patient flow, supply chain, \
                 staff scheduling) asking for the most effective solution"
            }
            Self::TechTroubleshooting => {
                "a common hospital IT problem (slow EMR system, tablet Wi-Fi failure, \
                 pharmacy printer malfunction) asking for the best first troubleshooting step"
            }
            Self::FacilitiesChallenge => {
                "a hospital facilities or support services challenge (power outage, plumbing \
                 failure in a critical area, security alert) asking for the highest priority \
                 action"
            }
        };
        let points = self.point_value().unwrap_or(TRIVIA_POINTS_MEDIUM);
        format!(
            "Generate a single, unique multiple-choice question presenting {body}. Provide \
             exactly {QUESTION_OPTION_COUNT} plausible but distinct options, with only one \
             being the correct answer. Assign it {points} points. Ensure the output is a JSON \
             array containing a single question object."
        )
    }
}

impl std::fmt::Display for MissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trivia => write!(f, "trivia"),
            Self::Riddle => write!(f, "riddle"),
            Self::DiagnosisChallenge => write!(f, "diagnosis_challenge"),
            Self::MedicalHistory => write!(f, "medical_history"),
            Self::LabSafetyScenario => write!(f, "lab_safety_scenario"),
            Self::LogisticsPuzzle => write!(f, "logistics_puzzle"),
            Self::TechTroubleshooting => write!(f, "tech_troubleshooting"),
            Self::FacilitiesChallenge => write!(f, "facilities_challenge"),
        }
    }
}

/// Pick the communal mission type for a calendar day.
///
/// Only the day of month participates, so 2024-01-15 and 2025-07-15 share a
/// type. The month/year blindness is an intentional simplification of the
/// shared daily event, not an oversight.
#[must_use]
pub fn select_mission_type(date: NaiveDate) -> MissionType {
    let index = date.day() as usize % MissionType::ALL.len();
    MissionType::ALL[index]
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub points: u32,
}

impl Question {
    /// Check the option-count, distinctness, answer-membership, and point
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), MissionDataError> {
        if self.options.len() != QUESTION_OPTION_COUNT {
            return Err(MissionDataError::OptionCount {
                expected: QUESTION_OPTION_COUNT,
                got: self.options.len(),
            });
        }
        for (idx, option) in self.options.iter().enumerate() {
            if self.options[..idx].contains(option) {
                return Err(MissionDataError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if !self.options.contains(&self.answer) {
            return Err(MissionDataError::AnswerNotInOptions {
                answer: self.answer.clone(),
            });
        }
        if self.points == 0 {
            return Err(MissionDataError::ZeroPoints);
        }
        Ok(())
    }

    /// Whether the given option text is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// A themed bundle of questions presented to the player for one day.
///
/// Missions are created fresh per "start mission" action and discarded after
/// completion or abandonment; they are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(rename = "type")]
    pub mission_type: MissionType,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Mission {
    /// Assemble a mission of the given type around pre-vetted questions.
    #[must_use]
    pub fn assemble(mission_type: MissionType, questions: Vec<Question>) -> Self {
        Self {
            mission_type,
            title: mission_type.title().to_string(),
            description: mission_type.description().to_string(),
            questions,
        }
    }

    /// Check the non-empty invariant plus every question's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), MissionDataError> {
        if self.questions.is_empty() {
            return Err(MissionDataError::EmptyMission);
        }
        for question in &self.questions {
            question.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Shape violations in mission or question data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissionDataError {
    #[error("question must offer exactly {expected} options (got {got})")]
    OptionCount { expected: usize, got: usize },
    #[error("question options must be distinct (duplicate {option:?})")]
    DuplicateOption { option: String },
    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
    #[error("question points must be positive")]
    ZeroPoints,
    #[error("mission carries no questions")]
    EmptyMission,
}
