//! Per-mission answer/feedback state machine.
//!
//! A session walks `Answering(i) -> Feedback(i) -> Answering(i+1) | Completed`
//! over a mission's questions. Selection is only accepted while a question is
//! open and locks the moment feedback is shown; completion is reachable only
//! from feedback on the final question. Streak accounting happens once, in
//! the engine, when the session reports completion.

use thiserror::Error;

use crate::mission::{Mission, MissionDataError, MissionType, Question};

/// Whether the submitted answer matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// Where the session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Question `index` is open for answer selection.
    Answering { index: usize },
    /// Question `index` has been submitted; selection is locked.
    Feedback {
        index: usize,
        outcome: AnswerOutcome,
    },
    /// The final question's feedback has been acknowledged.
    Completed,
}

/// Result of submitting the selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub outcome: AnswerOutcome,
    /// Base points banked by this answer (zero when incorrect). Streak
    /// bonuses are settled at completion, not here.
    pub base_points: u32,
    pub is_final: bool,
}

/// What acknowledging feedback led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    NextQuestion { index: usize },
    Completed(MissionSummary),
}

/// Accounting for a finished mission, handed to the engine exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionSummary {
    pub mission_type: MissionType,
    pub questions_total: usize,
    pub correct_count: usize,
    /// Sum of base point values of correctly answered questions.
    pub base_points: u32,
    /// Whether the final question was answered correctly, which decides if
    /// the streak bonus materializes as points.
    pub final_correct: bool,
}

/// A live run through one mission.
#[derive(Debug, Clone)]
pub struct MissionSession {
    mission: Mission,
    phase: SessionPhase,
    selected: Option<usize>,
    correct_count: usize,
    base_points: u32,
    final_correct: bool,
}

impl MissionSession {
    /// Open a session on the first question.
    ///
    /// # Errors
    ///
    /// Rejects missions that violate the question invariants; a session over
    /// a question-less mission could never complete.
    pub fn start(mission: Mission) -> Result<Self, MissionDataError> {
        mission.validate()?;
        Ok(Self {
            mission,
            phase: SessionPhase::Answering { index: 0 },
            selected: None,
            correct_count: 0,
            base_points: 0,
            final_correct: false,
        })
    }

    #[must_use]
    pub const fn mission(&self) -> &Mission {
        &self.mission
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The question currently open or under feedback.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Answering { index } | SessionPhase::Feedback { index, .. } => {
                self.mission.questions.get(index)
            }
            SessionPhase::Completed => None,
        }
    }

    /// Select (or re-select) an option for the open question.
    ///
    /// # Errors
    ///
    /// Rejects selection outside the answering phase or beyond the option
    /// range.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        let SessionPhase::Answering { index } = self.phase else {
            return Err(match self.phase {
                SessionPhase::Completed => SessionError::AlreadyCompleted,
                _ => SessionError::SelectionLocked,
            });
        };
        let option_count = self
            .mission
            .questions
            .get(index)
            .map_or(0, |question| question.options.len());
        if option_index >= option_count {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
            });
        }
        self.selected = Some(option_index);
        Ok(())
    }

    /// Submit the selected answer and move into feedback.
    ///
    /// # Errors
    ///
    /// Rejects submission outside the answering phase or with no selection.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        let SessionPhase::Answering { index } = self.phase else {
            return Err(match self.phase {
                SessionPhase::Completed => SessionError::AlreadyCompleted,
                _ => SessionError::NotAnswering,
            });
        };
        let selected = self.selected.ok_or(SessionError::NothingSelected)?;
        let question = &self.mission.questions[index];
        let is_final = index + 1 == self.mission.questions.len();
        let correct = question.is_correct(&question.options[selected]);

        let (outcome, base_points) = if correct {
            self.correct_count += 1;
            self.base_points = self.base_points.saturating_add(question.points);
            (AnswerOutcome::Correct, question.points)
        } else {
            (AnswerOutcome::Incorrect, 0)
        };
        if is_final {
            self.final_correct = correct;
        }
        self.phase = SessionPhase::Feedback { index, outcome };
        Ok(Submission {
            outcome,
            base_points,
            is_final,
        })
    }

    /// Acknowledge feedback: open the next question or complete the mission.
    ///
    /// # Errors
    ///
    /// Rejects the call outside the feedback phase.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        let SessionPhase::Feedback { index, .. } = self.phase else {
            return Err(match self.phase {
                SessionPhase::Completed => SessionError::AlreadyCompleted,
                _ => SessionError::NotInFeedback,
            });
        };
        self.selected = None;
        let next = index + 1;
        if next < self.mission.questions.len() {
            self.phase = SessionPhase::Answering { index: next };
            Ok(Advance::NextQuestion { index: next })
        } else {
            self.phase = SessionPhase::Completed;
            Ok(Advance::Completed(self.summary_now()))
        }
    }

    /// Completion accounting, available once the session has finished.
    #[must_use]
    pub fn summary(&self) -> Option<MissionSummary> {
        matches!(self.phase, SessionPhase::Completed).then(|| self.summary_now())
    }

    fn summary_now(&self) -> MissionSummary {
        MissionSummary {
            mission_type: self.mission.mission_type,
            questions_total: self.mission.questions.len(),
            correct_count: self.correct_count,
            base_points: self.base_points,
            final_correct: self.final_correct,
        }
    }
}

/// Rejected session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("answers can only be selected while a question is open")]
    SelectionLocked,
    #[error("option index {index} is out of range")]
    OptionOutOfRange { index: usize },
    #[error("submitting requires a selected answer")]
    NothingSelected,
    #[error("submitting is only accepted while a question is open")]
    NotAnswering,
    #[error("advancing is only accepted during feedback")]
    NotInFeedback,
    #[error("the mission is already complete")]
    AlreadyCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionType;

    fn question(text: &str, answer_idx: usize, points: u32) -> Question {
        let options = vec![
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
        ];
        Question {
            question: text.to_string(),
            answer: options[answer_idx].clone(),
            options,
            points,
        }
    }

    fn trivia_mission() -> Mission {
        Mission::assemble(
            MissionType::Trivia,
            vec![
                question("q1", 0, 10),
                question("q2", 1, 20),
                question("q3", 2, 10),
            ],
        )
    }

    #[test]
    fn full_walkthrough_accumulates_base_points() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();

        session.select_answer(0).unwrap();
        let sub = session.submit().unwrap();
        assert_eq!(sub.outcome, AnswerOutcome::Correct);
        assert_eq!(sub.base_points, 10);
        assert!(!sub.is_final);
        assert_eq!(session.advance().unwrap(), Advance::NextQuestion { index: 1 });

        // wrong answer on the middle question
        session.select_answer(3).unwrap();
        let sub = session.submit().unwrap();
        assert_eq!(sub.outcome, AnswerOutcome::Incorrect);
        assert_eq!(sub.base_points, 0);
        session.advance().unwrap();

        session.select_answer(2).unwrap();
        let sub = session.submit().unwrap();
        assert!(sub.is_final);
        let Advance::Completed(summary) = session.advance().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(summary.correct_count, 2);
        assert_eq!(summary.base_points, 20);
        assert!(summary.final_correct);
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.summary(), Some(summary));
    }

    #[test]
    fn selection_allows_reselect_before_submit() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        session.select_answer(0).unwrap();
        session.select_answer(3).unwrap();
        assert_eq!(session.selected(), Some(3));
    }

    #[test]
    fn selection_locks_during_feedback() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        session.select_answer(0).unwrap();
        session.submit().unwrap();
        assert_eq!(
            session.select_answer(1),
            Err(SessionError::SelectionLocked)
        );
    }

    #[test]
    fn submit_requires_selection() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        assert_eq!(session.submit().unwrap_err(), SessionError::NothingSelected);
    }

    #[test]
    fn submit_rejected_during_feedback() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        session.select_answer(0).unwrap();
        session.submit().unwrap();
        assert_eq!(session.submit().unwrap_err(), SessionError::NotAnswering);
    }

    #[test]
    fn advance_rejected_while_answering() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        assert_eq!(session.advance().unwrap_err(), SessionError::NotInFeedback);
    }

    #[test]
    fn out_of_range_selection_rejected() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        assert_eq!(
            session.select_answer(4),
            Err(SessionError::OptionOutOfRange { index: 4 })
        );
    }

    #[test]
    fn completed_session_rejects_every_action() {
        let mut session = MissionSession::start(Mission::assemble(
            MissionType::Riddle,
            vec![question("r", 1, 40)],
        ))
        .unwrap();
        session.select_answer(1).unwrap();
        let sub = session.submit().unwrap();
        assert!(sub.is_final);
        session.advance().unwrap();

        assert_eq!(
            session.select_answer(0),
            Err(SessionError::AlreadyCompleted)
        );
        assert_eq!(session.submit().unwrap_err(), SessionError::AlreadyCompleted);
        assert_eq!(
            session.advance().unwrap_err(),
            SessionError::AlreadyCompleted
        );
    }

    #[test]
    fn incorrect_final_answer_reports_no_final_flag() {
        let mut session = MissionSession::start(Mission::assemble(
            MissionType::Riddle,
            vec![question("r", 1, 40)],
        ))
        .unwrap();
        session.select_answer(0).unwrap();
        session.submit().unwrap();
        let Advance::Completed(summary) = session.advance().unwrap() else {
            panic!("expected completion");
        };
        assert!(!summary.final_correct);
        assert_eq!(summary.base_points, 0);
    }

    #[test]
    fn selection_clears_between_questions() {
        let mut session = MissionSession::start(trivia_mission()).unwrap();
        session.select_answer(0).unwrap();
        session.submit().unwrap();
        session.advance().unwrap();
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn session_rejects_invalid_mission() {
        let mission = Mission::assemble(MissionType::Riddle, Vec::new());
        assert!(MissionSession::start(mission).is_err());
    }
}
