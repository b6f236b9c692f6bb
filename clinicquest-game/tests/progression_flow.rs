//! End-to-end walkthroughs of the progression loop: session completion,
//! streak growth over consecutive days, and rank transitions.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use chrono::NaiveDate;
use clinicquest_game::{
    Advance, Mission, MissionSession, MissionSummary, PlayerProgress, ProgressStorage, QuestEngine,
    QuestionBank, select_mission_type,
};
use clinicquest_game::seed::daily_rng;

#[derive(Clone, Default)]
struct MemoryStorage {
    snapshot: Rc<RefCell<Option<PlayerProgress>>>,
}

impl ProgressStorage for MemoryStorage {
    type Error = Infallible;

    fn load_progress(&self) -> Result<Option<PlayerProgress>, Self::Error> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save_progress(&self, progress: &PlayerProgress) -> Result<(), Self::Error> {
        *self.snapshot.borrow_mut() = Some(progress.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        *self.snapshot.borrow_mut() = None;
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fallback_mission(day: NaiveDate) -> Mission {
    QuestionBank::builtin()
        .draw(select_mission_type(day), &mut daily_rng(day))
        .unwrap()
}

/// Drive a session to completion, answering every question correctly.
fn ace_mission(mission: Mission) -> MissionSummary {
    let mut session = MissionSession::start(mission).unwrap();
    loop {
        let question = session.current_question().unwrap().clone();
        let correct_index = question
            .options
            .iter()
            .position(|option| option == &question.answer)
            .unwrap();
        session.select_answer(correct_index).unwrap();
        session.submit().unwrap();
        match session.advance().unwrap() {
            Advance::NextQuestion { .. } => {}
            Advance::Completed(summary) => return summary,
        }
    }
}

#[test]
fn three_consecutive_days_grow_streak_and_bonuses() {
    let engine = QuestEngine::new(MemoryStorage::default()).unwrap();
    let mut progress = engine.load_or_default();

    let days = [date(2024, 9, 10), date(2024, 9, 11), date(2024, 9, 12)];
    let mut streaks = Vec::new();
    let mut bonuses = Vec::new();
    for day in days {
        let summary = ace_mission(fallback_mission(day));
        let result = engine.complete_mission(&mut progress, &summary, day).unwrap();
        streaks.push(result.streak);
        bonuses.push(result.streak_bonus);
    }

    assert_eq!(streaks, vec![1, 2, 3]);
    assert_eq!(bonuses, vec![0, 5, 10]);
    assert_eq!(progress.streak, 3);
    assert_eq!(progress.last_completion_date, Some(days[2]));
}

#[test]
fn skipped_day_resets_the_streak() {
    let engine = QuestEngine::new(MemoryStorage::default()).unwrap();
    let mut progress = engine.load_or_default();

    let summary = ace_mission(fallback_mission(date(2024, 9, 10)));
    engine
        .complete_mission(&mut progress, &summary, date(2024, 9, 10))
        .unwrap();
    let summary = ace_mission(fallback_mission(date(2024, 9, 11)));
    engine
        .complete_mission(&mut progress, &summary, date(2024, 9, 11))
        .unwrap();
    assert_eq!(progress.streak, 2);

    let summary = ace_mission(fallback_mission(date(2024, 9, 13)));
    let result = engine
        .complete_mission(&mut progress, &summary, date(2024, 9, 13))
        .unwrap();
    assert_eq!(result.streak, 1);
    assert_eq!(result.streak_bonus, 0);
}

#[test]
fn clinical_track_crosses_into_paramedic_at_seventy_five() {
    let engine = QuestEngine::new(MemoryStorage::default()).unwrap();
    let mut progress = engine.load_or_default();
    progress.score = 70;
    assert_eq!(engine.rank_for(&progress).unwrap().name, "EMT");

    let summary = MissionSummary {
        mission_type: clinicquest_game::MissionType::Trivia,
        questions_total: 3,
        correct_count: 1,
        base_points: 10,
        final_correct: false,
    };
    let result = engine
        .complete_mission(&mut progress, &summary, date(2024, 9, 10))
        .unwrap();

    assert_eq!(progress.score, 80);
    assert_eq!(result.previous_rank.as_deref(), Some("EMT"));
    assert_eq!(result.new_rank.as_deref(), Some("Paramedic"));
    assert!(result.rank_advanced());
}

#[test]
fn completion_gate_blocks_a_second_mission_today() {
    let engine = QuestEngine::new(MemoryStorage::default()).unwrap();
    let mut progress = engine.load_or_default();
    let today = date(2024, 9, 10);
    assert!(!clinicquest_game::completed_today(
        progress.last_completion_date,
        today
    ));

    let summary = ace_mission(fallback_mission(today));
    engine.complete_mission(&mut progress, &summary, today).unwrap();
    assert!(clinicquest_game::completed_today(
        progress.last_completion_date,
        today
    ));
}

#[test]
fn progress_survives_a_reload_cycle() {
    let storage = MemoryStorage::default();
    let engine = QuestEngine::new(storage.clone()).unwrap();
    let mut progress = engine.load_or_default();

    let day = date(2024, 9, 10);
    let summary = ace_mission(fallback_mission(day));
    engine.complete_mission(&mut progress, &summary, day).unwrap();

    let engine_restarted = QuestEngine::new(storage).unwrap();
    let reloaded = engine_restarted.load_or_default();
    assert_eq!(reloaded, progress);
    assert!(reloaded.score > 0);
}
