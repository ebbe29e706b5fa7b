//! Game session - the explicit state behind one player's game.
//!
//! The session is driven by four player events:
//! 1. **Start**: pick a difficulty and fetch the opening scene
//! 2. **Answer**: type a solution to the current puzzle
//! 3. **Choose**: pick one of the offered paths once the puzzle is solved
//! 4. **Restart**: leave the finished quest and return to the start screen
//!
//! Solving a puzzle and finishing a quest update the stats, which are then
//! handed to [`quest_rules::evaluate`]; any unlock is merged into the session's
//! achievement list and announced with a [`Notification`].

mod notification;

pub use notification::*;

use quest_rules::{
    catalog, evaluate, merge_unlock, Achievement, Difficulty, GameStep, QuestId, Stats,
    StatsTracker,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::client::StoryGenerator;
use crate::config::SessionConfig;
use crate::error::SessionError;

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Start,
    /// Waiting for the opening scene.
    Loading,
    Playing,
    GameOver,
    Error,
}

/// Result of checking a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct! The path is clear.",
            Feedback::Incorrect => "Not quite! Try another calculation.",
        }
    }
}

/// All state for one player's game.
pub struct GameSession<G> {
    generator: G,
    config: SessionConfig,

    phase: Phase,
    difficulty: Difficulty,
    quest_id: QuestId,
    current_step: Option<GameStep>,
    feedback: Option<Feedback>,
    problem_solved: bool,
    error: Option<String>,

    stats: StatsTracker,
    achievements: Vec<Achievement>,
    notification: Option<Notification>,
    cues: Vec<SoundCue>,
}

impl<G: StoryGenerator> GameSession<G> {
    /// Create a session on the start screen with a fresh achievement catalog.
    pub fn new(generator: G, config: SessionConfig) -> Self {
        Self {
            generator,
            difficulty: config.default_difficulty,
            config,
            phase: Phase::Start,
            quest_id: QuestId::new(),
            current_step: None,
            feedback: None,
            problem_solved: false,
            error: None,
            stats: StatsTracker::new(),
            achievements: catalog(),
            notification: None,
            cues: Vec::new(),
        }
    }

    /// Begin a new adventure at `difficulty`.
    ///
    /// Allowed from the start and error screens. Returns the phase the game
    /// lands in: `Playing` on success, `Error` if the story could not be fetched.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<Phase, SessionError> {
        self.require_phase("start an adventure", &[Phase::Start, Phase::Error])?;

        self.cues.push(SoundCue::Start);
        self.phase = Phase::Loading;
        self.error = None;
        self.difficulty = difficulty;
        self.quest_id = QuestId::new();
        tracing::info!(quest = %self.quest_id, %difficulty, "Starting adventure");

        match self.generator.next_step(None, difficulty) {
            Ok(step) => {
                self.show_step(step);
                self.phase = Phase::Playing;
            }
            Err(e) => self.fail(e.user_message()),
        }
        Ok(self.phase)
    }

    /// Try again after a failed start, at the same difficulty.
    pub fn retry(&mut self) -> Result<Phase, SessionError> {
        self.require_phase("retry", &[Phase::Error])?;
        self.start(self.difficulty)
    }

    /// Check a typed answer to the current puzzle.
    ///
    /// A correct answer counts a solved puzzle and may unlock an achievement,
    /// announced until `now` plus the configured notification duration.
    pub fn submit_answer(&mut self, input: &str, now: Instant) -> Result<Feedback, SessionError> {
        self.require_phase("submit an answer", &[Phase::Playing])?;
        if self.problem_solved {
            return Err(SessionError::AlreadySolved);
        }
        let Some(step) = &self.current_step else {
            return Err(SessionError::InvalidPhase {
                action: "submit an answer",
                phase: self.phase,
            });
        };

        let feedback = if step.is_correct(input) {
            self.cues.push(SoundCue::Correct);
            self.problem_solved = true;
            let stats = self.stats.record_puzzle_solved();
            self.check_achievements(stats, now);
            Feedback::Correct
        } else {
            self.cues.push(SoundCue::Incorrect);
            Feedback::Incorrect
        };

        self.feedback = Some(feedback);
        Ok(feedback)
    }

    /// Follow one of the offered paths to the next step of the story.
    ///
    /// Only possible after the current puzzle is solved. Lands in `GameOver`
    /// when the next step concludes the story, `Playing` otherwise, and
    /// `Error` if the story could not be fetched.
    pub fn select_choice(&mut self, choice: &str) -> Result<Phase, SessionError> {
        self.require_phase("choose a path", &[Phase::Playing])?;
        if !self.problem_solved {
            return Err(SessionError::PuzzleUnsolved);
        }
        if !self.current_step.as_ref().is_some_and(|s| s.offers(choice)) {
            return Err(SessionError::UnknownChoice(choice.to_string()));
        }

        self.cues.push(SoundCue::Choice);
        self.feedback = None;
        self.problem_solved = false;

        match self.generator.next_step(Some(choice), self.difficulty) {
            Ok(step) => {
                let concluded = step.is_conclusion();
                self.show_step(step);
                if concluded {
                    self.cues.push(SoundCue::GameOver);
                    self.phase = Phase::GameOver;
                    tracing::info!(quest = %self.quest_id, "Adventure concluded");
                } else {
                    self.phase = Phase::Playing;
                }
            }
            Err(e) => self.fail(e.user_message()),
        }
        Ok(self.phase)
    }

    /// Return to the start screen.
    ///
    /// Leaving a concluded story counts a completed quest, which may unlock an
    /// achievement. Leaving from any other screen just resets the story.
    pub fn restart(&mut self, now: Instant) {
        let finished_quest = self.phase == Phase::GameOver;

        self.current_step = None;
        self.feedback = None;
        self.problem_solved = false;
        self.error = None;
        self.phase = Phase::Start;

        if finished_quest {
            let stats = self.stats.record_quest_completed();
            tracing::info!(
                quest = %self.quest_id,
                quests_completed = stats.quests_completed,
                "Quest completed"
            );
            self.check_achievements(stats, now);
        }
    }

    /// The unlock toast, if one is still visible at `now`.
    pub fn active_notification(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible(now))
    }

    /// Drop the unlock toast once it has expired.
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notification = None;
        }
    }

    /// Sounds queued since the last call, oldest first.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn quest_id(&self) -> QuestId {
        self.quest_id
    }

    pub fn current_step(&self) -> Option<&GameStep> {
        self.current_step.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn is_problem_solved(&self) -> bool {
        self.problem_solved
    }

    /// Message for the error screen.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Stats {
        self.stats.snapshot()
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    fn require_phase(&self, action: &'static str, allowed: &[Phase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn show_step(&mut self, step: GameStep) {
        tracing::debug!(quest = %self.quest_id, problem = %step.problem, "Showing story step");
        self.current_step = Some(step);
    }

    fn fail(&mut self, message: &str) {
        tracing::warn!(quest = %self.quest_id, "Story step failed, showing error screen");
        self.error = Some(message.to_string());
        self.phase = Phase::Error;
    }

    fn check_achievements(&mut self, stats: Stats, now: Instant) {
        let Some(unlocked) = evaluate(&stats, &self.achievements) else {
            return;
        };

        merge_unlock(&mut self.achievements, &unlocked);
        tracing::info!(
            quest = %self.quest_id,
            achievement = %unlocked.id,
            "Achievement unlocked: {}",
            unlocked.name
        );
        self.notification = Some(Notification::new(
            unlocked,
            now,
            self.config.notification_duration(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoryError;
    use quest_rules::{ARITHMANCER_APPRENTICE, FIRST_STEP, QUEST_COMPLETE};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Replays canned steps; `None` entries fail the request.
    struct Scripted {
        steps: RefCell<VecDeque<Option<GameStep>>>,
        requests: RefCell<Vec<(Option<String>, Difficulty)>>,
    }

    impl Scripted {
        fn new(steps: Vec<Option<GameStep>>) -> Self {
            Self {
                steps: RefCell::new(steps.into()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl StoryGenerator for Scripted {
        fn next_step(
            &self,
            choice: Option<&str>,
            difficulty: Difficulty,
        ) -> Result<GameStep, StoryError> {
            self.requests
                .borrow_mut()
                .push((choice.map(str::to_string), difficulty));
            self.steps
                .borrow_mut()
                .pop_front()
                .flatten()
                .ok_or_else(|| StoryError::Transport("connection refused".to_string()))
        }
    }

    fn step(answer: f64, choices: &[&str]) -> GameStep {
        GameStep {
            story: "The path forks beneath the old oak.".to_string(),
            problem: "6 * 7".to_string(),
            correct_answer: answer,
            choices: choices.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn session(steps: Vec<Option<GameStep>>) -> GameSession<Scripted> {
        GameSession::new(Scripted::new(steps), SessionConfig::default())
    }

    #[test]
    fn test_new_session() {
        let game = session(vec![]);
        assert_eq!(game.phase(), Phase::Start);
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert_eq!(game.stats(), Stats::default());
        assert_eq!(game.achievements().len(), 5);
        assert!(game.current_step().is_none());
    }

    #[test]
    fn test_start_success() {
        let mut game = session(vec![Some(step(42.0, &["Left", "Right"]))]);

        assert_eq!(game.start(Difficulty::Hard), Ok(Phase::Playing));
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.current_step().unwrap().problem, "6 * 7");
        assert_eq!(game.take_cues(), vec![SoundCue::Start]);
        assert_eq!(
            game.generator.requests.borrow()[0],
            (None, Difficulty::Hard)
        );
    }

    #[test]
    fn test_start_failure_and_retry() {
        let mut game = session(vec![None, Some(step(42.0, &["Left"]))]);

        assert_eq!(game.start(Difficulty::Easy), Ok(Phase::Error));
        assert_eq!(game.error(), Some(crate::error::STORY_FAILURE_MESSAGE));
        assert_eq!(game.stats(), Stats::default());

        assert_eq!(game.retry(), Ok(Phase::Playing));
        assert!(game.error().is_none());
        assert_eq!(game.generator.requests.borrow()[1], (None, Difficulty::Easy));
    }

    #[test]
    fn test_retry_only_from_error() {
        let mut game = session(vec![]);
        assert!(matches!(
            game.retry(),
            Err(SessionError::InvalidPhase { phase: Phase::Start, .. })
        ));
    }

    #[test]
    fn test_correct_answer_unlocks_first_step() {
        let mut game = session(vec![Some(step(42.0, &["Left"]))]);
        let now = Instant::now();
        game.start(Difficulty::Medium).unwrap();
        game.take_cues();

        assert_eq!(game.submit_answer("42", now), Ok(Feedback::Correct));
        assert!(game.is_problem_solved());
        assert_eq!(game.stats(), Stats::new(1, 0));
        assert_eq!(game.take_cues(), vec![SoundCue::Correct]);

        let toast = game.active_notification(now).unwrap();
        assert_eq!(toast.achievement.id, FIRST_STEP);
        assert!(toast.achievement.unlocked);
        assert!(game.achievements()[0].unlocked);

        let later = now + Duration::from_secs(4);
        assert!(game.active_notification(later).is_none());
        game.dismiss_expired(later);
        assert!(game.notification.is_none());
    }

    #[test]
    fn test_incorrect_answer() {
        let mut game = session(vec![Some(step(42.0, &["Left"]))]);
        game.start(Difficulty::Medium).unwrap();

        assert_eq!(game.submit_answer("41", Instant::now()), Ok(Feedback::Incorrect));
        assert_eq!(game.feedback().unwrap().message(), "Not quite! Try another calculation.");
        assert!(!game.is_problem_solved());
        assert_eq!(game.stats(), Stats::default());
        assert!(game.active_notification(Instant::now()).is_none());
    }

    #[test]
    fn test_answer_after_solving_is_rejected() {
        let mut game = session(vec![Some(step(42.0, &["Left"]))]);
        let now = Instant::now();
        game.start(Difficulty::Medium).unwrap();
        game.submit_answer("42", now).unwrap();

        assert_eq!(game.submit_answer("42", now), Err(SessionError::AlreadySolved));
        assert_eq!(game.stats(), Stats::new(1, 0));
    }

    #[test]
    fn test_choice_requires_solved_puzzle_and_offered_choice() {
        let mut game = session(vec![Some(step(42.0, &["Left"]))]);
        game.start(Difficulty::Medium).unwrap();

        assert_eq!(game.select_choice("Left"), Err(SessionError::PuzzleUnsolved));

        game.submit_answer("42", Instant::now()).unwrap();
        assert_eq!(
            game.select_choice("Up"),
            Err(SessionError::UnknownChoice("Up".to_string()))
        );
    }

    #[test]
    fn test_choice_to_conclusion_and_restart() {
        let mut game = session(vec![
            Some(step(42.0, &["Left"])),
            Some(step(12.0, &[])),
        ]);
        let now = Instant::now();
        game.start(Difficulty::Medium).unwrap();
        game.submit_answer("42", now).unwrap();
        game.take_cues();

        assert_eq!(game.select_choice("Left"), Ok(Phase::GameOver));
        assert_eq!(game.take_cues(), vec![SoundCue::Choice, SoundCue::GameOver]);
        assert!(game.feedback().is_none());
        assert_eq!(
            game.generator.requests.borrow()[1],
            (Some("Left".to_string()), Difficulty::Medium)
        );

        let later = now + Duration::from_secs(10);
        game.restart(later);

        assert_eq!(game.phase(), Phase::Start);
        assert!(game.current_step().is_none());
        assert_eq!(game.stats(), Stats::new(1, 1));
        assert_eq!(
            game.active_notification(later).unwrap().achievement.id,
            QUEST_COMPLETE
        );
    }

    #[test]
    fn test_new_unlock_replaces_toast_with_full_duration() {
        let mut game = session(vec![
            Some(step(1.0, &["Onward"])),
            Some(step(2.0, &[])),
        ]);
        let t0 = Instant::now();
        game.start(Difficulty::Easy).unwrap();
        game.submit_answer("1", t0).unwrap();
        assert_eq!(
            game.active_notification(t0).unwrap().achievement.id,
            FIRST_STEP
        );

        game.select_choice("Onward").unwrap();
        game.restart(t0 + Duration::from_secs(3));

        let toast = game.active_notification(t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(toast.achievement.id, QUEST_COMPLETE);
        assert_eq!(toast.expires_at, t0 + Duration::from_secs(7));
        assert!(game
            .active_notification(t0 + Duration::from_millis(6_999))
            .is_some());
        assert!(game.active_notification(t0 + Duration::from_secs(7)).is_none());
    }

    #[test]
    fn test_fifth_puzzle_unlocks_apprentice() {
        let steps = (0..5).map(|_| Some(step(6.0, &["Deeper"]))).collect();
        let mut game = session(steps);
        let now = Instant::now();
        game.start(Difficulty::Easy).unwrap();

        let mut unlocked = Vec::new();
        for turn in 0..5 {
            game.submit_answer("6", now).unwrap();
            if let Some(toast) = game.active_notification(now) {
                if !unlocked.contains(&toast.achievement.id) {
                    unlocked.push(toast.achievement.id.clone());
                }
            }
            if turn < 4 {
                game.select_choice("Deeper").unwrap();
            }
        }

        assert_eq!(game.stats(), Stats::new(5, 0));
        assert_eq!(unlocked, [FIRST_STEP, ARITHMANCER_APPRENTICE]);
        assert_eq!(quest_rules::unlocked_count(game.achievements()), 2);
    }

    #[test]
    fn test_choice_failure_keeps_progress() {
        let mut game = session(vec![Some(step(42.0, &["Left"])), None]);
        game.start(Difficulty::Medium).unwrap();
        game.submit_answer("42", Instant::now()).unwrap();

        assert_eq!(game.select_choice("Left"), Ok(Phase::Error));
        assert_eq!(game.error(), Some(crate::error::STORY_FAILURE_MESSAGE));
        assert_eq!(game.stats(), Stats::new(1, 0));
        assert!(game.achievements()[0].unlocked);
    }

    #[test]
    fn test_restart_without_conclusion_counts_nothing() {
        let mut game = session(vec![Some(step(42.0, &["Left"]))]);
        game.start(Difficulty::Medium).unwrap();

        game.restart(Instant::now());

        assert_eq!(game.phase(), Phase::Start);
        assert_eq!(game.stats(), Stats::default());
    }

    #[test]
    fn test_answer_before_start_is_rejected() {
        let mut game = session(vec![]);
        assert!(matches!(
            game.submit_answer("1", Instant::now()),
            Err(SessionError::InvalidPhase { phase: Phase::Start, .. })
        ));
    }
}
