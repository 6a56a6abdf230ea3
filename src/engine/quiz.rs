//! The quiz state machine.

use log::{debug, info, trace, warn};

use crate::bank::QuestionSource;
use crate::clock::{FiredTimer, ManualScheduler, Scheduler, TimerHandle, TimerKind};
use crate::core::{
    AnswerOutcome, Difficulty, EngineSnapshot, EngineState, Group, GroupId, GroupStreams, Outcome, Question,
    QuizConfig, QuizError, QuizEvent, QuizResult, QuizRng, TurnOrder, TurnRecord,
};

/// Turn-based trivia engine over a fixed set of groups.
///
/// The engine owns its state and holds at most one countdown tick and one
/// turn transition with the injected scheduler at any time. All mutation
/// happens inside commands or inside [`QuizEngine::advance`], which
/// dispatches due timers.
///
/// ## Example
///
/// ```
/// use trivia_engine::bank::SequentialSource;
/// use trivia_engine::core::{Difficulty, Question, QuizConfig};
/// use trivia_engine::QuizEngine;
///
/// let source = SequentialSource::from_questions(
///     [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
///         .into_iter()
///         .map(|tier| Question::new(format!("{tier}?"), ["yes", "no"], "yes", tier).unwrap()),
/// );
/// let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), source);
///
/// engine.initialize(1).unwrap();
/// engine.add_group("Owls").unwrap();
/// engine.start().unwrap();
/// assert_eq!(engine.remaining_seconds(), 30);
///
/// let outcome = engine.submit_answer("yes").unwrap();
/// assert!(outcome.is_correct());
/// assert_eq!(engine.groups()[0].score(), 25);
/// ```
pub struct QuizEngine<Q, S> {
    config: QuizConfig,
    source: Q,
    scheduler: S,
    rng: QuizRng,
    state: EngineState,
    tick: Option<TimerHandle>,
    transition: Option<TimerHandle>,
    events: Vec<QuizEvent>,
}

impl<Q: QuestionSource> QuizEngine<Q, ManualScheduler> {
    /// Engine driven by a virtual clock starting at zero.
    pub fn with_manual_clock(config: QuizConfig, source: Q) -> Self {
        Self::new(config, source, ManualScheduler::new())
    }
}

impl<Q: QuestionSource, S: Scheduler> QuizEngine<Q, S> {
    /// Create an engine in its post-construction state.
    pub fn new(config: QuizConfig, source: Q, scheduler: S) -> Self {
        let rng = QuizRng::new(config.seed);
        let state = EngineState::new(config.seconds_per_question);
        Self {
            config,
            source,
            scheduler,
            rng,
            state,
            tick: None,
            transition: None,
            events: Vec::new(),
        }
    }

    // === Commands ===

    /// Reset everything and prepare a game with `questions_per_tier`
    /// questions per difficulty tier for every group.
    pub fn initialize(&mut self, questions_per_tier: usize) -> QuizResult<()> {
        if questions_per_tier == 0 {
            return Err(QuizError::InvalidQuestionCount(questions_per_tier));
        }

        self.reset();
        self.state.total_questions_per_group = questions_per_tier * Difficulty::COUNT;
        info!(
            "Initialized quiz: {} questions per tier, {} per group",
            questions_per_tier, self.state.total_questions_per_group
        );
        Ok(())
    }

    /// Register a group and draw its own shuffled question set.
    ///
    /// Every group draws independently, so groups generally see different
    /// questions in a different order.
    pub fn add_group(&mut self, name: &str) -> QuizResult<GroupId> {
        if name.trim().is_empty() {
            return Err(QuizError::EmptyGroupName);
        }
        if self.state.total_questions_per_group == 0 {
            return Err(QuizError::NotInitialized);
        }

        let id = GroupId::try_from(self.state.groups.len())?;
        let per_tier = self.state.questions_per_tier();
        let GroupStreams { mut draw, mut shuffle } = self.rng.next_group();

        let mut questions: Vec<Question> = Vec::with_capacity(per_tier * Difficulty::COUNT);
        for tier in Difficulty::ALL {
            questions.extend(self.source.draw(tier, per_tier, &mut draw));
        }
        shuffle.shuffle(&mut questions);

        if questions.len() < self.state.total_questions_per_group {
            warn!(
                "Group {:?} received {} of {} questions",
                name,
                questions.len(),
                self.state.total_questions_per_group
            );
        }
        if self.state.is_running {
            debug!("Group {:?} added while a game is running", name);
        }

        let question_count = questions.len();
        self.state.groups.push(Group::new(id, name, questions));
        self.events.push(QuizEvent::GroupAdded { group: id, question_count });
        debug!("Added {} ({:?}) with {} questions", id, name, question_count);
        Ok(id)
    }

    /// Start the game with the first group that has questions.
    pub fn start(&mut self) -> QuizResult<()> {
        if self.state.groups.is_empty() {
            return Err(QuizError::NoGroups);
        }
        if self.state.is_running {
            return Err(QuizError::AlreadyRunning);
        }
        let first = self.first_playable(0).ok_or(QuizError::NoQuestions)?;

        self.cancel_transition();
        self.state.is_running = true;
        self.state.active_group_index = first;
        info!("Quiz started with {} groups", self.state.groups.len());
        self.begin_question();
        Ok(())
    }

    /// Answer the live question for the active group.
    ///
    /// Returns `None` and changes nothing when no question is live.
    pub fn submit_answer(&mut self, answer: &str) -> Option<AnswerOutcome> {
        if !self.state.is_question_live {
            trace!("Ignoring answer {:?}: no live question", answer);
            return None;
        }
        let question = self.state.current_question()?;
        let correct = question.is_correct(answer);
        let difficulty = question.difficulty();

        self.cancel_tick();
        self.state.selected_answer = Some(answer.to_string());
        self.state.is_question_live = false;

        let (outcome, points) = if correct {
            let points = self.config.scoring.points_for(difficulty, self.state.remaining_seconds);
            (Outcome::Correct, points)
        } else {
            (Outcome::Incorrect, 0)
        };

        let resolved = self.resolve(Some(answer.to_string()), outcome, points);
        self.events.push(QuizEvent::Answered {
            group: resolved.group,
            outcome,
            points,
        });
        self.advance_turn();
        Some(resolved)
    }

    /// Cancel all timers and return to the post-construction state.
    ///
    /// The RNG keeps its position, so a later game draws fresh questions.
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.cancel_transition();
        self.state = EngineState::new(self.config.seconds_per_question);
        self.events.clear();
        self.events.push(QuizEvent::Reset);
        debug!("Engine reset");
    }

    /// Move time forward by `elapsed_ms`, dispatching every timer that
    /// comes due, in order. Returns the number of timers dispatched.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let deadline = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut dispatched = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            dispatched += 1;
            self.on_timer(timer);
        }
        self.scheduler.advance_to(deadline);
        dispatched
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Full engine state.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// All groups in turn order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.state.groups
    }

    /// The group whose turn it is.
    #[must_use]
    pub fn current_group(&self) -> Option<&Group> {
        self.state.active_group()
    }

    #[must_use]
    pub fn active_group_index(&self) -> usize {
        self.state.active_group_index
    }

    /// The active group's current question; `None` once it is exhausted.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    /// Group and question index of the live question; `None` between questions.
    ///
    /// Compare two readings to tell whether the same question is still up.
    #[must_use]
    pub fn live_turn(&self) -> Option<(GroupId, usize)> {
        if !self.state.is_question_live {
            return None;
        }
        self.state
            .active_group()
            .map(|g| (g.id(), g.current_question_index()))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    #[must_use]
    pub fn is_question_live(&self) -> bool {
        self.state.is_question_live
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Groups sharing the top score. Empty until the game is over.
    #[must_use]
    pub fn winners(&self) -> Vec<&Group> {
        self.state.winners()
    }

    /// Groups ranked by score.
    #[must_use]
    pub fn standings(&self) -> Vec<&Group> {
        self.state.standings()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.state.selected_answer.as_deref()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.state.last_outcome.as_ref()
    }

    /// Whether the most recent resolution was a correct answer.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.state.last_outcome.as_ref().map(AnswerOutcome::is_correct)
    }

    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.state.history
    }

    #[must_use]
    pub fn total_questions_per_group(&self) -> usize {
        self.state.total_questions_per_group
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    #[must_use]
    pub fn source(&self) -> &Q {
        &self.source
    }

    // === Internal procedures ===

    fn on_timer(&mut self, timer: FiredTimer) {
        match timer.kind {
            TimerKind::Tick if self.tick == Some(timer.handle) => self.on_tick(),
            TimerKind::Transition if self.transition == Some(timer.handle) => {
                self.transition = None;
                self.begin_question();
            }
            _ => trace!("Ignoring stale {} ({:?})", timer.handle, timer.kind),
        }
    }

    fn begin_question(&mut self) {
        self.cancel_tick();
        let Some(group) = self.state.active_group() else {
            return;
        };
        let group_id = group.id();
        let question_index = group.current_question_index();

        self.state.is_question_live = true;
        self.state.selected_answer = None;
        self.state.remaining_seconds = self.state.seconds_per_question;
        self.tick = Some(
            self.scheduler
                .schedule_repeating(self.config.tick_interval_ms, TimerKind::Tick),
        );

        self.events.push(QuizEvent::QuestionStarted {
            group: group_id,
            question_index,
            seconds: self.state.seconds_per_question,
        });
        debug!("{} question {} is live", group_id, question_index);
    }

    fn on_tick(&mut self) {
        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            trace!("Tick: {}s left", self.state.remaining_seconds);
            self.events.push(QuizEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
            });
        } else {
            self.handle_timeout();
        }
    }

    fn handle_timeout(&mut self) {
        self.cancel_tick();
        self.state.is_question_live = false;

        let resolved = self.resolve(None, Outcome::TimedOut, 0);
        self.events.push(QuizEvent::TimedOut { group: resolved.group });
        debug!("{} timed out", resolved.group);
        self.advance_turn();
    }

    /// Score, record history, and remember the outcome of the current question.
    fn resolve(&mut self, answer: Option<String>, outcome: Outcome, points: u32) -> AnswerOutcome {
        let remaining_seconds = self.state.remaining_seconds;
        let (group, question_index, difficulty, correct_answer) = match self.state.active_group_mut() {
            Some(group) => {
                group.award(points);
                let index = group.current_question_index();
                let (difficulty, correct) = group
                    .current_question()
                    .map(|q| (q.difficulty(), q.correct_answer().to_string()))
                    .unwrap_or((Difficulty::Easy, String::new()));
                (group.id(), index, difficulty, correct)
            }
            None => (GroupId::new(0), 0, Difficulty::Easy, String::new()),
        };

        debug!("{} {:?}: +{} points", group, outcome, points);
        self.state.history.push(TurnRecord {
            group,
            question_index,
            difficulty,
            answer,
            outcome,
            points,
            remaining_seconds,
        });

        let resolved = AnswerOutcome {
            group,
            outcome,
            points,
            correct_answer,
        };
        self.state.last_outcome = Some(resolved.clone());
        resolved
    }

    fn advance_turn(&mut self) {
        let from = self.state.active_group_index;
        if let Some(group) = self.state.active_group_mut() {
            group.advance();
        }

        let Some(next) = self.next_group_after(from) else {
            self.finish();
            return;
        };

        if next != from {
            let from_id = self.state.groups[from].id();
            let to_id = self.state.groups[next].id();
            self.events.push(QuizEvent::TurnPassed { from: from_id, to: to_id });
            debug!("Turn passes from {} to {}", from_id, to_id);
        }
        self.state.active_group_index = next;

        self.cancel_transition();
        if self.config.transition_delay_ms == 0 {
            self.begin_question();
        } else {
            self.transition = Some(
                self.scheduler
                    .schedule_once(self.config.transition_delay_ms, TimerKind::Transition),
            );
        }
    }

    /// Next group to play after `from` resolved a question, per turn order.
    fn next_group_after(&self, from: usize) -> Option<usize> {
        match self.config.turn_order {
            TurnOrder::Sequential => self.first_playable(from),
            TurnOrder::RoundRobin => {
                let count = self.state.groups.len();
                (1..=count)
                    .map(|step| (from + step) % count)
                    .find(|&i| !self.state.groups[i].is_exhausted())
            }
        }
    }

    /// First group at or after `start` that still has questions.
    fn first_playable(&self, start: usize) -> Option<usize> {
        (start..self.state.groups.len()).find(|&i| !self.state.groups[i].is_exhausted())
    }

    fn finish(&mut self) {
        self.cancel_tick();
        self.cancel_transition();
        self.state.is_running = false;
        self.state.is_question_live = false;

        let winners: Vec<GroupId> = self.state.winners().iter().map(|g| g.id()).collect();
        info!("Quiz over after {} questions, winners: {:?}", self.state.history.len(), winners);
        self.events.push(QuizEvent::GameOver { winners });
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_transition(&mut self) {
        if let Some(handle) = self.transition.take() {
            self.scheduler.cancel(handle);
        }
    }
}
