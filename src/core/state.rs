//! Engine state: the single aggregate the engine mutates.
//!
//! ## EngineState
//!
//! Canonical game state:
//! - Groups in turn order, and which one is active
//! - Per-question countdown and live flag
//! - Last submitted answer and its outcome
//! - History of resolved questions
//!
//! ## EngineSnapshot
//!
//! Serializable read model for the presentation layer. While a question is
//! live it is shown without its answer key. Between questions, and after the
//! game, the snapshot shows the question that was just resolved, key included.
//! The next question stays out of the snapshot until it goes live.

use serde::{Deserialize, Serialize};

use super::group::{Group, GroupId};
use super::question::{Difficulty, Question};
use super::turn::{AnswerOutcome, TurnRecord};

/// Canonical engine state.
///
/// `Default` is the post-construction state: no groups, zero counters,
/// every flag false.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Groups in insertion order, which is turn order.
    pub groups: Vec<Group>,

    /// Index into `groups` of the group whose turn it is.
    pub active_group_index: usize,

    /// `questions_per_tier * 3`; zero until initialized.
    pub total_questions_per_group: usize,

    /// Countdown length for each question.
    pub seconds_per_question: u32,

    pub is_running: bool,

    /// True while an answer for the current question is accepted.
    pub is_question_live: bool,

    /// Last submitted answer, cleared when a new question starts.
    pub selected_answer: Option<String>,

    pub remaining_seconds: u32,

    /// Resolution of the most recent question.
    pub last_outcome: Option<AnswerOutcome>,

    /// Every resolved question, oldest first.
    pub history: Vec<TurnRecord>,
}

impl EngineState {
    /// Fresh state with the given countdown length.
    #[must_use]
    pub fn new(seconds_per_question: u32) -> Self {
        Self {
            seconds_per_question,
            ..Self::default()
        }
    }

    /// Questions drawn from each tier for every new group.
    #[must_use]
    pub fn questions_per_tier(&self) -> usize {
        self.total_questions_per_group / Difficulty::COUNT
    }

    /// The active group, if the index points at one.
    #[must_use]
    pub fn active_group(&self) -> Option<&Group> {
        self.groups.get(self.active_group_index)
    }

    pub(crate) fn active_group_mut(&mut self) -> Option<&mut Group> {
        self.groups.get_mut(self.active_group_index)
    }

    /// The active group's current question.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.active_group().and_then(Group::current_question)
    }

    /// The question behind the newest history entry.
    #[must_use]
    pub fn last_resolved_question(&self) -> Option<&Question> {
        let record = self.history.last()?;
        self.groups
            .get(record.group.index())?
            .questions()
            .get(record.question_index)
    }

    /// Finished: not running and somebody has played.
    ///
    /// The progress check tells "never started" apart from "finished".
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.is_running && self.groups.iter().any(|g| g.current_question_index() > 0)
    }

    /// Highest score across all groups.
    #[must_use]
    pub fn max_score(&self) -> Option<u32> {
        self.groups.iter().map(Group::score).max()
    }

    /// Every group holding the maximum score. Empty until the game is over.
    #[must_use]
    pub fn winners(&self) -> Vec<&Group> {
        if !self.is_game_over() {
            return Vec::new();
        }
        match self.max_score() {
            Some(max) => self.groups.iter().filter(|g| g.score() == max).collect(),
            None => Vec::new(),
        }
    }

    /// Groups ranked by score, highest first. Ties keep turn order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Group> {
        let mut ranked: Vec<&Group> = self.groups.iter().collect();
        ranked.sort_by(|a, b| b.score().cmp(&a.score()));
        ranked
    }

    /// Build the presentation read model.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let current_question = if self.is_question_live {
            self.current_question().map(|q| QuestionView::new(q, false))
        } else {
            self.last_resolved_question().map(|q| QuestionView::new(q, true))
        };

        EngineSnapshot {
            groups: self
                .groups
                .iter()
                .map(|g| GroupView {
                    id: g.id(),
                    name: g.name().to_string(),
                    score: g.score(),
                    current_question_index: g.current_question_index(),
                    question_count: g.question_count(),
                })
                .collect(),
            active_group: self.is_running.then(|| self.active_group().map(Group::id)).flatten(),
            current_question,
            is_running: self.is_running,
            is_question_live: self.is_question_live,
            is_game_over: self.is_game_over(),
            remaining_seconds: self.remaining_seconds,
            selected_answer: self.selected_answer.clone(),
            last_outcome: self.last_outcome.clone(),
            winners: self.winners().iter().map(|g| g.id()).collect(),
        }
    }
}

/// Group as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub score: u32,
    pub current_question_index: usize,
    pub question_count: usize,
}

/// Question as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    /// `None` while the question is live.
    pub correct_answer: Option<String>,
}

impl QuestionView {
    fn new(question: &Question, reveal: bool) -> Self {
        Self {
            text: question.text().to_string(),
            options: question.options().to_vec(),
            difficulty: question.difficulty(),
            correct_answer: reveal.then(|| question.correct_answer().to_string()),
        }
    }
}

/// Serializable read model of the observable engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub groups: Vec<GroupView>,
    pub active_group: Option<GroupId>,
    /// The live question, or the last resolved one when nothing is live.
    pub current_question: Option<QuestionView>,
    pub is_running: bool,
    pub is_question_live: bool,
    pub is_game_over: bool,
    pub remaining_seconds: u32,
    pub selected_answer: Option<String>,
    pub last_outcome: Option<AnswerOutcome>,
    pub winners: Vec<GroupId>,
}
