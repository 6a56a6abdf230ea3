//! Participant groups.
//!
//! ## GroupId
//!
//! Type-safe group identifier. Ids are assigned in insertion order, which is
//! also turn order.
//!
//! ## Group
//!
//! A named team with a score, a cursor into its own question list, and the
//! list itself. The list is fixed at creation and shared cheaply with
//! snapshots through `im::Vector`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{QuizError, QuizResult};
use super::question::Question;

/// Group identifier (0-based insertion index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw group index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for GroupId {
    type Error = QuizError;

    /// Id for the group at `index`, failing past `u32::MAX`.
    fn try_from(index: usize) -> QuizResult<Self> {
        u32::try_from(index)
            .map(Self::new)
            .map_err(|_| QuizError::TooManyGroups(index))
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group {}", self.0)
    }
}

/// A participating group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    score: u32,
    current_question_index: usize,
    questions: Vector<Question>,
}

impl Group {
    /// Create a group with score 0 positioned at its first question.
    pub fn new(id: GroupId, name: impl Into<String>, questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            current_question_index: 0,
            questions: questions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Index of the next question this group will be asked.
    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    /// The group's full question list, in play order.
    #[must_use]
    pub fn questions(&self) -> &Vector<Question> {
        &self.questions
    }

    /// Number of questions assigned to this group.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The question at the cursor, or `None` once exhausted.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// True once every assigned question has been played.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current_question_index >= self.questions.len()
    }

    /// Questions not yet played.
    #[must_use]
    pub fn remaining_questions(&self) -> usize {
        self.questions.len().saturating_sub(self.current_question_index)
    }

    pub(crate) fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Move the cursor forward. Never moves past the end of the list.
    pub(crate) fn advance(&mut self) {
        if !self.is_exhausted() {
            self.current_question_index += 1;
        }
    }
}
