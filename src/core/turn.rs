//! Resolution of a single question.
//!
//! Every question ends in exactly one `Outcome`. The engine reports it to the
//! caller as an `AnswerOutcome` and keeps a `TurnRecord` in its history.

use serde::{Deserialize, Serialize};

use super::group::GroupId;
use super::question::Difficulty;

/// How a question was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    TimedOut,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Result of `submit_answer`, also kept as the engine's last outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// The group that answered (or ran out of time).
    pub group: GroupId,
    pub outcome: Outcome,
    /// Points added to the group's score.
    pub points: u32,
    /// The answer key of the resolved question.
    pub correct_answer: String,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// History entry for one resolved question.
///
/// Used for:
/// - Post-game review screens
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The group whose question it was.
    pub group: GroupId,

    /// Position of the question in that group's list.
    pub question_index: usize,

    /// Tier of the question.
    pub difficulty: Difficulty,

    /// Submitted answer, `None` on timeout.
    pub answer: Option<String>,

    pub outcome: Outcome,

    /// Points awarded.
    pub points: u32,

    /// Seconds left on the clock when the question was resolved.
    pub remaining_seconds: u32,
}
