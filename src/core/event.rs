//! Engine events for the presentation layer.
//!
//! The engine queues an event every time its observable state changes in a
//! way a UI would redraw for. Callers drain the queue after each command or
//! `advance` call; the engine never reads it back.

use serde::{Deserialize, Serialize};

use super::group::GroupId;
use super::turn::Outcome;

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QuizEvent {
    /// A group joined.
    GroupAdded { group: GroupId, question_count: usize },

    /// A question went live for a group.
    QuestionStarted {
        group: GroupId,
        question_index: usize,
        seconds: u32,
    },

    /// The countdown moved.
    Tick { remaining_seconds: u32 },

    /// A group submitted an answer.
    Answered {
        group: GroupId,
        outcome: Outcome,
        points: u32,
    },

    /// A group ran out of time.
    TimedOut { group: GroupId },

    /// The turn moved to a different group.
    TurnPassed { from: GroupId, to: GroupId },

    /// Every group has exhausted its questions.
    GameOver { winners: Vec<GroupId> },

    /// The engine was reset or re-initialized.
    Reset,
}
