//! Error types for engine setup commands.
//!
//! Only configuration misuse is reported as an error. Runtime misuse from the
//! presentation layer (answering when nothing is live, asking for winners
//! mid-game) is a silent no-op instead.

use thiserror::Error;

/// Errors returned by engine commands and question construction.
///
/// A command that fails leaves the engine state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuizError {
    /// `add_group` was called before `initialize`.
    #[error("engine not initialized: call initialize() before adding groups")]
    NotInitialized,

    /// `initialize` was called with zero questions per tier.
    #[error("questions per difficulty tier must be positive, got {0}")]
    InvalidQuestionCount(usize),

    /// A group name was empty or whitespace only.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// `start` was called with no groups registered.
    #[error("cannot start a game without groups")]
    NoGroups,

    /// `start` was called while a game is in progress.
    #[error("game is already running")]
    AlreadyRunning,

    /// Group ids are `u32`; no more groups can be registered.
    #[error("group limit reached: cannot register group number {0}")]
    TooManyGroups(usize),

    /// Every registered group has an empty question list.
    #[error("no group has any questions to play")]
    NoQuestions,

    /// A question record is malformed.
    #[error("invalid question {text:?}: {reason}")]
    InvalidQuestion {
        /// Question text, for identification.
        text: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result alias for engine operations.
pub type QuizResult<T> = Result<T, QuizError>;
