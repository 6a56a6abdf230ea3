//! Core engine types: questions, groups, state, outcomes, events, RNG, configuration.
//!
//! This module contains the building blocks the engine is made of. None of
//! them own timers or question sources; those are injected collaborators.

pub mod config;
pub mod error;
pub mod event;
pub mod group;
pub mod question;
pub mod rng;
pub mod state;
pub mod turn;

pub use config::{DifficultyBonus, QuizConfig, ScoringPolicy, TurnOrder};
pub use error::{QuizError, QuizResult};
pub use event::QuizEvent;
pub use group::{Group, GroupId};
pub use question::{Difficulty, Question};
pub use rng::{GroupStreams, QuizRng};
pub use state::{EngineSnapshot, EngineState, GroupView, QuestionView};
pub use turn::{AnswerOutcome, Outcome, TurnRecord};
