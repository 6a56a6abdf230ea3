//! # trivia-engine
//!
//! A turn-based, multi-group trivia quiz engine.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: One `EngineState` per engine, no globals. `reset`
//!    returns it to the post-construction defaults.
//!
//! 2. **Injected Time**: Countdown ticks and turn transitions go through a
//!    `Scheduler`, so tests run whole games without sleeping.
//!
//! 3. **Reproducible Randomness**: Question draws and shuffles use a seeded
//!    ChaCha8 RNG, forked per group.
//!
//! ## Modules
//!
//! - `core`: Questions, groups, state, outcomes, events, RNG, configuration
//! - `bank`: Question sources (random bank, sequential source)
//! - `clock`: Scheduler trait and the virtual-time scheduler
//! - `engine`: The quiz state machine

pub mod bank;
pub mod clock;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    AnswerOutcome, Difficulty, EngineSnapshot, EngineState, Group, GroupId, Outcome, Question,
    QuizConfig, QuizError, QuizEvent, QuizResult, QuizRng, ScoringPolicy, TurnOrder, TurnRecord,
};

pub use crate::bank::{QuestionBank, QuestionSource, QuizData, SequentialSource};

pub use crate::clock::{ManualScheduler, Scheduler, TimerHandle, TimerKind};

pub use crate::engine::QuizEngine;
