//! The quiz engine.
//!
//! `QuizEngine` is the turn scheduler: it draws questions for each group,
//! runs the per-question countdown, scores answers, passes the turn, and
//! decides when the game is over.
//!
//! ## Lifecycle
//!
//! ```text
//! initialize(n) -> add_group(..)* -> start() -> { submit_answer | advance }* -> game over
//!                                                                  reset() returns to the start
//! ```
//!
//! The engine is generic over its two collaborators:
//! - `QuestionSource` supplies questions per difficulty tier
//! - `Scheduler` owns the clock and the timers

mod quiz;

pub use quiz::QuizEngine;
