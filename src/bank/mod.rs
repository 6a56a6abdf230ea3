//! Question supply.
//!
//! The engine asks a `QuestionSource` for questions each time a group is
//! added. Sources own their pools; the engine only passes the tier, the
//! count, and its RNG so draws stay reproducible.
//!
//! Two sources ship with the crate:
//! - `QuestionBank`: random sampling without replacement per tier
//! - `SequentialSource`: the first `count` questions of a tier, in order

mod registry;
mod source;

pub use registry::{QuestionBank, QuestionRecord, QuizData};
pub use source::{QuestionSource, SequentialSource};
