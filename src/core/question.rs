//! Question records and difficulty tiers.
//!
//! A `Question` is immutable once built: the engine hands out shared
//! references and never edits text, options, or the answer key.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{QuizError, QuizResult};

/// Difficulty tier of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, in draw order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of tiers.
    pub const COUNT: usize = 3;
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// A multiple choice trivia question.
///
/// ## Example
///
/// ```
/// use trivia_engine::core::{Difficulty, Question};
///
/// let q = Question::new(
///     "Capital of France?",
///     ["Paris", "Lyon", "Nice"],
///     "Paris",
///     Difficulty::Easy,
/// ).unwrap();
///
/// assert!(q.is_correct("Paris"));
/// assert!(!q.is_correct("paris"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedQuestion")]
pub struct Question {
    text: String,
    /// SmallVec keeps the usual four options inline.
    options: SmallVec<[String; 4]>,
    correct_answer: String,
    difficulty: Difficulty,
}

/// Wire shape of a `Question`, checked by `Question::new` on the way in.
#[derive(Deserialize)]
struct UncheckedQuestion {
    text: String,
    options: SmallVec<[String; 4]>,
    correct_answer: String,
    difficulty: Difficulty,
}

impl TryFrom<UncheckedQuestion> for Question {
    type Error = QuizError;

    fn try_from(raw: UncheckedQuestion) -> QuizResult<Self> {
        Question::new(raw.text, raw.options, raw.correct_answer, raw.difficulty)
    }
}

impl Question {
    /// Build a question, checking that the answer key is one of the options.
    pub fn new<I, S>(
        text: impl Into<String>,
        options: I,
        correct_answer: impl Into<String>,
        difficulty: Difficulty,
    ) -> QuizResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        let options: SmallVec<[String; 4]> = options.into_iter().map(Into::into).collect();
        let correct_answer = correct_answer.into();

        if options.is_empty() {
            return Err(QuizError::InvalidQuestion {
                text,
                reason: "question has no options".to_string(),
            });
        }
        if !options.iter().any(|o| *o == correct_answer) {
            return Err(QuizError::InvalidQuestion {
                text,
                reason: format!("answer {correct_answer:?} is not one of the options"),
            });
        }

        Ok(Self {
            text,
            options,
            correct_answer,
            difficulty,
        })
    }

    /// Question text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Answer options, in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The answer key.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Difficulty tier this question was drawn from.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Exact, case-sensitive comparison against the answer key.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
