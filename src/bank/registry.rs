//! Random-sampling question bank.
//!
//! The `QuestionBank` stores every question of a game, partitioned by tier,
//! and draws random subsets from it. It does not know where the questions
//! came from; `QuizData` is a serde shape for callers that load them from
//! JSON or similar.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::source::QuestionSource;
use crate::core::{Difficulty, Question, QuizResult, QuizRng};

/// A question as stored in a bank file. The tier comes from the list it
/// appears in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: SmallVec<[String; 4]>,
    pub answer: String,
}

impl QuestionRecord {
    /// Validate and convert into a `Question` of the given tier.
    pub fn into_question(self, tier: Difficulty) -> QuizResult<Question> {
        Question::new(self.question, self.options, self.answer, tier)
    }
}

/// Question bank contents, one list per tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    #[serde(default)]
    pub easy: Vec<QuestionRecord>,
    #[serde(default)]
    pub medium: Vec<QuestionRecord>,
    #[serde(default)]
    pub hard: Vec<QuestionRecord>,
}

/// Registry of questions by tier.
///
/// ## Example
///
/// ```
/// use trivia_engine::bank::{QuestionBank, QuestionSource};
/// use trivia_engine::core::{Difficulty, Question, QuizRng};
///
/// let mut bank = QuestionBank::new();
/// bank.add(Question::new("Largest planet?", ["Mars", "Jupiter"], "Jupiter", Difficulty::Easy).unwrap());
///
/// let drawn = bank.draw(Difficulty::Easy, 1, &mut QuizRng::new(42));
/// assert_eq!(drawn[0].correct_answer(), "Jupiter");
/// ```
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    tiers: FxHashMap<Difficulty, Vec<Question>>,
}

impl QuestionBank {
    /// Create a new empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a question to its tier.
    pub fn add(&mut self, question: Question) {
        self.tiers.entry(question.difficulty()).or_default().push(question);
    }

    /// Build from already validated questions.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut bank = Self::new();
        for question in questions {
            bank.add(question);
        }
        bank
    }

    /// Build from bank file contents.
    ///
    /// Fails on the first record whose answer is not one of its options.
    pub fn from_data(data: QuizData) -> QuizResult<Self> {
        let mut bank = Self::new();
        let tiers = [
            (Difficulty::Easy, data.easy),
            (Difficulty::Medium, data.medium),
            (Difficulty::Hard, data.hard),
        ];
        for (tier, records) in tiers {
            for record in records {
                bank.add(record.into_question(tier)?);
            }
        }
        Ok(bank)
    }

    /// Questions in a tier.
    #[must_use]
    pub fn tier(&self, tier: Difficulty) -> &[Question] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Check if the bank is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QuestionSource for QuestionBank {
    fn draw(&mut self, tier: Difficulty, count: usize, rng: &mut QuizRng) -> Vec<Question> {
        let pool = self.tier(tier);
        if pool.len() < count {
            log::warn!(
                "{} tier holds {} questions, {} requested",
                tier,
                pool.len(),
                count
            );
        }
        rng.sample(pool, count)
    }

    fn available(&self, tier: Difficulty) -> usize {
        self.tier(tier).len()
    }
}
