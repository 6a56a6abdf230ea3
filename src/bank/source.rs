//! The question source trait.

use rustc_hash::FxHashMap;

use crate::core::{Difficulty, Question, QuizRng};

/// Supplies questions to the engine.
///
/// ## Implementation Notes
///
/// - `draw` should sample without replacement within one call
/// - If a pool holds fewer than `count` questions, return what exists
/// - Returned questions must carry the requested `tier`
pub trait QuestionSource {
    /// Draw up to `count` questions from `tier`.
    fn draw(&mut self, tier: Difficulty, count: usize, rng: &mut QuizRng) -> Vec<Question>;

    /// Number of questions available in `tier`.
    fn available(&self, tier: Difficulty) -> usize;
}

impl<T: QuestionSource + ?Sized> QuestionSource for Box<T> {
    fn draw(&mut self, tier: Difficulty, count: usize, rng: &mut QuizRng) -> Vec<Question> {
        (**self).draw(tier, count, rng)
    }

    fn available(&self, tier: Difficulty) -> usize {
        (**self).available(tier)
    }
}

/// Deterministic source: always returns the first `count` questions of a
/// tier, in insertion order, ignoring the RNG.
///
/// ## Example
///
/// ```
/// use trivia_engine::bank::{QuestionSource, SequentialSource};
/// use trivia_engine::core::{Difficulty, Question, QuizRng};
///
/// let mut source = SequentialSource::new();
/// source.push(Question::new("Q1", ["a", "b"], "a", Difficulty::Easy).unwrap());
/// source.push(Question::new("Q2", ["a", "b"], "b", Difficulty::Easy).unwrap());
///
/// let drawn = source.draw(Difficulty::Easy, 1, &mut QuizRng::new(0));
/// assert_eq!(drawn[0].text(), "Q1");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequentialSource {
    tiers: FxHashMap<Difficulty, Vec<Question>>,
}

impl SequentialSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question to its tier.
    pub fn push(&mut self, question: Question) {
        self.tiers.entry(question.difficulty()).or_default().push(question);
    }

    /// Build from any iterator of questions.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut source = Self::new();
        for question in questions {
            source.push(question);
        }
        source
    }
}

impl QuestionSource for SequentialSource {
    fn draw(&mut self, tier: Difficulty, count: usize, _rng: &mut QuizRng) -> Vec<Question> {
        self.tiers
            .get(&tier)
            .map(|pool| pool.iter().take(count).cloned().collect())
            .unwrap_or_default()
    }

    fn available(&self, tier: Difficulty) -> usize {
        self.tiers.get(&tier).map_or(0, Vec::len)
    }
}
