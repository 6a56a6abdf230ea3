//! Seeded randomness for question selection.
//!
//! One `QuizRng` lives in the engine. Every `add_group` takes the next
//! [`GroupStreams`] from it: a draw stream that picks the group's questions
//! from the source and a shuffle stream that orders them. Keeping the two
//! apart means a source that consumes more or fewer random numbers never
//! changes the play order of the questions it returned.
//!
//! ```
//! use trivia_engine::core::QuizRng;
//!
//! let mut a = QuizRng::new(42);
//! let mut b = QuizRng::new(42);
//!
//! let mut first = a.next_group();
//! let mut same = b.next_group();
//! assert_eq!(first.draw.gen_range(0..1000), same.draw.gen_range(0..1000));
//!
//! let second = a.next_group();
//! assert_ne!(first.draw.seed(), second.draw.seed());
//! ```

use std::hash::{Hash, Hasher};
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// ChaCha8 generator tagged with the seed it was built from.
#[derive(Clone, Debug)]
pub struct QuizRng {
    inner: ChaCha8Rng,
    seed: u64,
    groups_issued: u64,
}

/// Independent streams handed to one group.
#[derive(Clone, Debug)]
pub struct GroupStreams {
    /// Passed to the question source.
    pub draw: QuizRng,
    /// Orders the drawn questions.
    pub shuffle: QuizRng,
}

/// SplitMix64 finalizer; spreads nearby seeds across the whole range.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl QuizRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            groups_issued: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Streams for the next group to join.
    ///
    /// The n-th call on RNGs with equal seeds yields equal streams, whatever
    /// was generated from the parent in between.
    pub fn next_group(&mut self) -> GroupStreams {
        self.groups_issued += 1;
        let group_seed = mix(self.seed ^ mix(self.groups_issued));
        let base = Self::new(group_seed);
        GroupStreams {
            draw: base.for_context("draw"),
            shuffle: base.for_context("shuffle"),
        }
    }

    /// Named stream derived from this RNG's seed.
    ///
    /// Uses `FxHasher`, so a name maps to the same stream on every platform
    /// and toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        context.hash(&mut hasher);
        Self::new(mix(self.seed ^ hasher.finish()))
    }

    pub fn gen_range(&mut self, range: Range<u64>) -> u64 {
        self.inner.gen_range(range)
    }

    /// `true` with the given probability, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Up to `amount` distinct elements in random order. A short slice is
    /// returned whole, shuffled.
    pub fn sample<T: Clone>(&mut self, pool: &[T], amount: usize) -> Vec<T> {
        pool.choose_multiple(&mut self.inner, amount.min(pool.len()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
