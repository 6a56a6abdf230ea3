//! Engine configuration.
//!
//! Callers configure the engine at construction by providing:
//! - `ScoringPolicy`: How many points a correct answer earns
//! - `TurnOrder`: How the turn passes between groups
//! - `QuizConfig`: Timing, seed, and the two policies above
//!
//! All values have defaults; use the `with_*` builders to override.

use serde::{Deserialize, Serialize};

use super::question::Difficulty;

/// How the turn passes between groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// A group answers all of its questions before the next group starts.
    #[default]
    Sequential,
    /// The turn passes to the next group after every question, wrapping
    /// around and skipping groups that have no questions left.
    RoundRobin,
}

impl std::str::FromStr for TurnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(TurnOrder::Sequential),
            "round_robin" | "round-robin" | "roundrobin" => Ok(TurnOrder::RoundRobin),
            other => Err(format!("unknown turn order {other:?}")),
        }
    }
}

/// Extra points per difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBonus {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyBonus {
    /// Bonus for the given tier.
    #[must_use]
    pub fn for_tier(&self, tier: Difficulty) -> u32 {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Points awarded for a correct answer.
///
/// `points = base_points + remaining_seconds / speed_bonus_divisor + difficulty_bonus[tier]`
///
/// The default is `10 + floor(remaining_seconds / 2)` with no difficulty
/// bonus. Wrong answers and timeouts always score zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Flat award for any correct answer.
    pub base_points: u32,

    /// Remaining seconds are divided by this (rounding down) to get the
    /// speed bonus. `None` disables the speed bonus.
    pub speed_bonus_divisor: Option<u32>,

    /// Per-tier bonus.
    pub difficulty_bonus: DifficultyBonus,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            base_points: 10,
            speed_bonus_divisor: Some(2),
            difficulty_bonus: DifficultyBonus::default(),
        }
    }
}

impl ScoringPolicy {
    /// Base points only.
    #[must_use]
    pub fn base_only(base_points: u32) -> Self {
        Self {
            base_points,
            speed_bonus_divisor: None,
            difficulty_bonus: DifficultyBonus::default(),
        }
    }

    #[must_use]
    pub fn without_speed_bonus(mut self) -> Self {
        self.speed_bonus_divisor = None;
        self
    }

    #[must_use]
    pub fn with_speed_bonus_divisor(mut self, divisor: u32) -> Self {
        // Zero would divide by zero in points_for; treat it as disabled.
        self.speed_bonus_divisor = (divisor > 0).then_some(divisor);
        self
    }

    #[must_use]
    pub fn with_difficulty_bonus(mut self, easy: u32, medium: u32, hard: u32) -> Self {
        self.difficulty_bonus = DifficultyBonus { easy, medium, hard };
        self
    }

    /// Points for a correct answer given with `remaining_seconds` left on
    /// the clock.
    #[must_use]
    pub fn points_for(&self, tier: Difficulty, remaining_seconds: u32) -> u32 {
        let speed = match self.speed_bonus_divisor {
            Some(divisor) if divisor > 0 => remaining_seconds / divisor,
            _ => 0,
        };
        self.base_points
            .saturating_add(speed)
            .saturating_add(self.difficulty_bonus.for_tier(tier))
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Countdown length for every question.
    pub seconds_per_question: u32,

    /// Interval of the countdown tick, in milliseconds.
    pub tick_interval_ms: u64,

    /// Pause between a resolved question and the next one, in milliseconds.
    /// Zero starts the next question immediately.
    pub transition_delay_ms: u64,

    /// Turn passing policy.
    pub turn_order: TurnOrder,

    /// Scoring policy.
    pub scoring: ScoringPolicy,

    /// Seed for question draws and shuffles.
    pub seed: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: 30,
            tick_interval_ms: 1000,
            transition_delay_ms: 2000,
            turn_order: TurnOrder::Sequential,
            scoring: ScoringPolicy::default(),
            seed: 42,
        }
    }
}

impl QuizConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = seconds;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        assert!(interval_ms > 0, "Tick interval must be positive");
        self.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_transition_delay_ms(mut self, delay_ms: u64) -> Self {
        self.transition_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.turn_order = turn_order;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
