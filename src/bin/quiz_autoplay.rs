//! Simulated quiz night: scripted groups play a full game over virtual time.
//!
//! Environment overrides:
//!   - `QUIZ_SEED` (default 42): seed for the engine and the simulated players
//!   - `QUIZ_GROUPS` (default 3): number of groups
//!   - `QUIZ_PER_TIER` (default 2): questions per difficulty tier per group
//!   - `QUIZ_TURN_ORDER` (default `sequential`): `sequential` or `round_robin`
//!
//! Set `RUST_LOG=debug` to follow every turn.

use trivia_engine::core::{Difficulty, Question, QuizConfig, QuizEvent, QuizRng, TurnOrder};
use trivia_engine::{QuestionBank, QuizEngine};

const ANIMALS: [&str; 8] = ["Owls", "Foxes", "Otters", "Lynxes", "Herons", "Badgers", "Ravens", "Moles"];

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Arithmetic questions, harder per tier, so the bank never runs dry.
fn build_bank(per_tier: usize) -> Result<QuestionBank, trivia_engine::QuizError> {
    let mut bank = QuestionBank::new();
    for (scale, tier) in [(10, Difficulty::Easy), (100, Difficulty::Medium), (1000, Difficulty::Hard)] {
        for i in 0..(per_tier * 4).max(8) as i64 {
            let (a, b) = (scale + i * 7, scale / 2 + i * 3);
            let answer = a + b;
            let options = [answer, answer + 1, answer - 1, answer + 10].map(|n| n.to_string());
            bank.add(Question::new(format!("{a} + {b}?"), options, answer.to_string(), tier)?);
        }
    }
    Ok(bank)
}

fn main() {
    env_logger::init();

    let seed: u64 = env_or("QUIZ_SEED", 42);
    let group_count: usize = env_or("QUIZ_GROUPS", 3).clamp(1, ANIMALS.len());
    let per_tier: usize = env_or("QUIZ_PER_TIER", 2).max(1);
    let turn_order: TurnOrder = env_or("QUIZ_TURN_ORDER", TurnOrder::Sequential);

    let bank = match build_bank(per_tier) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Failed to build question bank: {e}");
            std::process::exit(1);
        }
    };

    let config = QuizConfig::default().with_seed(seed).with_turn_order(turn_order);
    let mut engine = QuizEngine::with_manual_clock(config, bank);
    let mut players = QuizRng::new(seed).for_context("players");

    let setup = engine
        .initialize(per_tier)
        .and_then(|()| ANIMALS[..group_count].iter().try_for_each(|name| engine.add_group(name).map(|_| ())))
        .and_then(|()| engine.start());
    if let Err(e) = setup {
        eprintln!("Failed to set up the quiz: {e}");
        std::process::exit(1);
    }

    // Accuracy differs per group so the standings are not a coin toss.
    let accuracy: Vec<f64> = (0..group_count).map(|i| 0.45 + 0.1 * i as f64).collect();

    println!("Quiz night: {group_count} groups, {} questions each, {turn_order:?} turns", per_tier * 3);

    while engine.is_running() {
        if !engine.is_question_live() {
            engine.advance(1000);
            continue;
        }

        let turn = engine.live_turn();
        let group = engine.active_group_index();
        let Some(question) = engine.current_question().cloned() else {
            engine.advance(1000);
            continue;
        };

        // Think time; anything past the countdown is a timeout, and the
        // group may already be facing its next question.
        let think_ms = players.gen_range(1..40) * 1000;
        engine.advance(think_ms);
        if engine.live_turn() != turn {
            continue;
        }

        let answer = if players.gen_bool(accuracy[group]) {
            question.correct_answer().to_string()
        } else {
            let wrong: Vec<&String> = question
                .options()
                .iter()
                .filter(|o| !question.is_correct(o))
                .collect();
            players
                .choose(&wrong)
                .map_or_else(|| question.correct_answer().to_string(), |o| o.to_string())
        };
        engine.submit_answer(&answer);
    }

    for event in engine.drain_events() {
        if let QuizEvent::GameOver { winners } = event {
            log::info!("Game over event, {} winner(s)", winners.len());
        }
    }

    println!();
    println!("{:<4} {:<10} {:>6}", "#", "Group", "Score");
    for (rank, group) in engine.standings().iter().enumerate() {
        println!("{:<4} {:<10} {:>6}", rank + 1, group.name(), group.score());
    }

    let winners: Vec<&str> = engine.winners().iter().map(|g| g.name()).collect();
    println!();
    println!("Winner(s): {}", winners.join(", "));
}
