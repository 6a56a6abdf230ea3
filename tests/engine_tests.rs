//! Quiz engine integration tests.
//!
//! These tests play complete games over virtual time and check turn order,
//! scoring, ties, reset, and reproducibility.

use trivia_engine::bank::{QuestionBank, SequentialSource};
use trivia_engine::clock::{ManualScheduler, Scheduler};
use trivia_engine::core::{
    Difficulty, GroupId, Outcome, Question, QuizConfig, QuizEvent, ScoringPolicy, TurnOrder,
};
use trivia_engine::{QuestionSource, QuizEngine};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bank with `per_tier` questions in every tier.
fn bank(per_tier: usize) -> QuestionBank {
    QuestionBank::from_questions(Difficulty::ALL.into_iter().flat_map(|tier| {
        (0..per_tier).map(move |i| {
            Question::new(
                format!("{tier} question {i}"),
                ["alpha", "beta", "gamma", "delta"],
                ["alpha", "beta", "gamma", "delta"][i % 4],
                tier,
            )
            .unwrap()
        })
    }))
}

/// Submit the correct answer for the live question.
fn answer_correctly<Q: QuestionSource, S: Scheduler>(engine: &mut QuizEngine<Q, S>) -> u32 {
    let answer = engine
        .current_question()
        .expect("a question should be live")
        .correct_answer()
        .to_string();
    engine.submit_answer(&answer).expect("answer should be accepted").points
}

// =============================================================================
// Scenario
// =============================================================================

/// Two groups alternate; A always answers correctly, B always times out.
#[test]
fn test_two_group_round_robin_scenario() {
    init_logging();
    let config = QuizConfig::default().with_turn_order(TurnOrder::RoundRobin);
    let mut engine = QuizEngine::with_manual_clock(config, bank(5));

    engine.initialize(2).unwrap();
    let a = engine.add_group("A").unwrap();
    let b = engine.add_group("B").unwrap();
    for group in engine.groups() {
        assert_eq!(group.question_count(), 6);
    }

    engine.start().unwrap();
    assert_eq!(engine.current_group().map(|g| g.id()), Some(a));
    assert!(engine.is_question_live());
    assert_eq!(engine.remaining_seconds(), 30);

    for round in 0..6 {
        // A answers right away.
        assert_eq!(engine.current_group().unwrap().id(), a);
        let points = answer_correctly(&mut engine);
        assert!(points >= 10);
        assert_eq!(engine.current_group().unwrap().id(), b);

        // B gets its question after the transition delay and lets it expire.
        engine.advance(2000);
        assert!(engine.is_question_live());
        let b_score = engine.groups()[b.index()].score();
        engine.advance(31_000);
        assert!(!engine.is_question_live());
        assert_eq!(engine.groups()[b.index()].score(), b_score);
        assert_eq!(engine.last_outcome().unwrap().outcome, Outcome::TimedOut);

        if round < 5 {
            engine.advance(2000);
            assert!(engine.is_question_live());
        }
    }

    assert!(!engine.is_running());
    assert!(engine.is_game_over());
    assert_eq!(engine.groups()[a.index()].score(), 6 * 25);
    assert_eq!(engine.groups()[b.index()].score(), 0);

    let winners: Vec<GroupId> = engine.winners().iter().map(|g| g.id()).collect();
    assert_eq!(winners, vec![a]);
    assert_eq!(engine.history().len(), 12);
    assert_eq!(engine.scheduler().pending(), 0);
}

// =============================================================================
// Turn Order
// =============================================================================

/// Sequential order: a group plays all its questions before the next starts.
#[test]
fn test_sequential_order() {
    let config = QuizConfig::default().with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(3));

    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();
    engine.start().unwrap();

    let mut order = Vec::new();
    while engine.is_running() {
        order.push(engine.active_group_index());
        answer_correctly(&mut engine);
    }

    assert_eq!(order, vec![0, 0, 0, 1, 1, 1]);
    assert!(engine.is_game_over());
}

/// Round robin skips groups that have run out of questions.
#[test]
fn test_round_robin_skips_exhausted_groups() {
    let config = QuizConfig::default()
        .with_turn_order(TurnOrder::RoundRobin)
        .with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(3));

    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();
    engine.start().unwrap();

    // A, B, A, B leaves one question each; then a late group joins.
    for _ in 0..4 {
        answer_correctly(&mut engine);
    }
    engine.add_group("C").unwrap();

    let mut order = Vec::new();
    while engine.is_running() {
        order.push(engine.active_group_index());
        answer_correctly(&mut engine);
    }

    assert_eq!(order, vec![0, 1, 2, 2, 2]);
}

/// The turn-passed events follow the active group.
#[test]
fn test_turn_passed_events() {
    let config = QuizConfig::default()
        .with_turn_order(TurnOrder::RoundRobin)
        .with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(2));

    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();
    engine.start().unwrap();
    engine.drain_events();

    answer_correctly(&mut engine);
    let events = engine.drain_events();
    assert!(events.contains(&QuizEvent::TurnPassed {
        from: GroupId::new(0),
        to: GroupId::new(1),
    }));
    assert!(events
        .iter()
        .any(|e| matches!(e, QuizEvent::QuestionStarted { group, .. } if *group == GroupId::new(1))));
}

// =============================================================================
// Scoring
// =============================================================================

/// Wrong answers and timeouts never change any score.
#[test]
fn test_wrong_and_timeout_score_zero() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(2));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();

    let outcome = engine.submit_answer("not an option").unwrap();
    assert_eq!(outcome.outcome, Outcome::Incorrect);
    assert_eq!(outcome.points, 0);

    engine.advance(2000);
    engine.advance(31_000);
    assert_eq!(engine.last_outcome().unwrap().outcome, Outcome::TimedOut);
    assert_eq!(engine.groups()[0].score(), 0);
}

/// Difficulty bonus applies on top of the base award.
#[test]
fn test_difficulty_bonus_policy() {
    let scoring = ScoringPolicy::base_only(10).with_difficulty_bonus(0, 5, 10);
    let config = QuizConfig::default()
        .with_scoring(scoring)
        .with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(2));

    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();
    while engine.is_running() {
        answer_correctly(&mut engine);
    }

    // One question per tier: 10 + 15 + 20.
    assert_eq!(engine.groups()[0].score(), 45);
    for record in engine.history() {
        let expected = match record.difficulty {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
        };
        assert_eq!(record.points, expected);
    }
}

/// Speed bonus shrinks as the clock runs down.
#[test]
fn test_speed_bonus_uses_remaining_seconds() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(2));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();

    engine.advance(25_000);
    assert_eq!(engine.remaining_seconds(), 5);
    assert_eq!(answer_correctly(&mut engine), 12);
    assert_eq!(engine.history()[0].remaining_seconds, 5);
}

// =============================================================================
// Winners
// =============================================================================

/// Groups sharing the top score all win.
#[test]
fn test_tied_winners() {
    let config = QuizConfig::default()
        .with_scoring(ScoringPolicy::base_only(10))
        .with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(3));

    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();
    engine.add_group("C").unwrap();
    engine.start().unwrap();

    // C misses its first question, everyone else is perfect.
    while engine.is_running() {
        let is_c_first = engine.active_group_index() == 2
            && engine.current_group().unwrap().current_question_index() == 0;
        if is_c_first {
            engine.submit_answer("nope").unwrap();
        } else {
            answer_correctly(&mut engine);
        }
    }

    let winners: Vec<&str> = engine.winners().iter().map(|g| g.name()).collect();
    assert_eq!(winners, vec!["A", "B"]);

    let standings: Vec<&str> = engine.standings().iter().map(|g| g.name()).collect();
    assert_eq!(standings, vec!["A", "B", "C"]);
}

/// Winners are empty while the game is still going.
#[test]
fn test_no_winners_mid_game() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(2));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    assert!(engine.winners().is_empty());

    engine.start().unwrap();
    answer_correctly(&mut engine);
    assert!(!engine.is_game_over());
    assert!(engine.winners().is_empty());
    assert!(engine.snapshot().winners.is_empty());
}

// =============================================================================
// Reset & Determinism
// =============================================================================

/// Resetting twice is the same as resetting once.
#[test]
fn test_reset_is_idempotent() {
    let config = QuizConfig::default().with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(2));
    engine.initialize(2).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();
    answer_correctly(&mut engine);

    engine.reset();
    let once = engine.state().clone();
    let once_events = engine.drain_events();

    engine.reset();
    assert_eq!(engine.state(), &once);
    assert_eq!(engine.drain_events(), once_events);
    assert_eq!(once_events, vec![QuizEvent::Reset]);
    assert!(!engine.is_game_over());
    assert_eq!(engine.scheduler().pending(), 0);
}

/// A new game can be played after reset.
#[test]
fn test_play_again_after_reset() {
    let config = QuizConfig::default().with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(2));

    for _ in 0..2 {
        engine.initialize(1).unwrap();
        engine.add_group("A").unwrap();
        engine.start().unwrap();
        while engine.is_running() {
            answer_correctly(&mut engine);
        }
        assert!(engine.is_game_over());
        engine.reset();
    }
}

/// Scripted answers against a deterministic source give identical results.
#[test]
fn test_deterministic_replay() {
    fn play() -> (Vec<u32>, Vec<Outcome>) {
        let source = SequentialSource::from_questions(
            Difficulty::ALL.into_iter().flat_map(|tier| bank(3).tier(tier).to_vec()),
        );
        let config = QuizConfig::default()
            .with_turn_order(TurnOrder::RoundRobin)
            .with_seed(1234);
        let mut engine = QuizEngine::new(config, source, ManualScheduler::new());

        engine.initialize(2).unwrap();
        engine.add_group("A").unwrap();
        engine.add_group("B").unwrap();
        engine.start().unwrap();

        let mut turn = 0u64;
        while engine.is_running() {
            if engine.is_question_live() {
                match turn % 3 {
                    0 => {
                        engine.advance(turn * 700 % 20_000);
                        answer_correctly(&mut engine);
                    }
                    1 => {
                        engine.submit_answer("beta");
                    }
                    _ => {
                        engine.advance(31_000);
                    }
                }
                turn += 1;
            } else {
                engine.advance(1000);
            }
        }

        let scores = engine.groups().iter().map(|g| g.score()).collect();
        let outcomes = engine.history().iter().map(|r| r.outcome).collect();
        (scores, outcomes)
    }

    assert_eq!(play(), play());
}

/// Seeded random banks draw the same questions every run.
#[test]
fn test_same_seed_same_questions() {
    let questions = |seed: u64| {
        let config = QuizConfig::default().with_seed(seed);
        let mut engine = QuizEngine::with_manual_clock(config, bank(10));
        engine.initialize(3).unwrap();
        engine.add_group("A").unwrap();
        engine.groups()[0].questions().clone()
    };

    assert_eq!(questions(99), questions(99));
}

/// Groups draw their questions independently.
#[test]
fn test_groups_draw_independently() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(20));
    engine.initialize(3).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();

    let a = engine.groups()[0].questions();
    let b = engine.groups()[1].questions();
    assert_eq!(a.len(), 9);
    assert_eq!(b.len(), 9);
    assert_ne!(a, b);
}

// =============================================================================
// Presentation
// =============================================================================

/// The snapshot never reveals the key of a question that has not been asked.
#[test]
fn test_snapshot_reveals_only_resolved_question() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(3));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();

    // Before start nothing is shown.
    assert!(engine.snapshot().current_question.is_none());

    engine.start().unwrap();
    let asked = engine.current_question().unwrap().clone();
    assert_eq!(engine.snapshot().current_question.unwrap().correct_answer, None);

    let wrong = asked.options().iter().find(|o| !asked.is_correct(o)).unwrap().clone();
    engine.submit_answer(&wrong).unwrap();

    // During the delay the cursor is on the next question, but the snapshot
    // still shows the one just resolved.
    let next = engine.current_question().unwrap().clone();
    assert_ne!(next.text(), asked.text());
    let gap = engine.snapshot().current_question.unwrap();
    assert_eq!(gap.text, asked.text());
    assert_eq!(gap.correct_answer.as_deref(), Some(asked.correct_answer()));

    engine.advance(2000);
    let live = engine.snapshot().current_question.unwrap();
    assert_eq!(live.text, next.text());
    assert_eq!(live.correct_answer, None);
}

/// A long wait in sequential order lands on the same group's next question.
#[test]
fn test_live_turn_tells_questions_apart() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(3));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.add_group("B").unwrap();
    engine.start().unwrap();

    let first = engine.live_turn();
    assert_eq!(first, Some((GroupId::new(0), 0)));

    // Timeout at 31 s, next question live after the 2 s delay.
    engine.advance(35_000);
    assert!(engine.is_question_live());
    assert_eq!(engine.active_group_index(), 0);
    assert_eq!(engine.live_turn(), Some((GroupId::new(0), 1)));
    assert_ne!(engine.live_turn(), first);

    engine.submit_answer("nonsense").unwrap();
    assert_eq!(engine.live_turn(), None);
}

// =============================================================================
// Misuse
// =============================================================================

/// Answers after the game are ignored.
#[test]
fn test_answer_after_game_over_is_ignored() {
    let config = QuizConfig::default().with_transition_delay_ms(0);
    let mut engine = QuizEngine::with_manual_clock(config, bank(1));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();
    while engine.is_running() {
        answer_correctly(&mut engine);
    }

    let before = engine.state().clone();
    assert!(engine.submit_answer("alpha").is_none());
    assert_eq!(engine.state(), &before);
}

/// A second answer to the same question is ignored.
#[test]
fn test_double_submit_is_ignored() {
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), bank(2));
    engine.initialize(1).unwrap();
    engine.add_group("A").unwrap();
    engine.start().unwrap();

    answer_correctly(&mut engine);
    let score = engine.groups()[0].score();
    assert!(engine.submit_answer("alpha").is_none());
    assert_eq!(engine.groups()[0].score(), score);
}

/// A bank with a thin tier hands out fewer questions instead of failing.
#[test]
fn test_bank_shortfall() {
    let mut thin = QuestionBank::new();
    thin.add(Question::new("only easy", ["x", "y"], "x", Difficulty::Easy).unwrap());
    let mut engine = QuizEngine::with_manual_clock(QuizConfig::default(), thin);

    engine.initialize(2).unwrap();
    engine.add_group("A").unwrap();
    assert_eq!(engine.total_questions_per_group(), 6);
    assert_eq!(engine.groups()[0].question_count(), 1);
}
