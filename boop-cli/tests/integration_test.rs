//! Integration tests for the Boop engine and AI
//!
//! Tests the full stack: rules engine, evaluation, policies and the game driver

use boop_core::{
    evaluate, AlphaBetaAI, Deadline, GameResult, GameState, GreedyAI, Move, Pattern, Phase, Player, Policy,
    RandomAI, PIECES_PER_PLAYER,
};
use boop_tournament::{play_game, play_match, AiConfig, MatchConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Seeded random playout, checking `check` before every move
fn random_playout(seed: u64, max_moves: usize, mut check: impl FnMut(&GameState, &[Move])) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new();

    for _ in 0..max_moves {
        if state.is_game_over() {
            break;
        }
        let moves = state.legal_moves();
        check(&state, &moves);
        let mv = *moves.choose(&mut rng).expect("live game with no moves");
        state.apply_move(mv);
    }
    state
}

fn pieces_owned(state: &GameState, player: Player) -> u32 {
    let on_board = state.pieces().filter(|(_, piece)| piece.owner == player).count() as u32;
    on_board + state.reserve(player).total() as u32
}

// ============================================================================
// GAME LOGIC TESTS
// ============================================================================

#[test]
fn test_live_states_always_have_legal_moves() {
    for seed in 0..20 {
        random_playout(seed, 400, |state, moves| {
            assert!(!moves.is_empty(), "seed {seed}: no moves in {:?}", state.phase());
            for mv in moves {
                assert!(state.is_legal(mv), "seed {seed}: generated illegal move {mv}");
                assert_eq!(mv.phase(), state.phase());
            }
        });
    }
}

#[test]
fn test_piece_conservation() {
    for seed in 0..20 {
        random_playout(seed, 400, |state, _| {
            for player in [Player::One, Player::Two] {
                assert_eq!(pieces_owned(state, player), PIECES_PER_PLAYER as u32, "seed {seed}");
            }
        });
    }
}

#[test]
fn test_phase_transitions() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..20 {
        let mut state = GameState::new();
        while !state.is_game_over() && state.move_number() < 300 {
            let moves = state.legal_moves();
            let mv = *moves.choose(&mut rng).unwrap();
            let before = state.clone();
            state.apply_move(mv);

            match (before.phase(), state.phase()) {
                (Phase::Place, Phase::RemoveThree) => {
                    assert_eq!(state.move_number(), before.move_number());
                    assert!(state.count_in_row(3, Pattern::Friendly) > 0);
                }
                (Phase::Place, Phase::RemoveOne) => {
                    assert_eq!(state.move_number(), before.move_number());
                    assert_eq!(state.count_in_row(3, Pattern::Friendly), 0);
                    assert!(state.reserve(before.next_mover()).is_empty());
                }
                (_, Phase::Place) => {
                    assert_eq!(state.move_number(), before.move_number() + 1);
                    assert_eq!(state.next_mover(), before.next_mover().opponent());
                }
                (from, to) => panic!("unexpected transition {from} -> {to}"),
            }
        }
    }
}

#[test]
fn test_terminal_result_matches_evaluation() {
    for seed in 0..30 {
        let state = random_playout(seed, 2000, |_, _| {});
        if !state.is_game_over() {
            continue;
        }
        let score = evaluate(&state);
        match state.result() {
            GameResult::PlayerOneWins => assert!(score < 0),
            GameResult::PlayerTwoWins => assert!(score > 0),
            GameResult::Ongoing => panic!("seed {seed}: terminal state reported as ongoing"),
        }
    }
}

// ============================================================================
// AI TESTS
// ============================================================================

#[test]
fn test_alphabeta_respects_deadline_mid_game() {
    let state = random_playout(3, 25, |_, _| {});
    let moves = state.legal_moves();
    let mut ai = AlphaBetaAI::new(6);

    let start = Instant::now();
    let mv = ai.choose_move(&state, &moves, &Deadline::from_millis(50)).unwrap();
    let elapsed = start.elapsed();

    println!("Depth 6 under 50 ms: {:?} ({} nodes)", elapsed, ai.stats().nodes);
    assert!(moves.contains(&mv));
    assert!(elapsed < Duration::from_secs(2), "search overran its deadline: {elapsed:?}");
}

#[test]
fn test_expired_deadline_for_every_policy() {
    let state = random_playout(8, 10, |_, _| {});
    let moves = state.legal_moves();
    let expired = Deadline::from_millis(0);

    let mut policies: Vec<Box<dyn Policy>> = vec![
        Box::new(AlphaBetaAI::default()),
        Box::new(GreedyAI::new()),
        Box::new(RandomAI::with_seed(4)),
    ];
    for policy in policies.iter_mut() {
        let mv = policy.choose_move(&state, &moves, &expired);
        assert!(mv.is_some_and(|m| moves.contains(&m)), "{} gave no usable move", policy.name());
    }
}

// ============================================================================
// FULL INTEGRATION TEST
// ============================================================================

#[test]
fn test_full_game_alphabeta_vs_random() {
    let mut ab = AlphaBetaAI::new(2);
    let mut random = RandomAI::with_seed(17);
    let config = MatchConfig::default().with_think_time(20).with_turn_limit(300);

    let record = play_game(&mut ab, &mut random, &config).unwrap();

    println!("AB vs random: {:?} in {} half-moves", record.winner, record.half_moves);
    assert!(record.half_moves > 0);
    if !record.hit_turn_cap {
        assert!(record.winner.is_some());
    }
}

#[test]
fn test_match_of_baseline_policies() {
    let config = MatchConfig::new(4).with_seed(1).with_think_time(10);
    let result = play_match(&AiConfig::greedy(), &AiConfig::random(), &config).unwrap();

    assert_eq!(result.games_played, 4);
    assert_eq!(result.one_wins + result.two_wins + result.ties, 4);
    assert!(result.avg_half_moves > 0.0);

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"one_wins\""));
}
