//! Play command - a single game, optionally with a human seat
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_seat(), report()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use boop_core::{GameState, Policy};
use boop_tournament::{create_policy, describe_winner, play_from, AiConfig, GameRecord, MatchConfig, PlayerType};

use crate::human::HumanPolicy;
use crate::render::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Player one: alpha-beta, minimax, greedy, random or human
    #[arg(long, default_value = "human")]
    pub one: String,

    /// Player two: alpha-beta, minimax, greedy, random or human
    #[arg(long, default_value = "alpha-beta")]
    pub two: String,

    /// Search depth (alpha-beta and minimax)
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Think time per AI move in milliseconds
    #[arg(long, default_value = "100")]
    pub think_ms: u64,

    /// Half-moves before the game is called a tie
    #[arg(long, default_value = "1000")]
    pub turn_limit: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or(42);
    let mut one = build_seat(&args.one, args.depth, seed)?;
    let mut two = build_seat(&args.two, args.depth, seed.wrapping_add(1))?;

    let config = MatchConfig {
        games: 1,
        think_time_ms: args.think_ms,
        turn_limit: args.turn_limit,
        parallel: false,
        seed: Some(seed),
    };

    tracing::info!("Starting game: {} vs {}", one.name(), two.name());
    let (state, record) = play_from(GameState::new(), one.as_mut(), two.as_mut(), &config)?;

    report(&state, &record);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build a seat from its command-line name
fn build_seat(name: &str, depth: u32, seed: u64) -> Result<Box<dyn Policy>> {
    if name.eq_ignore_ascii_case("human") {
        return Ok(Box::new(HumanPolicy::stdio()));
    }

    let player_type: PlayerType = name.parse()?;
    let config = AiConfig {
        player_type,
        depth,
        seed: Some(seed),
    };
    let policy: Box<dyn Policy> = create_policy(&config, seed);
    Ok(policy)
}

fn report(state: &GameState, record: &GameRecord) {
    println!("\n{}", render(state));
    println!("=== Game Over ===");
    println!("Result:      {}", describe_winner(record.winner));
    if record.hit_turn_cap {
        println!("             (turn limit reached)");
    }
    println!("Half-moves:  {}", record.half_moves);
    println!("Final score: {}", record.final_score);
    println!("Think time:  {}", format_ms(record.total_think_ms));
    println!("  Player 1 avg: {}", format_ms(record.avg_think_ms_one));
    println!("  Player 2 avg: {}", format_ms(record.avg_think_ms_two));
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_ms(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.1} ms", ms)
    }
}
